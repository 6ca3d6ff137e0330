//! Bounded calls into the ingredient and recipe services.

use crate::services::metrics::record_upstream_call;
use crate::services::providers::ProviderError;
use service_core::error::AppError;
use std::future::Future;
use std::time::Duration;

pub const INGREDIENT_SERVICE: &str = "ingredient_service";
pub const RECIPE_SERVICE: &str = "recipe_service";

/// Runs an upstream call under `timeout`. Timeouts map to 504, every other
/// failure to 502. Calls are never retried.
pub async fn call_upstream<T, F>(
    service: &'static str,
    timeout: Duration,
    call: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    let result = match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(format!(
            "{} did not answer within {}s",
            service,
            timeout.as_secs_f32()
        ))),
    };

    match result {
        Ok(value) => {
            record_upstream_call(service, "ok");
            Ok(value)
        }
        Err(ProviderError::Timeout(msg)) => {
            record_upstream_call(service, "timeout");
            tracing::error!(service = service, "Upstream timed out: {}", msg);
            Err(AppError::GatewayTimeout(msg))
        }
        Err(e) => {
            record_upstream_call(service, "error");
            tracing::error!(service = service, error = %e, "Upstream call failed");
            Err(AppError::BadGateway(format!("{}: {}", service, e)))
        }
    }
}
