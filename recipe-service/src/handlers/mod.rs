pub mod feedback;
pub mod health;
pub mod messages;
pub mod metrics;
pub mod substitutions;
pub mod suggestions;

pub use feedback::submit_feedback;
pub use health::{health_check, not_found, readiness_check};
pub use messages::create_message;
pub use substitutions::substitute;
pub use suggestions::suggest;
