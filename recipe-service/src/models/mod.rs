pub mod feedback;
pub mod message;
pub mod suggestion;

pub use feedback::Feedback;
pub use message::{Message, SenderType};
pub use suggestion::{RecipeSuggestion, SuggestionResult};
