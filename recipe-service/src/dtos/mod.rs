pub mod chat;
pub mod recipes;

pub use chat::{CreateMessageRequest, FeedbackRequest, StatusResponse};
pub use recipes::{
    RecipeView, SubstitutionRequest, SubstitutionResponse, SuggestionRequest, SuggestionResponse,
};
