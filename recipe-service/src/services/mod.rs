pub mod datastore;
pub mod metrics;
pub mod persistence;
pub mod providers;
pub mod upstream;

pub use datastore::{Datastore, MockDatastore, StoreError, SupabaseStore};
pub use providers::{
    GenerationParams, IngredientService, ProviderError, RecipeService, RemoteIngredientService,
    RemoteRecipeService, StaticIngredientService, StaticRecipeService,
};
