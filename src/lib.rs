pub mod api_connection;
pub mod assistant;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod models;
pub mod nutrition_parser;
pub mod nutrition_synth;
pub mod prompts;
pub mod recipe_parser;
pub mod recipe_synth;
pub mod retry;
pub mod validation;

pub use assistant::{Generated, HealthAssistant, Source};
pub use config::{AssistantConfig, ConfigError};
pub use error::InputError;
pub use models::{MealSelection, MealType, NutritionData, Recipe};
