pub mod connection;
pub mod endpoints;
pub mod fake;

pub use connection::{ApiConnectionError, CompletionProvider, GenerativeLanguageProvider};
pub use endpoints::GenerationPreset;
pub use fake::{ScriptedProvider, UnavailableProvider};
