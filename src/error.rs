use thiserror::Error;

use crate::api_connection::connection::ApiConnectionError;

/// The only failure the public entry points report. Raised before any
/// network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("No food description provided")]
    EmptyDescription,

    #[error("No ingredients provided")]
    NoIngredients,
}

/// Why raw model output could not be turned into a candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No structured data found in response")]
    NoStructuredDataFound,

    #[error("Structured data has the wrong shape: {0}")]
    StructureFailure(String),

    #[error("Response could not be parsed: {0}")]
    ParseFailure(String),
}

/// Anything that spends one attempt of the retry budget.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("Transport failure: {0}")]
    Transport(#[from] ApiConnectionError),

    #[error("Parse failure: {0}")]
    Parse(#[from] ParseError),

    #[error("Validation failure: {0}")]
    Validation(String),
}
