use thiserror::Error;

use crate::command::CommandError;
use crate::generator::GenerationError;

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError), // The external turn-generation call failed.

    #[error("Command error: {0}")]
    Command(#[from] CommandError), // Operator command did not parse.

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("A turn advance is already in flight")]
    AdvanceInFlight, // Second advance attempted while one is outstanding.
}

pub type Result<T> = std::result::Result<T, Error>;
