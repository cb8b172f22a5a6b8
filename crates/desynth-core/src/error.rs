use crate::chain::ChainError;
use crate::types::StepName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesynthError {
    #[error("deployment not found at {0}: run a deploy first or pass --deployment-path")]
    DeploymentNotFound(String),

    #[error("synth not found: {0}")]
    UnknownSynth(String),

    #[error("cannot remove the base synth: {0}")]
    ProtectedSynth(String),

    #[error("invalid currency key '{0}': must be 1-32 ASCII characters")]
    InvalidCurrencyKey(String),

    #[error("missing deployment target: {0}")]
    MissingTarget(String),

    #[error("no ABI for source '{source_name}' referenced by target '{target}'")]
    MissingAbi {
        target: String,
        source_name: String,
    },

    #[error(
        "address mismatch for {synth}: deployment has {deployed} but the protocol \
         has {registered} registered"
    )]
    AddressMismatch {
        synth: String,
        deployed: String,
        registered: String,
    },

    #[error("step {step} failed for {synth}: {source}")]
    StepFailed {
        synth: String,
        step: StepName,
        source: ChainError,
    },

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DesynthError>;
