use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImpactError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("No customer records to process")]
    EmptyInput,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ImpactError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type ImpactResult<T> = Result<T, ImpactError>;
