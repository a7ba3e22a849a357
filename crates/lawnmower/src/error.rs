use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LawnError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("environment is not reset; call reset() before stepping")]
    NotReset,
    #[error("invalid action index {0} (expected 0..3)")]
    InvalidAction(usize),
}

pub type Result<T> = std::result::Result<T, LawnError>;
