use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid price filter: {0}")]
    InvalidPrice(String),

    #[error("Unknown property type: {0}")]
    UnknownPropertyType(String),
}
