use thiserror::Error;

/// A strand column value other than `+` or `-`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid strand token: {0}")]
pub struct StrandParseError(pub String);
