use thiserror::Error;

/// Errors surfaced by the matrix wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatrixError {
    /// The underlying encoder could not fit the payload.
    #[error("encode error: {0}")]
    Encode(#[from] qrsym::EncodeError),
}
