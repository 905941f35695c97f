/// Errors surfaced by the recommendation engine.
///
/// Only malformed input is an error. Everything else (unparseable scores,
/// missing sentiment backend, unknown seed titles, empty candidate sets)
/// degrades softly inside the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// corpus record is missing a required field or breaks a corpus invariant
    #[error("schema error at row {row}: {message}")]
    Schema { row: usize, message: String },

    /// request can not be served as given
    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    /// index snapshot could not be encoded or decoded
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl RecommendError {
    pub(crate) fn schema(row: usize, message: impl Into<String>) -> Self {
        Self::Schema { row, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
