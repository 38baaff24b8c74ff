use thiserror::Error;

/// Fatal errors surfaced by the pipeline core.
///
/// Everything else is a degradation handled internally: speaker rendering
/// falls back to paragraph rendering, invalid label formats fall back to the
/// default, and absent metadata stays absent.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The raw response is structurally unusable: not a JSON object, missing
    /// the `results` key, or no recognizable shape inside it.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The single-channel document could not be parsed at all.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
