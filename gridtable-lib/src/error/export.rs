//! Export errors

/// Errors building a CSV export payload.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A record failed to encode.
    #[error("CSV encoding failed: {0}")]
    Encode(#[from] csv::Error),

    /// The underlying buffer could not be flushed.
    #[error("CSV buffer flush failed: {0}")]
    Flush(#[from] std::io::Error),
}
