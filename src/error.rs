use thiserror::Error;

/// Result type alias for operations that may fail with [`SinglelineError`].
pub type SinglelineResult<T> = std::result::Result<T, SinglelineError>;

/// Error types that can occur around the stroke pipeline.
///
/// The skeleton, graph, tracing and placement stages never fail once they hold
/// a well-formed grid; these variants cover loading glyph images, building
/// grids from raw buffers, rejecting unusable marker options and batch runs
/// where nothing succeeded.
#[derive(Debug, Error)]
pub enum SinglelineError {
    /// Image loading, decoding, or encoding error.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
    /// File system I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Raw buffer does not match the requested grid dimensions.
    #[error("Invalid grid shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// A marker or transform option is out of its valid range.
    #[error("Invalid value {value} for `{name}`")]
    InvalidParameter { name: &'static str, value: f64 },
    /// Every input of a batch failed; each failure was reported as it happened.
    #[error("All {failed} inputs failed")]
    AllInputsFailed { failed: usize },
}
