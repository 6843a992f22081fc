//! Error types for the PixaGen generation gateway.
//!
//! Every concern gets its own location-tracked error struct; [`PixagenError`]
//! aggregates them so handlers can propagate with `?` and still inspect the
//! original kind at the HTTP boundary.

mod config;
mod generation;
mod http;

pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum PixagenErrorKind {
    /// Request normalization or provider invocation failed
    Generation(GenerationError),
    /// Configuration could not be loaded
    Config(ConfigError),
    /// Server transport error
    Http(HttpError),
}

impl std::fmt::Display for PixagenErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixagenErrorKind::Generation(e) => write!(f, "{}", e),
            PixagenErrorKind::Config(e) => write!(f, "{}", e),
            PixagenErrorKind::Http(e) => write!(f, "{}", e),
        }
    }
}

/// PixaGen error with kind discrimination.
#[derive(Debug)]
pub struct PixagenError(Box<PixagenErrorKind>);

impl PixagenError {
    /// Create a new error from a kind.
    pub fn new(kind: PixagenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PixagenErrorKind {
        &self.0
    }

    /// Returns the generation error kind, if this error came from normalization
    /// or invocation.
    pub fn generation_kind(&self) -> Option<&GenerationErrorKind> {
        match self.kind() {
            PixagenErrorKind::Generation(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl std::fmt::Display for PixagenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PixaGen Error: {}", self.0)
    }
}

impl std::error::Error for PixagenError {}

impl<T> From<T> for PixagenError
where
    T: Into<PixagenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl From<GenerationErrorKind> for PixagenErrorKind {
    #[track_caller]
    fn from(kind: GenerationErrorKind) -> Self {
        PixagenErrorKind::Generation(GenerationError::new(kind))
    }
}

/// Result type for PixaGen operations.
pub type PixagenResult<T> = std::result::Result<T, PixagenError>;
