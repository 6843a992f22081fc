//! Errors raised while normalizing a request or invoking the provider.

/// Generation failure conditions.
///
/// A response that carries no usable media, or text that is not valid JSON,
/// is deliberately absent here: both are successful outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No API key in any request header or process-wide default
    #[display("Missing Google AI Studio API key")]
    MissingCredential,
    /// A mandatory input was absent
    #[display("Missing {_0}")]
    MissingRequiredField(String),
    /// A present input could not be interpreted
    #[display("Invalid {field}: {reason}")]
    InvalidField {
        /// Request field name as supplied by the caller
        field: String,
        /// What was wrong with it
        reason: String,
    },
    /// The provider call failed; the message is the provider's own
    #[display("{message}")]
    ProviderCallFailed {
        /// HTTP status returned by the provider, when one was received
        status: Option<u16>,
        /// Provider error message, passed through verbatim
        message: String,
    },
}

impl GenerationErrorKind {
    /// True when the caller supplied a bad or incomplete request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::MissingCredential
                | GenerationErrorKind::MissingRequiredField(_)
                | GenerationErrorKind::InvalidField { .. }
        )
    }
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use pixagen_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingCredential);
/// assert!(format!("{}", err).contains("API key"));
/// assert!(err.kind().is_client_error());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    kind: GenerationErrorKind,
    line: u32,
    file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}

impl From<GenerationErrorKind> for GenerationError {
    #[track_caller]
    fn from(kind: GenerationErrorKind) -> Self {
        Self::new(kind)
    }
}
