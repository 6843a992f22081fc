//! Listener and serving errors for the gateway.

use std::net::SocketAddr;

/// The gateway could not bind its listener or stopped serving.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// What went wrong, including the address when one is known
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixagen_error::HttpError;
    ///
    /// let err = HttpError::new("Server error: connection reset by peer");
    /// assert!(err.message.starts_with("Server error"));
    /// assert!(err.to_string().starts_with("Gateway HTTP Error: Server error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The listener could not be bound to `addr`.
    ///
    /// ```
    /// use pixagen_error::HttpError;
    ///
    /// let addr = "127.0.0.1:3001".parse().unwrap();
    /// let err = HttpError::bind(addr, "address in use");
    /// assert_eq!(err.message, "Failed to bind 127.0.0.1:3001: address in use");
    /// ```
    #[track_caller]
    pub fn bind(addr: SocketAddr, reason: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to bind {}: {}", addr, reason))
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gateway HTTP Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for HttpError {}
