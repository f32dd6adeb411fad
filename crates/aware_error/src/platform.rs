//! Errors raised by platform capability adapters.

/// Failure conditions reported by audit, moderation and notification capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Transport-level failure talking to the platform
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Platform answered with a non-success status
    #[display("Platform returned status {}: {}", status, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Target entity does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// The bot lacks the permission required for the call
    #[display("Permission denied: {}", _0)]
    PermissionDenied(String),
    /// Destination reference could not be parsed
    #[display("Invalid destination: {}", _0)]
    InvalidDestination(String),
    /// Capability is temporarily not reachable
    #[display("Platform unavailable: {}", _0)]
    Unavailable(String),
}

/// Platform error with source location tracking.
///
/// # Examples
///
/// ```
/// use aware_error::{PlatformError, PlatformErrorKind};
///
/// let err = PlatformError::new(PlatformErrorKind::PermissionDenied("ban".into()));
/// assert!(format!("{}", err).contains("Permission denied"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error kind.
    pub fn kind(&self) -> &PlatformErrorKind {
        &self.kind
    }
}
