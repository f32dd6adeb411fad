//! Detection pipeline error types.

/// Failure conditions of the detection pipeline.
///
/// Each kind carries a fixed handling rule:
/// - `AttributionUnavailable`: the event is dropped.
/// - `ConfigIncomplete`: punishment is aborted, detection is still logged.
/// - `ExternalActionFailed`: the action is aborted; quarantine compensates.
/// - `NotificationFailed`: logged only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AntinukeErrorKind {
    /// No audit entry could be tied to the event
    #[display("Attribution unavailable: {}", _0)]
    AttributionUnavailable(String),
    /// Guild policy lacks something the punishment needs
    #[display("Configuration incomplete: {}", _0)]
    ConfigIncomplete(String),
    /// A moderation call against the platform failed
    #[display("External action '{}' failed: {}", action, reason)]
    ExternalActionFailed {
        /// Action that was attempted
        action: String,
        /// Failure reported by the platform
        reason: String,
    },
    /// A log destination could not be reached
    #[display("Notification to {} failed after {} attempt(s): {}", destination, attempts, reason)]
    NotificationFailed {
        /// Destination label
        destination: String,
        /// Attempts made before giving up
        attempts: u32,
        /// Last failure
        reason: String,
    },
}

/// Detection pipeline error with source location tracking.
///
/// # Examples
///
/// ```
/// use aware_error::{AntinukeError, AntinukeErrorKind};
///
/// let err = AntinukeError::new(AntinukeErrorKind::ConfigIncomplete(
///     "no quarantine role".to_string(),
/// ));
/// assert!(format!("{}", err).contains("quarantine role"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Anti-Nuke Error: {} at line {} in {}", kind, line, file)]
pub struct AntinukeError {
    /// The kind of error that occurred
    pub kind: AntinukeErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AntinukeError {
    /// Create a new AntinukeError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AntinukeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error kind.
    pub fn kind(&self) -> &AntinukeErrorKind {
        &self.kind
    }

    /// Shorthand for an external action failure.
    #[track_caller]
    pub fn external(action: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::new(AntinukeErrorKind::ExternalActionFailed {
            action: action.into(),
            reason: reason.to_string(),
        })
    }
}

/// Result type for detection pipeline operations.
pub type AntinukeResult<T> = std::result::Result<T, AntinukeError>;
