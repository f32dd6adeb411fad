//! Discord-specific error types.

use aware_error::{PlatformError, PlatformErrorKind};
use derive_getters::Getters;
use serenity::http::HttpError;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity error without an HTTP status (gateway, decoding, model).
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// Discord answered with a non-success status.
    #[display("Discord returned {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Discord's error message or the response body.
        message: String,
    },

    /// Webhook request never got an answer.
    #[display("Webhook request failed: {_0}")]
    WebhookFailed(String),

    /// Connection to the Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Missing or invalid settings.
    #[display("Configuration error: {_0}")]
    ConfigurationError(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use aware_social::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::ConnectionFailed("gateway closed".into()));
    /// assert!(err.to_string().contains("gateway closed"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        let kind = match err {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                DiscordErrorKind::Rejected {
                    status: response.status_code.as_u16(),
                    message: response.error.message,
                }
            }
            other => DiscordErrorKind::SerenityError(other.to_string()),
        };
        DiscordError::new(kind)
    }
}

impl From<reqwest::Error> for DiscordError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        DiscordError::new(DiscordErrorKind::WebhookFailed(err.to_string()))
    }
}

impl From<DiscordError> for PlatformError {
    #[track_caller]
    fn from(err: DiscordError) -> Self {
        let kind = match err.kind {
            DiscordErrorKind::Rejected {
                status: 403,
                message,
            } => PlatformErrorKind::PermissionDenied(message),
            DiscordErrorKind::Rejected {
                status: 404,
                message,
            } => PlatformErrorKind::NotFound(message),
            DiscordErrorKind::Rejected { status, message } => {
                PlatformErrorKind::Status { status, message }
            }
            DiscordErrorKind::SerenityError(message) | DiscordErrorKind::WebhookFailed(message) => {
                PlatformErrorKind::Http(message)
            }
            DiscordErrorKind::ConnectionFailed(message)
            | DiscordErrorKind::ConfigurationError(message) => {
                PlatformErrorKind::Unavailable(message)
            }
        };
        PlatformError::new(kind)
    }
}

/// Serenity failure as a capability error.
#[track_caller]
pub(crate) fn platform(err: serenity::Error) -> PlatformError {
    DiscordError::from(err).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(status: u16) -> PlatformError {
        DiscordError::new(DiscordErrorKind::Rejected {
            status,
            message: "Missing Permissions".to_string(),
        })
        .into()
    }

    #[test]
    fn test_forbidden_maps_to_permission_denied() {
        assert_eq!(
            rejected(403).kind(),
            &PlatformErrorKind::PermissionDenied("Missing Permissions".to_string())
        );
    }

    #[test]
    fn test_not_found_and_other_statuses() {
        assert!(matches!(rejected(404).kind(), PlatformErrorKind::NotFound(_)));
        assert!(matches!(
            rejected(429).kind(),
            PlatformErrorKind::Status { status: 429, .. }
        ));
    }

    #[test]
    fn test_transport_failures_map_to_http() {
        let err: PlatformError =
            DiscordError::new(DiscordErrorKind::WebhookFailed("timed out".into())).into();
        assert_eq!(err.kind(), &PlatformErrorKind::Http("timed out".to_string()));
    }
}
