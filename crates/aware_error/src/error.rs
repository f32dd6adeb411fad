//! Top-level error wrapper types.

use crate::{AntinukeError, ConfigError, DatabaseError, PlatformError};

/// Every error the Aware crates can surface.
///
/// # Examples
///
/// ```
/// use aware_error::{AwareError, ConfigError};
///
/// let err: AwareError = ConfigError::new("missing token").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AwareErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Platform capability error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Detection pipeline error
    #[from(AntinukeError)]
    Antinuke(AntinukeError),
}

/// Aware error with kind discrimination.
///
/// # Examples
///
/// ```
/// use aware_error::{AwareResult, ConfigError};
///
/// fn might_fail() -> AwareResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Aware Error: {}", _0)]
pub struct AwareError(Box<AwareErrorKind>);

impl AwareError {
    /// Create a new error from a kind.
    pub fn new(kind: AwareErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AwareErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AwareErrorKind
impl<T> From<T> for AwareError
where
    T: Into<AwareErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Aware operations.
pub type AwareResult<T> = std::result::Result<T, AwareError>;
