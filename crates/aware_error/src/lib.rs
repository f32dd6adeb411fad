//! Error types for the Aware anti-nuke engine.
//!
//! This crate provides the foundation error types used throughout the Aware workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use aware_error::{AwareResult, AntinukeError, AntinukeErrorKind};
//!
//! fn resolve() -> AwareResult<u64> {
//!     Err(AntinukeError::new(AntinukeErrorKind::AttributionUnavailable(
//!         "audit log empty".to_string(),
//!     )))?
//! }
//!
//! assert!(resolve().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod antinuke;
mod config;
mod database;
mod error;
mod platform;

pub use antinuke::{AntinukeError, AntinukeErrorKind, AntinukeResult};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{AwareError, AwareErrorKind, AwareResult};
pub use platform::{PlatformError, PlatformErrorKind};
