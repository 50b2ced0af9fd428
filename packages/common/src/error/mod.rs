//! Error handling with context propagation
//!
//! Provides the single error type used across jwtkit:
//! - A closed set of error kinds
//! - Context strings and preserved engine causes
//! - Extension traits for wrapping foreign errors

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
pub mod macros;
pub mod types;

pub use extensions::{OptionExt, ResultExt};
pub use logging::LoggingTransformer;
pub use types::{Error, ErrorKind, Result};

// Tests live in tests/ rather than in src/
