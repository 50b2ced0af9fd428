//! Common infrastructure shared by the jwtkit crates
//!
//! This crate provides:
//! - The workspace-wide [`Error`] with kind, context and preserved cause
//! - The base64 / base64url codec used by token segments and PEM bodies
//! - [`CryptoTask`], the single-shot suspending future for engine work
//! - `env_logger` bootstrap and log-safe key fingerprints

#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;
pub mod task;

pub use error::*;
pub use task::CryptoTask;
