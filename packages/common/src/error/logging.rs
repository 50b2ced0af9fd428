//! Structured logging bootstrap
//!
//! Library code logs through `log` / `tracing`; this module wires up
//! `env_logger` and offers log-safe fingerprints for key material.

use log::{error, info};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Levels come from `RUST_LOG`, e.g. `RUST_LOG=jwtkit_jwt=debug,jwtkit_key=info`.
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            let installed = env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .try_init()
                .is_ok();
            if installed {
                info!("Structured logging initialized");
            }
        });
    }

    /// Initialize logging for test environments; safe to call repeatedly
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Short SHA-256 fingerprint for referring to secrets in logs
    ///
    /// `#` followed by the first 12 hex characters of the digest.
    #[must_use]
    pub fn fingerprint(material: &[u8]) -> String {
        let digest = hex::encode(Sha256::digest(material));
        format!("#{}", &digest[..12])
    }

    /// Log a wrapped engine failure without exposing key material
    pub fn log_crypto_error(operation: &str, error: &dyn std::error::Error) {
        error!("Cryptographic operation failed: {operation} ({error})");
    }
}
