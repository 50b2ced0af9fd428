//! Cipher Master Builder

use jwtkit_key::CipherService;

/// Master builder for asymmetric encryption
#[derive(Debug, Clone, Copy, Default)]
pub struct CipherMasterBuilder;

impl CipherMasterBuilder {
    /// RSA-OAEP with SHA-256
    #[must_use]
    pub fn rsa_oaep(self) -> CipherService {
        CipherService::rsa_oaep()
    }
}
