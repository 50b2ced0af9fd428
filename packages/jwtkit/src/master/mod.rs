//! Master builders for all jwtkit operations

pub mod cipher;
pub mod core;
pub mod key;

pub use cipher::CipherMasterBuilder;
pub use core::JwtKit;
pub use key::KeyMasterBuilder;
