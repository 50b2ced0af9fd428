//! Builder-style JWT API
//!
//! [`Jwt::builder`] collects an algorithm and credentials, then signs or
//! verifies on the blocking pool through [`CryptoTask`](jwtkit_common::CryptoTask).

pub mod builder;

pub use builder::{Jwt, JwtBuilder, JwtMasterBuilder};
