//! Share secrets, produce threshold signatures, and hash them into randomness.
//!
//! # Status
//!
//! `beacon-cryptography` is **ALPHA** software and is not yet recommended for production use. Developers should
//! expect breaking changes and occasional instability.

pub mod bls12381;
pub mod sha512;
pub use sha512::hash;
