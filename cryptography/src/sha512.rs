//! SHA-512 digests.
//!
//! Uses the `sha2` crate to extract uniform randomness from threshold signatures.
//!
//! # Example
//! ```rust
//! use beacon_cryptography::sha512;
//!
//! let digest = sha512::hash(b"hello world");
//! assert_eq!(digest.as_ref().len(), sha512::DIGEST_LENGTH);
//! println!("digest: {}", digest);
//! ```

use beacon_utils::hex;
use sha2::{Digest as _, Sha512};
use std::fmt::{Debug, Display};

/// Length of a SHA-512 digest in bytes.
pub const DIGEST_LENGTH: usize = 64;

/// Generate a SHA-512 digest from a message.
pub fn hash(message: &[u8]) -> Digest {
    let array: [u8; DIGEST_LENGTH] = Sha512::digest(message).into();
    Digest::from(array)
}

/// Digest of a SHA-512 hashing operation.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Digest([u8; DIGEST_LENGTH]);

impl From<[u8; DIGEST_LENGTH]> for Digest {
    fn from(value: [u8; DIGEST_LENGTH]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}
