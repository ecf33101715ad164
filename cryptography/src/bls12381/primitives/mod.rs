//! Operations over the BLS12-381 scalar field.
//!
//! # Acknowledgements
//!
//! _The following crates were used as a reference when implementing this crate. If code is very similar
//! to the reference, it is accompanied by a comment and link._
//!
//! * <https://github.com/celo-org/celo-threshold-bls-rs>: Operations over the BLS12-381 scalar field and threshold signing.
//! * <https://github.com/filecoin-project/blstrs> + <https://github.com/MystenLabs/fastcrypto>: Implementing operations over
//!   the BLS12-381 scalar field with <https://github.com/supranational/blst>.
//!
//! # Example
//!
//! ```rust
//! use beacon_cryptography::bls12381::primitives::{
//!     ops::{partial_sign_message, threshold_signature_recover_verified, verify_message},
//!     poly::{self, public},
//!     variant::MinPk,
//! };
//! use rand::rngs::OsRng;
//!
//! // Configure threshold
//! let (n, t) = (5, 3);
//!
//! // Generate a secret polynomial, its commitment, and shares
//! let secret = poly::new_from(t, None, &mut OsRng).unwrap();
//! let commitment = poly::Public::<MinPk>::commit(&secret);
//! let shares = secret.shares(n);
//!
//! // Generate partial signatures from shares
//! let namespace = Some(&b"demo"[..]);
//! let message = b"hello world";
//! let partials: Vec<_> = shares
//!     .iter()
//!     .map(|s| partial_sign_message::<MinPk>(s, namespace, message))
//!     .collect();
//!
//! // Verify and recover the threshold signature
//! let (signature, rejected) = threshold_signature_recover_verified::<_, MinPk>(
//!     &mut OsRng,
//!     &commitment,
//!     namespace,
//!     message,
//!     &partials,
//!     t,
//!     n,
//! )
//! .unwrap();
//! assert!(rejected.is_empty());
//!
//! // Verify threshold signature
//! verify_message::<MinPk>(public::<MinPk>(&commitment), namespace, message, &signature)
//!     .expect("signature should be valid");
//! ```

pub mod group;
pub mod ops;
pub mod poly;
pub mod variant;

use thiserror::Error;

/// Errors that can occur when working with BLS12-381 primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("not enough partial signatures: {1}/{0}")]
    NotEnoughPartialSignatures(usize, usize),
    #[error("polynomial length mismatch: {0} != {1}")]
    LengthMismatch(usize, usize),
    #[error("randomness unavailable")]
    RandomnessUnavailable,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid recovery")]
    InvalidRecovery,
    #[error("invalid index")]
    InvalidIndex,
    #[error("invalid threshold: t={0} n={1}")]
    InvalidThreshold(u32, u32),
    #[error("no inverse")]
    NoInverse,
}
