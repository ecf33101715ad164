//! Simulated Distributed Key Generation (DKG) for the BLS12-381 curve.
//!
//! Every participant acts as a dealer: it samples a random polynomial of degree `t - 1`
//! (a [Contribution]) and commits to it. The joint polynomial is the coefficient-wise sum of all
//! contributions, so its constant term (the group secret) is never chosen by any single dealer.
//! Each participant's joint share is the joint polynomial evaluated at the participant's 1-based
//! index, which is the same value as the sum of the individual shares it would have received
//! from each dealer.
//!
//! # Warning
//!
//! This is a simulation. All contributions are generated and combined in a single process, so the
//! joint polynomial is materialized in memory (and exposed by [Simulator::run] for testing). A
//! deployment that must keep the group secret hidden from every party needs an interactive DKG
//! (with share distribution over private channels and complaints against faulty dealers).
//!
//! # Example
//!
//! ```rust
//! use beacon_cryptography::bls12381::{
//!     dkg::Simulator,
//!     primitives::{ops::{partial_sign_message, threshold_signature_recover_verified}, variant::MinPk},
//! };
//! use rand::rngs::OsRng;
//!
//! // Generate a 3-of-5 group key
//! let simulator = Simulator::new(5, 3).unwrap();
//! let output = simulator.run::<_, MinPk>(&mut OsRng).unwrap();
//!
//! // Any 3 participants can sign
//! let partials: Vec<_> = output
//!     .shares
//!     .iter()
//!     .take(3)
//!     .map(|share| partial_sign_message::<MinPk>(share, None, b"hello"))
//!     .collect();
//! let (_, rejected) = threshold_signature_recover_verified::<_, MinPk>(
//!     &mut OsRng,
//!     &output.public,
//!     None,
//!     b"hello",
//!     &partials,
//!     3,
//!     5,
//! )
//! .unwrap();
//! assert!(rejected.is_empty());
//! ```

pub mod ops;
mod simulator;
pub use simulator::{Output, Simulator};

use crate::bls12381::primitives;
use thiserror::Error;

/// Errors that can occur while generating a group key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no participants")]
    NoParticipants,
    #[error("invalid threshold: t={0} n={1}")]
    InvalidThreshold(u32, u32),
    #[error("insufficient dealings")]
    InsufficientDealings,
    #[error("share does not match commitment: {0}")]
    ShareWrongCommitment(u32),
    #[error("recovered secret does not match joint polynomial")]
    SecretMismatch,
    #[error("primitives: {0}")]
    Primitives(#[from] primitives::Error),
}
