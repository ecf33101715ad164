//! Produce publicly verifiable randomness by threshold signing a chain of round messages.
//!
//! A group of `n` participants first runs a (simulated) distributed key generation to obtain shares
//! of a group secret. Each round, participants sign a message binding the round number to the previous
//! round's signature with their shares. Any `threshold` valid partial signatures are combined into
//! the unique group signature for that message, and the SHA-512 digest of that signature is the
//! round's randomness.
//!
//! Because BLS signatures are deterministic, the signature (and so the randomness) of each round is
//! fixed by the group key and the previous round, independent of which participants contributed.
//! Nobody can predict it without the cooperation of `threshold` participants, and anyone holding
//! the group public key can verify it.
//!
//! # Example
//!
//! ```rust
//! use beacon::{Beacon, ChainConfig, Honest, Participant};
//! use beacon_cryptography::bls12381::{dkg::Simulator, primitives::{poly, variant::MinPk}};
//! use rand::rngs::OsRng;
//!
//! // Generate a 3-of-5 group key
//! let output = Simulator::new(5, 3).unwrap().run::<_, MinPk>(&mut OsRng).unwrap();
//! let public = *poly::public::<MinPk>(&output.public);
//! let participants = output
//!     .shares
//!     .into_iter()
//!     .map(|share| Box::new(Honest::new(share)) as Box<dyn Participant<MinPk>>)
//!     .collect();
//!
//! // Seed the chain and produce a round
//! let mut beacon = Beacon::new(ChainConfig::default(), output.public, participants).unwrap();
//! beacon.seed().unwrap();
//! let previous = *beacon.seed_signature().unwrap();
//! let round = beacon.next_round().unwrap().clone();
//! assert_eq!(round.round, 1);
//! Beacon::<MinPk>::verify_round(&public, None, &previous, &round).unwrap();
//! ```

use beacon_cryptography::bls12381::{dkg, primitives};
use thiserror::Error;

pub mod chain;
pub mod config;
pub mod driver;
pub mod sink;

pub use chain::{
    round_message, Beacon, Config as ChainConfig, Honest, Offline, Participant, Randomness, Round,
    Status,
};
pub use config::Config;
pub use sink::{Format, Sink};

/// Errors that can occur while running the beacon.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unable to read config: {0}")]
    ConfigRead(std::io::Error),
    #[error("unable to parse config: {0}")]
    ConfigFile(#[from] serde_yaml::Error),
    #[error("dkg failed: {0}")]
    Dkg(#[from] dkg::Error),
    #[error("unable to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("beacon not seeded")]
    NotSeeded,
    #[error("beacon already seeded")]
    AlreadySeeded,
    #[error("unable to sign seed: {0}")]
    Seed(primitives::Error),
    #[error("round {round} failed: {source}")]
    Round {
        round: u64,
        source: primitives::Error,
    },
    #[error("round {0} does not extend the chain")]
    InvalidRound(u64),
    #[error("unable to write output: {0}")]
    Sink(#[from] std::io::Error),
    #[error("unable to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
