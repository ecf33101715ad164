//! Chain of threshold-signed rounds.
//!
//! The chain moves through three states ([Status]): it is created `Uninitialized`, becomes `Seeded`
//! once the group signs the seed message, and is `Running` after the first round is appended.
//! Round `j` signs `j (u64 big-endian) || signature_{j-1}` where `signature_0` is the signature over
//! the seed message. A round that cannot gather a quorum of valid partial signatures is not appended
//! and the next attempt retries the same round number.

use crate::Error;
use beacon_cryptography::{
    bls12381::primitives::{
        group::{Element, Share},
        ops::{partial_sign_message, threshold_signature_recover_verified, verify_message},
        poly::{self, PartialSignature},
        variant::Variant,
        Error as PrimitivesError,
    },
    sha512::{self, Digest},
};
use bytes::{Buf, BufMut};
use rand::thread_rng;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use std::{fmt::Display, mem::size_of};
use tracing::{debug, warn};

/// Message signed to produce `signature_0` when none is configured.
pub const DEFAULT_SEED_MESSAGE: &[u8] = b"initial seed";

/// Configuration for a [Beacon].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of valid partial signatures required to produce a round.
    pub threshold: u32,

    /// Message signed to seed the chain.
    pub seed_message: Vec<u8>,

    /// Namespace applied to every signed message.
    pub namespace: Option<Vec<u8>>,

    /// Number of threads used to collect partial signatures (`1` signs on the calling thread).
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 3,
            seed_message: DEFAULT_SEED_MESSAGE.to_vec(),
            namespace: None,
            concurrency: 1,
        }
    }
}

/// Lifecycle of a [Beacon].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Uninitialized,
    Seeded,
    Running,
}

/// A member of the group that can contribute partial signatures.
pub trait Participant<V: Variant>: Send + Sync {
    /// The 1-based index of the participant's share.
    fn index(&self) -> u32;

    /// Returns a partial signature over `message` (or `None` if the participant does not sign).
    fn sign(&self, namespace: Option<&[u8]>, message: &[u8]) -> Option<PartialSignature<V>>;
}

/// A participant that always signs with its share.
///
/// The share is zeroized when the participant is dropped.
pub struct Honest {
    share: Share,
}

impl Honest {
    pub fn new(share: Share) -> Self {
        Self { share }
    }
}

impl<V: Variant> Participant<V> for Honest {
    fn index(&self) -> u32 {
        self.share.index
    }

    fn sign(&self, namespace: Option<&[u8]>, message: &[u8]) -> Option<PartialSignature<V>> {
        Some(partial_sign_message::<V>(&self.share, namespace, message))
    }
}

/// A participant that never signs.
#[derive(Clone, Copy, Debug)]
pub struct Offline {
    index: u32,
}

impl Offline {
    pub fn new(index: u32) -> Self {
        Self { index }
    }
}

impl<V: Variant> Participant<V> for Offline {
    fn index(&self) -> u32 {
        self.index
    }

    fn sign(&self, _: Option<&[u8]>, _: &[u8]) -> Option<PartialSignature<V>> {
        None
    }
}

/// Uniform randomness extracted from a round signature (SHA-512 of its canonical encoding).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Randomness(Digest);

impl Randomness {
    /// Derives randomness from a signature.
    pub fn from_signature<V: Variant>(signature: &V::Signature) -> Self {
        Self(sha512::hash(&signature.serialize()))
    }

    /// Maps the first 8 bytes (big-endian) to a uniformly distributed `f64` in `[0, 1)`.
    pub fn as_f64(&self) -> f64 {
        let mut buf = self.0.as_ref();
        let value = buf.get_u64();
        (value >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns the hex encoding of the randomness.
    pub fn hex(&self) -> String {
        self.0.to_string()
    }
}

impl From<Digest> for Randomness {
    fn from(digest: Digest) -> Self {
        Self(digest)
    }
}

impl AsRef<[u8]> for Randomness {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Display for Randomness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A produced round of the beacon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round<V: Variant> {
    pub round: u64,
    pub message: Vec<u8>,
    pub signature: V::Signature,
    pub randomness: Randomness,
}

/// Builds the message signed in `round`: `round (u64 big-endian) || previous signature`.
pub fn round_message<V: Variant>(round: u64, previous: &V::Signature) -> Vec<u8> {
    let previous = previous.serialize();
    let mut message = Vec::with_capacity(size_of::<u64>() + previous.len());
    message.put_u64(round);
    message.extend_from_slice(&previous);
    message
}

/// A chain of threshold-signed rounds.
pub struct Beacon<V: Variant> {
    cfg: Config,
    public: poly::Public<V>,
    participants: Vec<Box<dyn Participant<V>>>,
    pool: Option<ThreadPool>,

    seed: Option<V::Signature>,
    rounds: Vec<Round<V>>,
}

impl<V: Variant> Beacon<V> {
    /// Creates an `Uninitialized` beacon for the group committed to by `public`.
    pub fn new(
        cfg: Config,
        public: poly::Public<V>,
        participants: Vec<Box<dyn Participant<V>>>,
    ) -> Result<Self, Error> {
        let n = participants.len();
        if cfg.threshold == 0 || cfg.threshold as usize > n {
            return Err(Error::InvalidConfig(format!(
                "threshold {} not in 1..={}",
                cfg.threshold, n
            )));
        }
        if public.required() != cfg.threshold {
            return Err(Error::InvalidConfig(format!(
                "public polynomial requires {} shares but threshold is {}",
                public.required(),
                cfg.threshold
            )));
        }
        if cfg.concurrency == 0 {
            return Err(Error::InvalidConfig("concurrency must be positive".into()));
        }
        let mut indices = participants.iter().map(|p| p.index()).collect::<Vec<_>>();
        indices.sort_unstable();
        if indices.into_iter().ne(1..=n as u32) {
            return Err(Error::InvalidConfig(format!(
                "participant indices must be exactly 1..={}",
                n
            )));
        }
        let pool = match cfg.concurrency {
            1 => None,
            threads => Some(ThreadPoolBuilder::new().num_threads(threads).build()?),
        };
        Ok(Self {
            cfg,
            public,
            participants,
            pool,
            seed: None,
            rounds: Vec::new(),
        })
    }

    /// Returns the current lifecycle state.
    pub fn status(&self) -> Status {
        match (&self.seed, self.rounds.is_empty()) {
            (None, _) => Status::Uninitialized,
            (Some(_), true) => Status::Seeded,
            (Some(_), false) => Status::Running,
        }
    }

    /// Returns the group public key.
    pub fn public(&self) -> &V::Public {
        poly::public::<V>(&self.public)
    }

    /// Returns the signature over the seed message, if the chain is seeded.
    pub fn seed_signature(&self) -> Option<&V::Signature> {
        self.seed.as_ref()
    }

    /// Returns all produced rounds (ascending).
    pub fn history(&self) -> &[Round<V>] {
        &self.rounds
    }

    /// Returns the most recently produced round.
    pub fn latest(&self) -> Option<&Round<V>> {
        self.rounds.last()
    }

    /// Signs the seed message with the group, producing `signature_0`.
    pub fn seed(&mut self) -> Result<(), Error> {
        if self.seed.is_some() {
            return Err(Error::AlreadySeeded);
        }
        let message = self.cfg.seed_message.clone();
        let signature = self.sign(0, &message).map_err(Error::Seed)?;
        debug!("seeded beacon");
        self.seed = Some(signature);
        Ok(())
    }

    /// Produces the next round.
    ///
    /// If a quorum of valid partial signatures cannot be collected, the chain is left unchanged and
    /// the next call retries the same round.
    pub fn next_round(&mut self) -> Result<&Round<V>, Error> {
        let previous = match self.rounds.last() {
            Some(round) => round.signature,
            None => self.seed.ok_or(Error::NotSeeded)?,
        };
        let round = self.rounds.len() as u64 + 1;
        let message = round_message::<V>(round, &previous);
        let signature = self
            .sign(round, &message)
            .map_err(|source| Error::Round { round, source })?;
        let randomness = Randomness::from_signature::<V>(&signature);

        // Append the round
        let index = self.rounds.len();
        self.rounds.push(Round {
            round,
            message,
            signature,
            randomness,
        });
        Ok(&self.rounds[index])
    }

    /// Verifies that `round` is the valid successor of `previous` under the group public key.
    pub fn verify_round(
        public: &V::Public,
        namespace: Option<&[u8]>,
        previous: &V::Signature,
        round: &Round<V>,
    ) -> Result<(), Error> {
        if round.message != round_message::<V>(round.round, previous) {
            return Err(Error::InvalidRound(round.round));
        }
        verify_message::<V>(public, namespace, &round.message, &round.signature).map_err(
            |source| Error::Round {
                round: round.round,
                source,
            },
        )?;
        if round.randomness != Randomness::from_signature::<V>(&round.signature) {
            return Err(Error::InvalidRound(round.round));
        }
        Ok(())
    }

    /// Collects partial signatures over `message` and recovers the group signature.
    fn sign(&self, round: u64, message: &[u8]) -> Result<V::Signature, PrimitivesError> {
        let namespace = self.cfg.namespace.as_deref();
        let participants = &self.participants;
        let partials: Vec<_> = match &self.pool {
            Some(pool) => pool.install(|| {
                participants
                    .par_iter()
                    .filter_map(|p| p.sign(namespace, message))
                    .collect()
            }),
            None => participants
                .iter()
                .filter_map(|p| p.sign(namespace, message))
                .collect(),
        };
        debug!(round, partials = partials.len(), "collected partial signatures");

        // Recover the group signature from valid partials
        let (signature, rejected) = threshold_signature_recover_verified::<_, V>(
            &mut thread_rng(),
            &self.public,
            namespace,
            message,
            &partials,
            self.cfg.threshold,
            participants.len() as u32,
        )?;
        if !rejected.is_empty() {
            warn!(round, invalid = ?rejected, "dropped invalid partial signatures");
        }
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_cryptography::bls12381::{
        dkg::Simulator,
        primitives::{
            group::{Scalar, G2},
            ops::sign_message,
            variant::{MinPk, MinSig},
        },
    };
    use beacon_utils::{test_rng, test_rng_seeded};
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    /// A participant that can be switched on and off.
    struct Switch {
        share: Share,
        online: Arc<AtomicBool>,
    }

    impl<V: Variant> Participant<V> for Switch {
        fn index(&self) -> u32 {
            self.share.index
        }

        fn sign(&self, namespace: Option<&[u8]>, message: &[u8]) -> Option<PartialSignature<V>> {
            if !self.online.load(Ordering::SeqCst) {
                return None;
            }
            Some(partial_sign_message::<V>(&self.share, namespace, message))
        }
    }

    /// A participant that signs with a share it does not hold.
    struct Corrupt {
        index: u32,
    }

    impl<V: Variant> Participant<V> for Corrupt {
        fn index(&self) -> u32 {
            self.index
        }

        fn sign(&self, namespace: Option<&[u8]>, message: &[u8]) -> Option<PartialSignature<V>> {
            let share = Share {
                index: self.index,
                private: Scalar::from_rand(&mut test_rng()),
            };
            Some(partial_sign_message::<V>(&share, namespace, message))
        }
    }

    fn dkg<V: Variant>(n: u32, t: u32, seed: u64) -> (poly::Public<V>, Vec<Share>) {
        let output = Simulator::new(n, t)
            .unwrap()
            .run::<_, V>(&mut test_rng_seeded(seed))
            .unwrap();
        (output.public, output.shares)
    }

    fn honest<V: Variant>(shares: &[Share]) -> Vec<Box<dyn Participant<V>>> {
        shares
            .iter()
            .map(|share| Box::new(Honest::new(share.clone())) as Box<dyn Participant<V>>)
            .collect()
    }

    /// Number of differing bits between two outputs.
    fn hamming(a: &Randomness, b: &Randomness) -> u32 {
        a.as_ref()
            .iter()
            .zip(b.as_ref())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum()
    }

    fn config(threshold: u32) -> Config {
        Config {
            threshold,
            ..Default::default()
        }
    }

    fn lifecycle<V: Variant>() {
        let (public, shares) = dkg::<V>(5, 3, 0);
        let mut beacon = Beacon::new(config(3), public, honest::<V>(&shares)).unwrap();
        assert_eq!(beacon.status(), Status::Uninitialized);
        assert!(matches!(beacon.next_round(), Err(Error::NotSeeded)));

        beacon.seed().unwrap();
        assert_eq!(beacon.status(), Status::Seeded);
        assert!(matches!(beacon.seed(), Err(Error::AlreadySeeded)));

        // Produce rounds and verify each against its predecessor
        for expected in 1..=5 {
            let round = beacon.next_round().unwrap();
            assert_eq!(round.round, expected);
        }
        assert_eq!(beacon.status(), Status::Running);
        let public = *beacon.public();
        let mut previous = *beacon.seed_signature().unwrap();
        for round in beacon.history() {
            Beacon::<V>::verify_round(&public, None, &previous, round).unwrap();
            previous = round.signature;
        }
        assert_eq!(beacon.latest().unwrap().round, 5);
    }

    #[test]
    fn test_lifecycle() {
        lifecycle::<MinPk>();
        lifecycle::<MinSig>();
    }

    #[test]
    fn test_seed_signs_initial_seed() {
        let (public, shares) = dkg::<MinPk>(5, 3, 0);
        let group = *poly::public::<MinPk>(&public);
        let mut beacon = Beacon::new(config(3), public, honest::<MinPk>(&shares)).unwrap();
        beacon.seed().unwrap();
        verify_message::<MinPk>(
            &group,
            None,
            b"initial seed",
            beacon.seed_signature().unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_round_message_layout() {
        let (public, shares) = dkg::<MinPk>(3, 2, 0);
        let mut beacon = Beacon::new(config(2), public, honest::<MinPk>(&shares)).unwrap();
        beacon.seed().unwrap();
        let seed = *beacon.seed_signature().unwrap();
        let round = beacon.next_round().unwrap();
        assert_eq!(round.message.len(), 8 + G2::size());
        assert_eq!(round.message[..8], 1u64.to_be_bytes());
        assert_eq!(round.message[8..], seed.serialize());
    }

    #[test]
    fn test_chain_independent_of_signers() {
        let (public, shares) = dkg::<MinPk>(5, 3, 1);

        // All participants sign
        let mut full = Beacon::new(config(3), public.clone(), honest::<MinPk>(&shares)).unwrap();

        // Only participants {2, 4, 5} sign
        let partial = shares
            .iter()
            .map(|share| match share.index {
                1 | 3 => Box::new(Offline::new(share.index)) as Box<dyn Participant<MinPk>>,
                _ => Box::new(Honest::new(share.clone())) as Box<dyn Participant<MinPk>>,
            })
            .collect();
        let mut partial = Beacon::new(config(3), public, partial).unwrap();

        full.seed().unwrap();
        partial.seed().unwrap();
        for _ in 0..3 {
            full.next_round().unwrap();
            partial.next_round().unwrap();
        }
        assert_eq!(full.history(), partial.history());
    }

    #[test]
    fn test_concurrency_matches_sequential() {
        let (public, shares) = dkg::<MinPk>(7, 4, 2);
        let mut sequential =
            Beacon::new(config(4), public.clone(), honest::<MinPk>(&shares)).unwrap();
        let mut concurrent = Beacon::new(
            Config {
                concurrency: 4,
                ..config(4)
            },
            public,
            honest::<MinPk>(&shares),
        )
        .unwrap();
        sequential.seed().unwrap();
        concurrent.seed().unwrap();
        for _ in 0..2 {
            sequential.next_round().unwrap();
            concurrent.next_round().unwrap();
        }
        assert_eq!(sequential.history(), concurrent.history());
    }

    #[test]
    fn test_avalanche() {
        // Chains seeded with messages differing in a single bit
        let (public, shares) = dkg::<MinPk>(5, 3, 3);
        let mut a = Beacon::new(
            Config {
                seed_message: b"initial seed".to_vec(),
                ..config(3)
            },
            public.clone(),
            honest::<MinPk>(&shares),
        )
        .unwrap();
        let mut b = Beacon::new(
            Config {
                seed_message: b"initial seee".to_vec(),
                ..config(3)
            },
            public,
            honest::<MinPk>(&shares),
        )
        .unwrap();
        a.seed().unwrap();
        b.seed().unwrap();
        let a = a.next_round().unwrap().randomness;
        let b = b.next_round().unwrap().randomness;
        let distance = hamming(&a, &b);
        assert!((160..=352).contains(&distance), "distance={distance}");
    }

    #[test]
    fn test_avalanche_round_inputs() {
        let output = Simulator::new(5, 3)
            .unwrap()
            .run::<_, MinPk>(&mut test_rng_seeded(5))
            .unwrap();
        let secret = *output.private().constant();
        let previous = sign_message::<MinPk>(&secret, None, DEFAULT_SEED_MESSAGE);
        let randomness = |message: &[u8]| {
            Randomness::from_signature::<MinPk>(&sign_message::<MinPk>(&secret, None, message))
        };
        let base = randomness(&round_message::<MinPk>(7, &previous));

        // Round number incremented
        let next = randomness(&round_message::<MinPk>(8, &previous));
        let distance = hamming(&base, &next);
        assert!((160..=352).contains(&distance), "distance={distance}");

        // Single bit of the previous signature flipped
        let prefix = size_of::<u64>();
        let length = round_message::<MinPk>(7, &previous).len();
        for byte in [prefix, prefix + 47, length - 1] {
            let mut message = round_message::<MinPk>(7, &previous);
            message[byte] ^= 0x10;
            let flipped = randomness(&message);
            let distance = hamming(&base, &flipped);
            assert!((160..=352).contains(&distance), "byte={byte} distance={distance}");
        }
    }

    #[test]
    fn test_stalled_round_is_retried() {
        let (public, shares) = dkg::<MinPk>(5, 3, 4);
        let online = Arc::new(AtomicBool::new(true));
        let participants = shares
            .iter()
            .map(|share| match share.index {
                1..=3 => Box::new(Switch {
                    share: share.clone(),
                    online: online.clone(),
                }) as Box<dyn Participant<MinPk>>,
                _ => Box::new(Honest::new(share.clone())) as Box<dyn Participant<MinPk>>,
            })
            .collect();
        let mut beacon = Beacon::new(config(3), public, participants).unwrap();
        beacon.seed().unwrap();
        beacon.next_round().unwrap();

        // Only 2 participants remain online
        online.store(false, Ordering::SeqCst);
        for _ in 0..2 {
            match beacon.next_round() {
                Err(Error::Round { round, source }) => {
                    assert_eq!(round, 2);
                    assert_eq!(source, PrimitivesError::NotEnoughPartialSignatures(3, 2));
                }
                _ => panic!("round should stall"),
            }
            assert_eq!(beacon.history().len(), 1);
        }

        // Recovering participants resume the same round
        online.store(true, Ordering::SeqCst);
        assert_eq!(beacon.next_round().unwrap().round, 2);
        assert_eq!(beacon.status(), Status::Running);
    }

    #[test]
    fn test_seed_without_quorum() {
        let (public, shares) = dkg::<MinPk>(3, 3, 5);
        let participants = shares
            .iter()
            .map(|share| match share.index {
                2 => Box::new(Offline::new(2)) as Box<dyn Participant<MinPk>>,
                _ => Box::new(Honest::new(share.clone())) as Box<dyn Participant<MinPk>>,
            })
            .collect();
        let mut beacon = Beacon::new(config(3), public, participants).unwrap();
        assert!(matches!(
            beacon.seed(),
            Err(Error::Seed(PrimitivesError::NotEnoughPartialSignatures(3, 2)))
        ));
        assert_eq!(beacon.status(), Status::Uninitialized);
    }

    #[test]
    fn test_corrupt_participant_excluded() {
        let (public, shares) = dkg::<MinPk>(5, 3, 6);
        let participants = shares
            .iter()
            .map(|share| match share.index {
                1 => Box::new(Corrupt { index: 1 }) as Box<dyn Participant<MinPk>>,
                _ => Box::new(Honest::new(share.clone())) as Box<dyn Participant<MinPk>>,
            })
            .collect();
        let mut reference = Beacon::new(config(3), public.clone(), honest::<MinPk>(&shares)).unwrap();
        let mut beacon = Beacon::new(config(3), public, participants).unwrap();
        reference.seed().unwrap();
        beacon.seed().unwrap();
        let expected = reference.next_round().unwrap().clone();
        assert_eq!(*beacon.next_round().unwrap(), expected);
    }

    #[test]
    fn test_verify_round_rejects_tampering() {
        let (public, shares) = dkg::<MinPk>(4, 3, 7);
        let mut beacon = Beacon::new(config(3), public, honest::<MinPk>(&shares)).unwrap();
        beacon.seed().unwrap();
        let first = beacon.next_round().unwrap().clone();
        let second = beacon.next_round().unwrap().clone();
        let public = *beacon.public();

        // Wrong predecessor
        assert!(matches!(
            Beacon::<MinPk>::verify_round(&public, None, &second.signature, &second),
            Err(Error::InvalidRound(2))
        ));

        // Wrong namespace
        assert!(matches!(
            Beacon::<MinPk>::verify_round(&public, Some(b"other"), &first.signature, &second),
            Err(Error::Round { round: 2, .. })
        ));

        // Substituted randomness
        let mut forged = second.clone();
        forged.randomness = first.randomness;
        assert!(matches!(
            Beacon::<MinPk>::verify_round(&public, None, &first.signature, &forged),
            Err(Error::InvalidRound(2))
        ));
    }

    #[test]
    fn test_namespace() {
        let (public, shares) = dkg::<MinPk>(3, 2, 8);
        let mut beacon = Beacon::new(
            Config {
                namespace: Some(b"beacon".to_vec()),
                ..config(2)
            },
            public,
            honest::<MinPk>(&shares),
        )
        .unwrap();
        beacon.seed().unwrap();
        let seed = *beacon.seed_signature().unwrap();
        let round = beacon.next_round().unwrap().clone();
        let public = *beacon.public();
        Beacon::<MinPk>::verify_round(&public, Some(b"beacon"), &seed, &round).unwrap();
    }

    #[test]
    fn test_new_rejects_invalid() {
        let (public, shares) = dkg::<MinPk>(5, 3, 9);
        assert!(matches!(
            Beacon::new(config(3), public.clone(), honest::<MinPk>(&shares[..2])),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Beacon::new(config(4), public.clone(), honest::<MinPk>(&shares)),
            Err(Error::InvalidConfig(_))
        ));
        let duplicated = [1, 1, 3]
            .into_iter()
            .map(|index| Box::new(Offline::new(index)) as Box<dyn Participant<MinPk>>)
            .collect();
        assert!(matches!(
            Beacon::new(config(3), public.clone(), duplicated),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            Beacon::new(
                Config {
                    concurrency: 0,
                    ..config(3)
                },
                public,
                honest::<MinPk>(&shares)
            ),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_as_f64() {
        let zero = Randomness::from(Digest::from([0u8; sha512::DIGEST_LENGTH]));
        assert_eq!(zero.as_f64(), 0.0);
        let max = Randomness::from(Digest::from([0xffu8; sha512::DIGEST_LENGTH]));
        assert!(max.as_f64() < 1.0);
        let mut half = [0u8; sha512::DIGEST_LENGTH];
        half[0] = 0x80;
        assert_eq!(Randomness::from(Digest::from(half)).as_f64(), 0.5);

        // Values from real signatures fall in range
        let (public, shares) = dkg::<MinPk>(3, 2, 10);
        let mut beacon = Beacon::new(config(2), public, honest::<MinPk>(&shares)).unwrap();
        beacon.seed().unwrap();
        for _ in 0..10 {
            let value = beacon.next_round().unwrap().randomness.as_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_randomness_hex() {
        let randomness = Randomness::from(Digest::from([0xabu8; sha512::DIGEST_LENGTH]));
        assert_eq!(randomness.hex(), "ab".repeat(sha512::DIGEST_LENGTH));
        assert_eq!(randomness.to_string(), randomness.hex());
    }
}
