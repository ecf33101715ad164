//! Run a beacon end-to-end: key generation, seeding, and a fixed number of round attempts.

use crate::{
    chain::{Beacon, Honest, Offline, Participant, Round},
    config::Config,
    sink::Sink,
    Error,
};
use beacon_cryptography::bls12381::{
    dkg::Simulator,
    primitives::{group::Element, poly, variant::Variant},
};
use beacon_utils::hex;
use rand::RngCore;
use tracing::{error, info, warn};

/// Outcome of a completed run.
#[derive(Debug)]
pub struct Summary<V: Variant> {
    /// Number of rounds produced.
    pub produced: u64,

    /// Number of round attempts that did not reach a quorum.
    pub failed: u64,

    /// Group public key that verifies every round.
    pub public: V::Public,

    /// Produced rounds (ascending).
    pub history: Vec<Round<V>>,

    /// Error that stopped the run before every round was attempted.
    pub halted: Option<Error>,
}

/// Generates a group key, seeds a beacon, and attempts `config.rounds` rounds, appending each
/// produced round to `config.output`.
///
/// A round that does not reach a quorum is logged and retried by the next attempt. Failing to
/// write output stops the run: the rounds produced so far (including the one that could not be
/// written) are returned with [Summary::halted] set.
pub fn run<R: RngCore, V: Variant>(config: &Config, rng: &mut R) -> Result<Summary<V>, Error> {
    run_with_sink(config, rng, |config| {
        Sink::open(&config.output, config.format)
    })
}

fn run_with_sink<R, V, F>(config: &Config, rng: &mut R, open: F) -> Result<Summary<V>, Error>
where
    R: RngCore,
    V: Variant,
    F: FnOnce(&Config) -> Result<Sink, Error>,
{
    config.validate()?;

    // Generate group key
    let simulator = Simulator::new(config.participants, config.threshold)?;
    let output = simulator.run::<_, V>(rng)?;
    let public = *poly::public::<V>(&output.public);
    info!(
        participants = config.participants,
        threshold = config.threshold,
        public = %hex(&public.serialize()),
        "generated group key"
    );

    // Assign shares to participants
    let offline = config.offline();
    if !offline.is_empty() {
        info!(?offline, "simulating offline participants");
    }
    let participants = output
        .shares
        .into_iter()
        .map(|share| {
            if offline.contains(&share.index) {
                Box::new(Offline::new(share.index)) as Box<dyn Participant<V>>
            } else {
                Box::new(Honest::new(share)) as Box<dyn Participant<V>>
            }
        })
        .collect();

    // Seed the chain
    let mut beacon = Beacon::new(config.into(), output.public, participants)?;
    beacon.seed()?;
    info!(seed = %config.seed_message, "seeded beacon");

    // Produce rounds
    let mut sink = match open(config) {
        Ok(sink) => sink,
        Err(err) => {
            error!(output = ?config.output, ?err, "unable to open output");
            return Err(err);
        }
    };
    let mut failed = 0;
    let mut halted = None;
    for attempt in 1..=config.rounds {
        let (round, randomness) = match beacon.next_round() {
            Ok(round) => (round.round, round.randomness),
            Err(err) => {
                failed += 1;
                warn!(attempt, ?err, "round failed");
                continue;
            }
        };
        info!(
            round,
            randomness = %randomness,
            value = randomness.as_f64(),
            "produced randomness"
        );
        if let Err(err) = sink.record(round, &randomness) {
            error!(round, ?err, "unable to write output");
            halted = Some(err);
            break;
        }
    }
    let history = beacon.history().to_vec();
    Ok(Summary {
        produced: history.len() as u64,
        failed,
        public,
        history,
        halted,
    })
}
