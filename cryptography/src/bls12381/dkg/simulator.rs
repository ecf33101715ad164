use super::{ops, Error};
use crate::bls12381::primitives::{
    group::Share,
    poly::{self, recover_secret},
    variant::Variant,
};
use rand::RngCore;

/// Parameters of a simulated DKG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Simulator {
    n: u32,
    t: u32,
}

/// The result of a successful DKG.
pub struct Output<V: Variant> {
    /// Joint public polynomial (its constant term is the group public key).
    pub public: poly::Public<V>,

    /// Joint shares, one per participant (ascending by index, starting at 1).
    pub shares: Vec<Share>,

    private: poly::Private,
}

impl<V: Variant> Output<V> {
    /// Returns the joint private polynomial.
    ///
    /// Only a simulation can expose this value. Use it to check properties of the
    /// shares, never to sign.
    pub fn private(&self) -> &poly::Private {
        &self.private
    }
}

impl Simulator {
    /// Creates a simulator for `n` participants with threshold `t`.
    pub fn new(n: u32, t: u32) -> Result<Self, Error> {
        if n == 0 {
            return Err(Error::NoParticipants);
        }
        if t == 0 || t > n {
            return Err(Error::InvalidThreshold(t, n));
        }
        Ok(Self { n, t })
    }

    /// Returns the number of participants.
    pub fn participants(&self) -> u32 {
        self.n
    }

    /// Returns the threshold.
    pub fn threshold(&self) -> u32 {
        self.t
    }

    /// Runs the DKG: every participant contributes a random polynomial, contributions are
    /// summed into the joint polynomial, and each joint share is checked against the joint
    /// commitment.
    pub fn run<R: RngCore, V: Variant>(&self, rng: &mut R) -> Result<Output<V>, Error> {
        // Collect contributions from all dealers
        let mut contributions = Vec::with_capacity(self.n as usize);
        for _ in 0..self.n {
            contributions.push(ops::contribute::<_, V>(rng, self.t)?);
        }

        // Combine contributions
        let private = ops::construct_private(&contributions)?;
        let public = ops::construct_public::<V, _>(contributions.iter().map(|c| &c.commitment))?;

        // Derive and verify joint shares
        let shares = private.shares(self.n);
        for share in &shares {
            ops::verify_share::<V>(&public, share)?;
        }

        // Ensure the lowest threshold of shares recovers the joint secret
        let recovered = recover_secret(&shares[..self.t as usize], self.t, self.n)?;
        if recovered != *private.constant() {
            return Err(Error::SecretMismatch);
        }
        Ok(Output {
            public,
            shares,
            private,
        })
    }
}
