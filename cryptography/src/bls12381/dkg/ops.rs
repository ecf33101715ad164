//! Stateless operations useful in a DKG procedure.

use crate::bls12381::{
    dkg::Error,
    primitives::{
        group::Share,
        poly::{self, new_from},
        variant::Variant,
    },
};
use rand::RngCore;

/// A dealer's secret polynomial and its public commitment.
#[derive(Clone)]
pub struct Contribution<V: Variant> {
    pub private: poly::Private,
    pub commitment: poly::Public<V>,
}

/// Generates a fresh random polynomial with `t` coefficients and commits to it.
pub fn contribute<R: RngCore, V: Variant>(rng: &mut R, t: u32) -> Result<Contribution<V>, Error> {
    let private = new_from(t, None, rng)?;
    let commitment = poly::Public::<V>::commit(&private);
    Ok(Contribution {
        private,
        commitment,
    })
}

/// Construct the joint private polynomial by summing all contributed polynomials.
pub fn construct_private<'a, V, I>(contributions: I) -> Result<poly::Private, Error>
where
    V: Variant,
    I: IntoIterator<Item = &'a Contribution<V>>,
{
    let mut contributions = contributions.into_iter();
    let first = contributions.next().ok_or(Error::InsufficientDealings)?;
    let mut private = first.private.clone();
    for contribution in contributions {
        private = private.add(&contribution.private)?;
    }
    Ok(private)
}

/// Construct the joint public polynomial by summing all commitments.
pub fn construct_public<'a, V, I>(commitments: I) -> Result<poly::Public<V>, Error>
where
    V: Variant,
    I: IntoIterator<Item = &'a poly::Public<V>>,
{
    let mut commitments = commitments.into_iter();
    let first = commitments.next().ok_or(Error::InsufficientDealings)?;
    let mut public = first.clone();
    for commitment in commitments {
        public = public.add(commitment)?;
    }
    Ok(public)
}

/// Verify that a given share is on the committed polynomial.
pub fn verify_share<V: Variant>(commitment: &poly::Public<V>, share: &Share) -> Result<(), Error> {
    if share.index == 0 {
        return Err(Error::ShareWrongCommitment(share.index));
    }
    let expected = share.public::<V>();
    let given = commitment.evaluate(share.index);
    if given.value != expected {
        return Err(Error::ShareWrongCommitment(share.index));
    }
    Ok(())
}
