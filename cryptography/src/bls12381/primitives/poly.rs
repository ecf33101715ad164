//! Polynomial operations over the BLS12-381 scalar field.
//!
//! A polynomial of degree `t - 1` is used to split a secret (its constant term)
//! into shares, any `t` of which can recover the secret with Lagrange
//! interpolation. Shares are evaluations at `x = index` where `index` is the
//! 1-based position of a participant. `x = 0` is never evaluated for a participant
//! because it would reveal the constant term directly.
//!
//! # Warning
//!
//! The security of the polynomial operations is critical for the overall
//! security of the threshold schemes. Ensure that the scalar field operations
//! are performed over the correct field and that all elements are valid.

use crate::bls12381::primitives::{
    group::{self, Element, Scalar, Share},
    variant::Variant,
    Error,
};
use bytes::{Buf, BufMut};
use rand::RngCore;
use std::collections::{BTreeMap, BTreeSet};
use zeroize::Zeroize;

/// Private polynomials are used to generate secret shares.
pub type Private = Poly<group::Private>;

/// Public polynomials represent commitments to secrets on a private polynomial.
pub type Public<V> = Poly<<V as Variant>::Public>;

/// Signature polynomials are used in threshold signing (where a signature
/// is interpolated using at least `threshold` evaluations).
pub type Signature<V> = Poly<<V as Variant>::Signature>;

/// The partial signature type.
pub type PartialSignature<V> = Eval<<V as Variant>::Signature>;

/// A polynomial evaluation at a specific index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eval<C: Element> {
    pub index: u32,
    pub value: C,
}

impl<C: Element> Eval<C> {
    /// Canonically serializes the evaluation as `index (u32 big-endian) || value`.
    ///
    /// The index prefix allows a recipient to match a serialized partial signature
    /// to its signer without any side information.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::size());
        buf.put_u32(self.index);
        buf.put_slice(&self.value.serialize());
        buf
    }

    /// Deserializes a canonically encoded evaluation.
    pub fn deserialize(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::size() {
            return None;
        }
        let mut buf = bytes;
        let index = buf.get_u32();
        if index == 0 {
            return None;
        }
        let value = C::deserialize(buf)?;
        Some(Self { index, value })
    }

    /// Serialized size of an evaluation.
    pub fn size() -> usize {
        u32::BITS as usize / 8 + C::size()
    }
}

/// A polynomial that is using a scalar for the variable x and a generic
/// element for the coefficients.
///
/// The coefficients must be able to multiply the type of the variable,
/// which is always a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
// Reference: https://github.com/celo-org/celo-threshold-bls-rs/blob/a714310be76620e10e8797d6637df64011926430/crates/threshold-bls/src/poly.rs#L24-L28
pub struct Poly<C>(Vec<C>);

/// Returns a new scalar polynomial with `threshold` coefficients (degree `threshold - 1`).
///
/// The constant term is set to `secret` when provided, otherwise it is sampled at random.
/// All other coefficients are sampled at random from the provided RNG.
pub fn new_from<R: RngCore>(
    threshold: u32,
    secret: Option<Scalar>,
    rng: &mut R,
) -> Result<Poly<Scalar>, Error> {
    // Reference: https://github.com/celo-org/celo-threshold-bls-rs/blob/a714310be76620e10e8797d6637df64011926430/crates/threshold-bls/src/poly.rs#L46-L52
    if threshold == 0 {
        return Err(Error::InvalidThreshold(threshold, 0));
    }
    let mut coeffs = Vec::with_capacity(threshold as usize);
    coeffs.push(match secret {
        Some(secret) => secret,
        None => Scalar::try_from_rand(rng)?,
    });
    for _ in 1..threshold {
        coeffs.push(Scalar::try_from_rand(rng)?);
    }
    Ok(Poly(coeffs))
}

impl<C> Poly<C> {
    /// Creates a new polynomial from the given coefficients.
    pub fn from(c: Vec<C>) -> Self {
        Self(c)
    }

    /// Returns the constant term of the polynomial.
    pub fn constant(&self) -> &C {
        &self.0[0]
    }

    /// Returns the degree of the polynomial
    pub fn degree(&self) -> u32 {
        (self.0.len() - 1) as u32
    }

    /// Returns the number of required shares to reconstruct the polynomial.
    ///
    /// This will be the threshold
    pub fn required(&self) -> u32 {
        self.0.len() as u32
    }

    /// Returns the coefficients of the polynomial.
    pub fn coefficients(&self) -> &[C] {
        &self.0
    }
}

impl<C: Element> Poly<C> {
    /// Commits the scalar polynomial to the group and returns a polynomial over
    /// the group.
    ///
    /// This is done by multiplying each coefficient of the polynomial with the
    /// group's generator.
    pub fn commit(private: &Poly<Scalar>) -> Self {
        // Reference: https://github.com/celo-org/celo-threshold-bls-rs/blob/a714310be76620e10e8797d6637df64011926430/crates/threshold-bls/src/poly.rs#L322-L340
        let commits = private
            .0
            .iter()
            .map(|c| {
                let mut commitment = C::one();
                commitment.mul(c);
                commitment
            })
            .collect::<Vec<C>>();

        Poly::<C>::from(commits)
    }

    /// Returns the coefficient-wise sum of two polynomials with the same number of coefficients.
    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        if self.0.len() != other.0.len() {
            return Err(Error::LengthMismatch(self.0.len(), other.0.len()));
        }
        let coeffs = self
            .0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| {
                let mut sum = *a;
                sum.add(b);
                sum
            })
            .collect();
        Ok(Self(coeffs))
    }

    /// Evaluates the polynomial at `x = index`.
    pub fn evaluate(&self, index: u32) -> Eval<C> {
        // Reference: https://github.com/celo-org/celo-threshold-bls-rs/blob/a714310be76620e10e8797d6637df64011926430/crates/threshold-bls/src/poly.rs#L111-L129
        let xi = Scalar::from_u32(index);

        // Use Horner's method to evaluate the polynomial
        let value = self.0.iter().rev().fold(C::zero(), |mut sum, coeff| {
            sum.mul(&xi);
            sum.add(coeff);
            sum
        });
        Eval { index, value }
    }

    /// Recovers the constant term of a polynomial of degree less than `t` using at least `t` evaluations of the polynomial.
    ///
    /// Evaluations are deduplicated by index and the `t` lowest indices are used, so two invocations
    /// over the same set of evaluations select the same subset.
    ///
    /// # Warning
    ///
    /// This function assumes all evaluations are from the same polynomial. If they are not, the
    /// returned value is meaningless.
    pub fn recover<'a, I>(t: u32, evals: I) -> Result<C, Error>
    where
        C: 'a,
        I: IntoIterator<Item = &'a Eval<C>>,
    {
        let evals = prepare_evaluations(t, evals)?;
        let indices = evals.iter().map(|e| e.index).collect::<Vec<_>>();
        let weights = compute_weights(&indices)?;
        Self::recover_with_weights(&weights, evals)
    }

    /// Recovers the value at `x = 0` using precomputed Barycentric Weights.
    ///
    /// Every evaluation must have a weight.
    pub fn recover_with_weights<'a, I>(weights: &BTreeMap<u32, Weight>, evals: I) -> Result<C, Error>
    where
        C: 'a,
        I: IntoIterator<Item = &'a Eval<C>>,
    {
        let mut result = C::zero();
        for eval in evals {
            let weight = weights.get(&eval.index).ok_or(Error::InvalidIndex)?;

            // Scale the y-value by the precomputed weight
            let mut scaled = eval.value;
            scaled.mul(&weight.0);
            result.add(&scaled);
        }
        Ok(result)
    }
}

impl Poly<Scalar> {
    /// Evaluates the polynomial at indices `1..=n` (ascending) and returns the resulting shares.
    pub fn shares(&self, n: u32) -> Vec<Share> {
        (1..=n)
            .map(|index| {
                let eval = self.evaluate(index);
                Share {
                    index: eval.index,
                    private: eval.value,
                }
            })
            .collect()
    }
}

impl Zeroize for Poly<Scalar> {
    fn zeroize(&mut self) {
        self.0.iter_mut().for_each(|c| c.zeroize());
    }
}

/// Returns the public key of the polynomial (constant term).
pub fn public<V: Variant>(public: &Public<V>) -> &V::Public {
    public.constant()
}

/// A Barycentric Weight for interpolation at x=0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weight(Scalar);

impl Weight {
    /// Returns the weight as a scalar.
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

/// Computes Barycentric Weights (the Lagrange basis polynomials evaluated at `x = 0`) for a
/// given set of distinct, non-zero indices.
///
/// These weights can be reused for multiple interpolations with the same set of points.
pub fn compute_weights(indices: &[u32]) -> Result<BTreeMap<u32, Weight>, Error> {
    // Reference: https://github.com/celo-org/celo-threshold-bls-rs/blob/a714310be76620e10e8797d6637df64011926430/crates/threshold-bls/src/poly.rs#L131-L165
    let mut unique = BTreeSet::new();
    for &index in indices {
        if index == 0 || !unique.insert(index) {
            return Err(Error::InvalidIndex);
        }
    }

    let mut weights = BTreeMap::new();
    for &i in &unique {
        let xi = Scalar::from_u32(i);

        // `l_i(0) = product_{j != i} (xj / (xj - xi))`
        let (mut num, mut den) = (Scalar::one(), Scalar::one());
        for &j in &unique {
            if i == j {
                continue;
            }
            let xj = Scalar::from_u32(j);
            num.mul(&xj);
            let mut diff = xj;
            diff.sub(&xi);
            den.mul(&diff);
        }

        // Fails if den is zero (which cannot happen for distinct indices)
        let inv = den.inverse().ok_or(Error::NoInverse)?;
        num.mul(&inv);
        weights.insert(i, Weight(num));
    }
    Ok(weights)
}

/// Deduplicates evaluations by index, sorts them, and returns the `t` with the lowest indices.
pub fn prepare_evaluations<'a, C, I>(t: u32, evals: I) -> Result<Vec<&'a Eval<C>>, Error>
where
    C: Element + 'a,
    I: IntoIterator<Item = &'a Eval<C>>,
{
    let t = t as usize;
    let mut unique = BTreeMap::new();
    for eval in evals {
        if eval.index == 0 {
            return Err(Error::InvalidIndex);
        }
        unique.entry(eval.index).or_insert(eval);
    }
    if unique.len() < t {
        return Err(Error::NotEnoughPartialSignatures(t, unique.len()));
    }
    Ok(unique.into_values().take(t).collect())
}

/// Recovers the secret (constant term) from at least `threshold` of the `n` shares of a
/// private polynomial.
///
/// Shares with duplicate indices count once. Any share with an index outside of `1..=n`
/// is rejected.
pub fn recover_secret(shares: &[Share], threshold: u32, n: u32) -> Result<Scalar, Error> {
    if threshold == 0 || threshold > n {
        return Err(Error::InvalidThreshold(threshold, n));
    }
    let evals = shares
        .iter()
        .map(|share| {
            if share.index == 0 || share.index > n {
                return Err(Error::InvalidIndex);
            }
            Ok(Eval {
                index: share.index,
                value: share.private,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Poly::<Scalar>::recover(threshold, &evals)
}
