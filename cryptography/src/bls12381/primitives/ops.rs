//! Digital signatures over the BLS12-381 curve.
//!
//! Signing hashes the (optionally namespaced) message to the signature group of the
//! chosen [Variant] and multiplies the result by the private scalar. Signatures are
//! deterministic: signing the same message with the same key always produces the
//! same signature.
//!
//! # Threshold Signatures
//!
//! Each participant signs with its [Share] to produce a [PartialSignature] tagged with
//! the share's index. Any `threshold` valid partial signatures over the same message
//! can be interpolated (in the signature group) into the signature that signing with
//! the (never reconstructed) group secret would have produced.

use super::{
    group::{self, Element, Point, Scalar, Share, DST},
    poly::{self, compute_weights, prepare_evaluations, Eval, PartialSignature},
    variant::Variant,
    Error,
};
use beacon_utils::union_unique;
use rand::{CryptoRng, RngCore};
use std::{borrow::Cow, collections::BTreeSet};

/// Computes the public key from the private key.
pub fn compute_public<V: Variant>(private: &Scalar) -> V::Public {
    let mut public = V::Public::one();
    public.mul(private);
    public
}

/// Hashes the provided message with the domain separation tag (DST) to
/// the curve.
pub fn hash_message<V: Variant>(dst: DST, message: &[u8]) -> V::Signature {
    let mut hm = V::Signature::zero();
    hm.map(dst, message);
    hm
}

/// Signs the provided message with the private key.
pub fn sign<V: Variant>(private: &Scalar, dst: DST, message: &[u8]) -> V::Signature {
    let mut hm = hash_message::<V>(dst, message);
    hm.mul(private);
    hm
}

/// Verifies the signature with the provided public key.
pub fn verify<V: Variant>(
    public: &V::Public,
    dst: DST,
    message: &[u8],
    signature: &V::Signature,
) -> Result<(), Error> {
    // Create hashed message `hm`
    let hm = hash_message::<V>(dst, message);

    // Verify the signature
    V::verify(public, &hm, signature)
}

/// Signs the provided message with the private key.
///
/// # Determinism
///
/// Signatures produced by this function are deterministic and are safe
/// to use in a consensus-critical context.
pub fn sign_message<V: Variant>(
    private: &group::Private,
    namespace: Option<&[u8]>,
    message: &[u8],
) -> V::Signature {
    let payload = match namespace {
        Some(namespace) => Cow::Owned(union_unique(namespace, message)),
        None => Cow::Borrowed(message),
    };
    sign::<V>(private, V::MESSAGE, &payload)
}

/// Verifies the signature with the provided public key.
///
/// # Warning
///
/// This function assumes a group check was already performed on
/// `public` and `signature`.
pub fn verify_message<V: Variant>(
    public: &V::Public,
    namespace: Option<&[u8]>,
    message: &[u8],
    signature: &V::Signature,
) -> Result<(), Error> {
    let payload = match namespace {
        Some(namespace) => Cow::Owned(union_unique(namespace, message)),
        None => Cow::Borrowed(message),
    };
    verify::<V>(public, V::MESSAGE, &payload, signature)
}

/// Signs the provided message with the key share.
pub fn partial_sign_message<V: Variant>(
    private: &Share,
    namespace: Option<&[u8]>,
    message: &[u8],
) -> PartialSignature<V> {
    let sig = sign_message::<V>(&private.private, namespace, message);
    Eval {
        value: sig,
        index: private.index,
    }
}

/// Verifies the partial signature against the public polynomial.
///
/// # Warning
///
/// This function assumes a group check was already performed on `signature`.
pub fn partial_verify_message<V: Variant>(
    public: &poly::Public<V>,
    namespace: Option<&[u8]>,
    message: &[u8],
    partial: &PartialSignature<V>,
) -> Result<(), Error> {
    if partial.index == 0 {
        return Err(Error::InvalidIndex);
    }
    let public = public.evaluate(partial.index);
    verify_message::<V>(&public.value, namespace, message, &partial.value)
}

/// Verify a list of [PartialSignature]s by performing aggregate verification,
/// performing repeated bisection to find invalid signatures (if any exist).
///
/// Each pair is weighted by a fresh random scalar before aggregation so that invalid
/// partial signatures cannot offset each other in the aggregate.
fn partial_verify_multiple_public_keys_bisect<'a, R, V>(
    rng: &mut R,
    pending: &[(V::Public, &'a PartialSignature<V>)],
    mut invalid: Vec<&'a PartialSignature<V>>,
    namespace: Option<&[u8]>,
    message: &[u8],
) -> Result<(), Vec<&'a PartialSignature<V>>>
where
    R: RngCore + CryptoRng,
    V: Variant,
{
    // Iteratively bisect to find invalid signatures
    let mut stack = vec![(0, pending.len())];
    while let Some((start, end)) = stack.pop() {
        // Skip if range is empty
        let slice = &pending[start..end];
        if slice.is_empty() {
            continue;
        }

        // Compute weighted sums: sum(r_i * pk_i) and sum(r_i * sig_i)
        let mut agg_pk = V::Public::zero();
        let mut agg_sig = V::Signature::zero();
        for (pk, partial) in slice {
            let scalar = Scalar::from_rand(rng);
            let mut pk = *pk;
            pk.mul(&scalar);
            agg_pk.add(&pk);
            let mut sig = partial.value;
            sig.mul(&scalar);
            agg_sig.add(&sig);
        }

        // If aggregate signature is invalid, bisect. Otherwise, continue.
        if verify_message::<V>(&agg_pk, namespace, message, &agg_sig).is_err() {
            if slice.len() == 1 {
                invalid.push(slice[0].1);
            } else {
                let mid = slice.len() / 2;
                stack.push((start + mid, end));
                stack.push((start, start + mid));
            }
        }
    }

    // Return invalid partial signatures, if any
    if !invalid.is_empty() {
        return Err(invalid);
    }
    Ok(())
}

/// Verifies multiple [PartialSignature]s over the same message with a single weighted
/// aggregate check (or returns every invalid signature found).
///
/// Passing this check implies every individual partial signature is valid. Partial
/// signatures with the reserved index `0` are always reported as invalid.
///
/// # Warning
///
/// This function assumes a group check was already performed on each `signature`.
pub fn partial_verify_multiple_public_keys<'a, R, V, I>(
    rng: &mut R,
    public: &poly::Public<V>,
    namespace: Option<&[u8]>,
    message: &[u8],
    partials: I,
) -> Result<(), Vec<&'a PartialSignature<V>>>
where
    R: RngCore + CryptoRng,
    V: Variant,
    I: IntoIterator<Item = &'a PartialSignature<V>>,
{
    // Evaluate public polynomial to compute signer public keys
    let mut pending = Vec::new();
    let mut invalid = Vec::new();
    for partial in partials {
        if partial.index == 0 {
            invalid.push(partial);
            continue;
        }
        pending.push((public.evaluate(partial.index).value, partial));
    }

    // Find any invalid partial signatures
    partial_verify_multiple_public_keys_bisect::<_, V>(rng, &pending, invalid, namespace, message)
}

/// Recovers a signature from at least `threshold` partial signatures.
///
/// # Determinism
///
/// Signatures recovered by this function are deterministic and are safe
/// to use in a consensus-critical context.
///
/// # Warning
///
/// This function does not verify the partial signatures. A single invalid
/// partial signature produces an invalid recovered signature. Prefer
/// [threshold_signature_recover_verified] unless the partial signatures were
/// already checked.
pub fn threshold_signature_recover<'a, V, I>(
    threshold: u32,
    partials: I,
) -> Result<V::Signature, Error>
where
    V: Variant,
    I: IntoIterator<Item = &'a PartialSignature<V>>,
    V::Signature: 'a,
{
    // Prepare evaluations
    let evals = prepare_evaluations(threshold, partials)?;

    // Compute weights
    let indices = evals.iter().map(|e| e.index).collect::<Vec<_>>();
    let weights = compute_weights(&indices)?;

    // Interpolate in the signature group
    poly::Signature::<V>::recover_with_weights(&weights, evals)
}

/// Verifies each partial signature against the public polynomial, discards any that are invalid,
/// and recovers the threshold signature from the remainder.
///
/// Partial signatures are discarded if their index is outside of `1..=n`, if they fail
/// verification against the signer's committed public share, or if another partial signature
/// with the same index was already accepted. The indices of all discarded partial
/// signatures are returned (ascending) along with the recovered signature.
///
/// Fails with [Error::NotEnoughPartialSignatures] if fewer than `threshold` valid partial
/// signatures remain and with [Error::InvalidRecovery] if the recovered signature does not
/// verify under the group public key.
pub fn threshold_signature_recover_verified<R, V>(
    rng: &mut R,
    public: &poly::Public<V>,
    namespace: Option<&[u8]>,
    message: &[u8],
    partials: &[PartialSignature<V>],
    threshold: u32,
    n: u32,
) -> Result<(V::Signature, Vec<u32>), Error>
where
    R: RngCore + CryptoRng,
    V: Variant,
{
    if threshold == 0 || threshold > n || public.required() != threshold {
        return Err(Error::InvalidThreshold(threshold, n));
    }

    // Discard partial signatures from outside of the participant set
    let mut rejected = BTreeSet::new();
    let mut candidates = Vec::with_capacity(partials.len());
    for partial in partials {
        if partial.index == 0 || partial.index > n {
            rejected.insert(partial.index);
            continue;
        }
        candidates.push(partial);
    }

    // Discard partial signatures that do not verify
    let invalid = match partial_verify_multiple_public_keys::<_, V, _>(
        rng,
        public,
        namespace,
        message,
        candidates.iter().copied(),
    ) {
        Ok(()) => Vec::new(),
        Err(invalid) => invalid,
    };
    let mut accepted = BTreeSet::new();
    let mut valid = Vec::with_capacity(candidates.len());
    for partial in candidates {
        if invalid.iter().any(|bad| std::ptr::eq(*bad, partial)) {
            rejected.insert(partial.index);
            continue;
        }
        if accepted.insert(partial.index) {
            valid.push(partial);
        }
    }
    if valid.len() < threshold as usize {
        return Err(Error::NotEnoughPartialSignatures(
            threshold as usize,
            valid.len(),
        ));
    }

    // Recover and check the group signature
    let signature = threshold_signature_recover::<V, _>(threshold, valid)?;
    verify_message::<V>(poly::public::<V>(public), namespace, message, &signature)
        .map_err(|_| Error::InvalidRecovery)?;
    Ok((signature, rejected.into_iter().collect()))
}
