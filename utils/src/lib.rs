//! Leverage common functionality across the beacon crates.

use prost::{encode_length_delimiter, length_delimiter_len};
use rand::{rngs::StdRng, SeedableRng};

/// Converts bytes to a hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes.iter() {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Concatenate a namespace and a message, prepended by a varint encoding of the namespace length.
///
/// This produces a unique byte sequence (i.e. no collisions) for each `(namespace, msg)` pair.
pub fn union_unique(namespace: &[u8], msg: &[u8]) -> Vec<u8> {
    let ld_len = length_delimiter_len(namespace.len());
    let mut result = Vec::with_capacity(ld_len + namespace.len() + msg.len());
    encode_length_delimiter(namespace.len(), &mut result)
        .expect("capacity reserved for length delimiter");
    result.extend_from_slice(namespace);
    result.extend_from_slice(msg);
    result
}

/// Returns a deterministic RNG for tests and reproducible simulations.
///
/// # Warning
///
/// The output of this RNG is fully determined by `seed` and must never be
/// used to generate secrets outside of testing.
pub fn test_rng_seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Returns a deterministic RNG seeded with `0`.
pub fn test_rng() -> StdRng {
    test_rng_seeded(0)
}
