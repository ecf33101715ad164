//! Distributed Key Generation (DKG), Signatures, and Threshold Signatures over the BLS12-381 curve.
//!
//! # Features
//!
//! This crate has the following features:
//!
//! - `portable`: Enables `portable` feature on `blst` (<https://github.com/supranational/blst?tab=readme-ov-file#platform-and-language-compatibility>).
//!
//! # Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Benchmarks cover threshold signature recovery (with and without partial signature
//! verification), batch verification of partial signatures, and the DKG simulator.

pub mod dkg;
pub mod primitives;
