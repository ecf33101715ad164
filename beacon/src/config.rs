//! Configuration of a beacon run.

use crate::{chain, sink::Format, Error};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

/// Configuration of a beacon run (loadable from YAML).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of participants (`n`).
    pub participants: u32,

    /// Number of valid partial signatures required to produce a round (`t`).
    pub threshold: u32,

    /// Number of rounds to attempt.
    pub rounds: u64,

    /// Message signed to seed the chain.
    pub seed_message: String,

    /// Namespace applied to every signed message.
    pub namespace: Option<String>,

    /// File that produced randomness is appended to.
    pub output: PathBuf,

    /// Encoding of output records.
    pub format: Format,

    /// Indices of participants that never sign.
    pub offline: Vec<u32>,

    /// Number of threads used to collect partial signatures.
    pub concurrency: usize,

    /// Seed for deterministic key generation (random when unset).
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            participants: 5,
            threshold: 3,
            rounds: 5,
            seed_message: "initial seed".into(),
            namespace: None,
            output: PathBuf::from("result.txt"),
            format: Format::Text,
            offline: Vec::new(),
            concurrency: 1,
            rng_seed: None,
        }
    }
}

impl Config {
    /// Parses a YAML document. Missing fields take their default values.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let yaml = std::fs::read_to_string(path).map_err(Error::ConfigRead)?;
        Self::from_yaml(&yaml)
    }

    /// Checks that the configuration describes a runnable beacon.
    pub fn validate(&self) -> Result<(), Error> {
        if self.participants == 0 {
            return Err(Error::InvalidConfig("participants must be positive".into()));
        }
        if self.threshold == 0 || self.threshold > self.participants {
            return Err(Error::InvalidConfig(format!(
                "threshold {} not in 1..={}",
                self.threshold, self.participants
            )));
        }
        if self.rounds == 0 {
            return Err(Error::InvalidConfig("rounds must be positive".into()));
        }
        if self.concurrency == 0 {
            return Err(Error::InvalidConfig("concurrency must be positive".into()));
        }
        if let Some(index) = self
            .offline
            .iter()
            .find(|&&index| index == 0 || index > self.participants)
        {
            return Err(Error::InvalidConfig(format!(
                "offline participant {} not in 1..={}",
                index, self.participants
            )));
        }
        Ok(())
    }

    /// Returns the distinct offline participant indices.
    pub fn offline(&self) -> BTreeSet<u32> {
        self.offline.iter().copied().collect()
    }
}

impl From<&Config> for chain::Config {
    fn from(cfg: &Config) -> Self {
        Self {
            threshold: cfg.threshold,
            seed_message: cfg.seed_message.as_bytes().to_vec(),
            namespace: cfg.namespace.as_ref().map(|ns| ns.as_bytes().to_vec()),
            concurrency: cfg.concurrency,
        }
    }
}
