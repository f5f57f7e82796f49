use std::{fmt, str::FromStr};

use crate::{Error, HashAlgorithm};

/// Default level width from which the `parallel` feature fans out pair
/// hashing across threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// What to do with the last node of a level that has an odd count.
///
/// The choice changes the root, so it must match the protocol the tree is
/// checked against.
///
/// With [`OddNodePolicy::Duplicate`] the leaf sequences `[A, B, C]` and
/// `[A, B, C, C]` produce the same root. Protocols that care (Bitcoin's
/// CVE-2012-2459 is the classic case) must reject such duplicate trailing
/// leaves themselves; the builder never deduplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum OddNodePolicy {
    /// Pair the unpaired node with itself: `digest(C || C)`. Bitcoin does this.
    #[default]
    Duplicate,
    /// Carry the unpaired node up to the next level unchanged. Tron does this.
    Promote,
}

impl OddNodePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            OddNodePolicy::Duplicate => "duplicate",
            OddNodePolicy::Promote => "promote",
        }
    }
}

impl fmt::Display for OddNodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OddNodePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "duplicate" | "dup" => Ok(OddNodePolicy::Duplicate),
            "promote" => Ok(OddNodePolicy::Promote),
            _ => Err(Error::UnknownOddNodePolicy(s.to_string())),
        }
    }
}

/// Settings for one tree build.
///
/// The default reproduces Bitcoin's transaction tree: double-SHA-256 with
/// the last node duplicated on odd levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case", deny_unknown_fields)
)]
pub struct TreeConfig {
    pub algorithm: HashAlgorithm,
    pub odd_node_policy: OddNodePolicy,
    /// Only consulted with the `parallel` feature.
    pub parallel_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            algorithm: HashAlgorithm::default(),
            odd_node_policy: OddNodePolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl TreeConfig {
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_odd_node_policy(mut self, odd_node_policy: OddNodePolicy) -> Self {
        self.odd_node_policy = odd_node_policy;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Byte length every leaf must have under this configuration.
    pub fn digest_len(&self) -> usize {
        self.algorithm.digest_len()
    }
}
