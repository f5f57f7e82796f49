use tracing::{debug, trace};

use crate::{Digest, Error, LeafSet, OddNodePolicy, TreeConfig, TreeReport};

/// One row of the tree. Level 0 holds the leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    digests: Vec<Digest>,
}

impl Level {
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Digest> {
        self.digests.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Digest> {
        self.digests.iter()
    }

    pub fn as_slice(&self) -> &[Digest] {
        &self.digests
    }

    /// Whether the last entry has no partner and falls under the odd node
    /// policy when this level is reduced.
    pub fn has_unpaired(&self) -> bool {
        self.digests.len() > 1 && self.digests.len() % 2 == 1
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.digests.iter().map(Digest::to_hex).collect()
    }
}

impl<'a> IntoIterator for &'a Level {
    type Item = &'a Digest;
    type IntoIter = std::slice::Iter<'a, Digest>;

    fn into_iter(self) -> Self::IntoIter {
        self.digests.iter()
    }
}

/// A fully built Merkle tree.
///
/// Levels are stored bottom-up as a list of lists: `levels()[0]` are the
/// leaves and the last level holds only the root. A node at `(level, i)` has
/// children `(level - 1, 2i)` and `(level - 1, 2i + 1)`; the second is
/// absent (duplicated or promoted per the odd node policy) when the child
/// level has odd length and `2i + 1` is past its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    config: TreeConfig,
    levels: Vec<Level>,
    hash_calls: u64,
}

impl MerkleTree {
    /// The single digest in the top level.
    pub fn root(&self) -> &Digest {
        // A tree always has at least one non-empty level.
        &self.levels[self.levels.len() - 1].digests[0]
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn leaves(&self) -> &Level {
        &self.levels[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of combination rounds between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// How many pair digests the build computed. Promoted nodes cost nothing.
    pub fn hash_calls(&self) -> u64 {
        self.hash_calls
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Hex view of the whole tree.
    pub fn to_report(&self) -> TreeReport {
        TreeReport::from(self)
    }
}

/// Builds [`MerkleTree`]s under a fixed [`TreeConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MerkleTreeBuilder {
    config: TreeConfig,
}

impl MerkleTreeBuilder {
    pub fn new(config: TreeConfig) -> Self {
        MerkleTreeBuilder { config }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Build from decoded leaf digests.
    pub fn build(&self, leaves: &[Digest]) -> Result<MerkleTree, Error> {
        let leaves = LeafSet::from_digests(self.config.algorithm, leaves.to_vec())?;
        Ok(self.reduce(leaves))
    }

    /// Build from hex-encoded leaves.
    pub fn build_from_hex<S: AsRef<str>>(&self, leaves: &[S]) -> Result<MerkleTree, Error> {
        let leaves = LeafSet::from_hex(self.config.algorithm, leaves)?;
        Ok(self.reduce(leaves))
    }

    /// Build from a leaf set validated elsewhere.
    ///
    /// Fails with [`Error::MalformedLeaf`] if the set was validated for an
    /// algorithm with a different digest length.
    pub fn build_from_leaf_set(&self, leaves: LeafSet) -> Result<MerkleTree, Error> {
        let expected = self.config.digest_len();
        if leaves.digest_len() != expected {
            return Err(Error::MalformedLeaf {
                index: 0,
                expected,
                actual: leaves.digest_len(),
            });
        }
        Ok(self.reduce(leaves))
    }

    fn reduce(&self, leaves: LeafSet) -> MerkleTree {
        debug!(
            leaves = leaves.len(),
            algorithm = %self.config.algorithm,
            odd_node_policy = %self.config.odd_node_policy,
            "building merkle tree"
        );

        let mut levels = vec![Level {
            digests: leaves.into_digests(),
        }];
        let mut hash_calls = 0u64;

        loop {
            let current = &levels[levels.len() - 1];
            if current.len() == 1 {
                break;
            }
            let (next, calls) = self.next_level(current);
            trace!(
                level = levels.len(),
                width = next.len(),
                hash_calls = calls,
                "reduced level"
            );
            hash_calls += calls;
            levels.push(next);
        }

        let tree = MerkleTree {
            config: self.config,
            levels,
            hash_calls,
        };
        debug!(
            depth = tree.depth(),
            hash_calls = tree.hash_calls,
            root = %tree.root(),
            "built merkle tree"
        );
        tree
    }

    fn next_level(&self, current: &Level) -> (Level, u64) {
        if current.len() >= self.config.parallel_threshold {
            self.next_level_parallel(current)
        } else {
            self.next_level_sequential(current)
        }
    }

    fn next_level_sequential(&self, current: &Level) -> (Level, u64) {
        let mut digests = Vec::with_capacity(current.len().div_ceil(2));
        let mut calls = 0;
        for pair in current.digests.chunks(2) {
            let (parent, hashed) = self.combine_pair(pair);
            calls += u64::from(hashed);
            digests.push(parent);
        }
        (Level { digests }, calls)
    }

    #[cfg(feature = "parallel")]
    fn next_level_parallel(&self, current: &Level) -> (Level, u64) {
        use rayon::prelude::*;

        // Indexed collect keeps pair order.
        let combined: Vec<(Digest, bool)> = current
            .digests
            .par_chunks(2)
            .map(|pair| self.combine_pair(pair))
            .collect();
        let calls = combined.iter().filter(|(_, hashed)| *hashed).count() as u64;
        let digests = combined.into_iter().map(|(digest, _)| digest).collect();
        (Level { digests }, calls)
    }

    #[cfg(not(feature = "parallel"))]
    fn next_level_parallel(&self, current: &Level) -> (Level, u64) {
        self.next_level_sequential(current)
    }

    /// Parent of one chunk of a level, and whether a digest was computed.
    fn combine_pair(&self, pair: &[Digest]) -> (Digest, bool) {
        let algorithm = self.config.algorithm;
        match pair {
            [left, right] => (algorithm.combine(left, right), true),
            [last] => match self.config.odd_node_policy {
                OddNodePolicy::Duplicate => (algorithm.combine(last, last), true),
                OddNodePolicy::Promote => (last.clone(), false),
            },
            _ => unreachable!("chunks(2) yields one or two digests"),
        }
    }
}

/// Build a tree with the default configuration (double-SHA-256, duplicate
/// the last node of odd levels).
pub fn build_tree(leaves: &[Digest]) -> Result<MerkleTree, Error> {
    MerkleTreeBuilder::default().build(leaves)
}

/// [`build_tree`] from hex-encoded leaves.
pub fn build_tree_from_hex<S: AsRef<str>>(leaves: &[S]) -> Result<MerkleTree, Error> {
    MerkleTreeBuilder::default().build_from_hex(leaves)
}
