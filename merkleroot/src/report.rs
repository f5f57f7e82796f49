//! Hex rendering of a built tree for presentation and persistence layers.

use crate::{
    Digest, Error, HashAlgorithm, MerkleTree, MerkleTreeBuilder, OddNodePolicy, TreeConfig,
};

/// Read-only hex view of a [`MerkleTree`].
///
/// `levels[0]` are the leaves, the last entry is `[root]`. All hex is
/// lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeReport {
    pub algorithm: HashAlgorithm,
    pub odd_node_policy: OddNodePolicy,
    pub levels: Vec<Vec<String>>,
    pub root: String,
}

impl From<&MerkleTree> for TreeReport {
    fn from(tree: &MerkleTree) -> Self {
        TreeReport {
            algorithm: tree.config().algorithm,
            odd_node_policy: tree.config().odd_node_policy,
            levels: tree.levels().iter().map(|level| level.to_hex()).collect(),
            root: tree.root().to_hex(),
        }
    }
}

impl TreeReport {
    /// Decode the root.
    pub fn root_digest(&self) -> Result<Digest, Error> {
        Digest::from_hex(&self.root).map_err(|e| Error::InvalidReport(format!("root: {e}")))
    }

    /// Rebuild from `levels[0]` with the recorded algorithm and policy and
    /// check that every level and the root match.
    pub fn verify(&self) -> Result<MerkleTree, Error> {
        let leaves = self
            .levels
            .first()
            .ok_or_else(|| Error::InvalidReport("report has no levels".to_string()))?;
        let config = TreeConfig::default()
            .with_algorithm(self.algorithm)
            .with_odd_node_policy(self.odd_node_policy);
        let rebuilt = MerkleTreeBuilder::new(config).build_from_hex(leaves)?;

        if rebuilt.levels().len() != self.levels.len() {
            return Err(Error::InvalidReport(format!(
                "expected {} levels, report has {}",
                rebuilt.levels().len(),
                self.levels.len()
            )));
        }
        for (index, (level, reported)) in rebuilt.levels().iter().zip(&self.levels).enumerate() {
            let matches = level.len() == reported.len()
                && level
                    .iter()
                    .zip(reported)
                    .all(|(digest, hex)| hex.eq_ignore_ascii_case(&digest.to_hex()));
            if !matches {
                return Err(Error::InvalidReport(format!("level {index} does not match")));
            }
        }

        let root = self.root_digest()?;
        if &root != rebuilt.root() {
            return Err(Error::InvalidReport(format!(
                "root mismatch: reported {}, computed {}",
                self.root,
                rebuilt.root()
            )));
        }
        Ok(rebuilt)
    }
}
