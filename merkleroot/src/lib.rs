//! Double-hash Merkle roots over any number of leaves.
//!
//! Leaves are digests (usually transaction ids) supplied in order. Each level
//! is reduced by pairing adjacent nodes left to right and hashing the
//! concatenation twice:
//!
//! `parent = H(H(left || right))`
//!
//! until a single root remains. With the default [`TreeConfig`], `H` is
//! SHA-256 and an unpaired last node is paired with itself, which is the
//! Bitcoin transaction tree.
//!
//! ```
//! use merkleroot::build_tree_from_hex;
//!
//! let tree = build_tree_from_hex(&[
//!     "75dd9121f42c14e4ce80e6bcb595519b493e370eafc1c7f2ab7337e483d153ea",
//!     "53d3260bab208080c43de4b5b12f0a4bfe9f72ce5425fac985ae154659bb8bd9",
//! ])
//! .expect("valid leaves");
//! assert_eq!(tree.levels().len(), 2);
//! assert_eq!(
//!     tree.root().to_hex(),
//!     "c15eecbf3a43484e8e8f8c637b37f7204a39c9a94b569058de945b38c0a67a09"
//! );
//! ```
//!
//! Every build keeps all levels, so callers can audit or draw the whole tree
//! (see [`MerkleTree::to_report`]). No I/O happens in this crate.

mod config;
mod digest;
mod error;
pub mod hash;
mod leaf;
mod report;
mod tree;


pub use config::{DEFAULT_PARALLEL_THRESHOLD, OddNodePolicy, TreeConfig};
pub use digest::Digest;
pub use error::Error;
pub use hash::{HashAlgorithm, double_sha256};
pub use leaf::LeafSet;
pub use report::TreeReport;
pub use tree::{Level, MerkleTree, MerkleTreeBuilder, build_tree, build_tree_from_hex};
