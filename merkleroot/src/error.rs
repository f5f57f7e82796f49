use thiserror::Error;

/// Errors from Merkle tree construction and report handling.
///
/// Every variant is raised before any hashing starts (or, for
/// [`Error::InvalidReport`], after a full rebuild), so a failed call never
/// yields a partial tree.
#[derive(Debug, Error)]
pub enum Error {
    /// No leaves were supplied; a tree needs at least one.
    #[error("cannot build a merkle tree from zero leaves")]
    EmptyInput,
    /// A leaf decoded to the wrong number of bytes for the configured
    /// algorithm.
    #[error("leaf {index} is {actual} bytes, expected {expected}")]
    MalformedLeaf {
        index: usize,
        expected: usize,
        actual: usize,
    },
    /// A leaf was not valid hexadecimal (odd length or non-hex characters).
    #[error("leaf {index} is not valid hex: {source}")]
    Encoding {
        index: usize,
        #[source]
        source: hex::FromHexError,
    },
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("unknown odd node policy: {0}")]
    UnknownOddNodePolicy(String),
    /// A report does not match the tree rebuilt from its own leaves.
    #[error("invalid report: {0}")]
    InvalidReport(String),
}
