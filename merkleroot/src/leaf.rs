//! The hex boundary: turning caller input into a validated leaf set.

use crate::{Digest, Error, HashAlgorithm};

/// An ordered, non-empty list of leaf digests, all of one length.
///
/// Order is significant: it decides pairing and therefore the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafSet {
    digest_len: usize,
    leaves: Vec<Digest>,
}

impl LeafSet {
    /// Decode hex leaves for `algorithm`.
    ///
    /// Every leaf is decoded and length-checked before this returns, so the
    /// first bad leaf (by index) is the one reported.
    pub fn from_hex<S: AsRef<str>>(algorithm: HashAlgorithm, leaves: &[S]) -> Result<Self, Error> {
        if leaves.is_empty() {
            return Err(Error::EmptyInput);
        }
        let decoded = leaves
            .iter()
            .enumerate()
            .map(|(index, leaf)| {
                Digest::from_hex(leaf.as_ref()).map_err(|source| Error::Encoding { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_digests(algorithm, decoded)
    }

    /// Validate already-decoded leaves for `algorithm`.
    pub fn from_digests(algorithm: HashAlgorithm, leaves: Vec<Digest>) -> Result<Self, Error> {
        if leaves.is_empty() {
            return Err(Error::EmptyInput);
        }
        let expected = algorithm.digest_len();
        if let Some((index, leaf)) = leaves
            .iter()
            .enumerate()
            .find(|(_, leaf)| leaf.len() != expected)
        {
            return Err(Error::MalformedLeaf {
                index,
                expected,
                actual: leaf.len(),
            });
        }
        Ok(LeafSet {
            digest_len: expected,
            leaves,
        })
    }

    /// Validate raw byte leaves for `algorithm`.
    pub fn from_bytes<B: AsRef<[u8]>>(algorithm: HashAlgorithm, leaves: &[B]) -> Result<Self, Error> {
        Self::from_digests(
            algorithm,
            leaves
                .iter()
                .map(|leaf| Digest::new(leaf.as_ref().to_vec()))
                .collect(),
        )
    }

    pub fn digest_len(&self) -> usize {
        self.digest_len
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always `false`; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn as_slice(&self) -> &[Digest] {
        &self.leaves
    }

    pub fn into_digests(self) -> Vec<Digest> {
        self.leaves
    }
}
