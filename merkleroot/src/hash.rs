//! Base hash algorithms and the double-hash digest function.
//!
//! Every digest in a tree is `H(H(data))`. Interior nodes hash the plain
//! concatenation of their children, `digest(left || right)`, with no domain
//! tag, separator or length prefix.

use std::{fmt, str::FromStr};

use sha2::{Digest as _, Sha256, Sha512};
use sha3::Sha3_256;

use crate::{Digest, Error};

/// Base hash `H` applied twice for every digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum HashAlgorithm {
    /// SHA-256, giving Bitcoin's double-SHA-256.
    #[default]
    Sha256,
    Sha512,
    #[cfg_attr(feature = "serde", serde(rename = "sha3-256"))]
    Sha3_256,
    Blake3,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Blake3,
    ];

    /// Output size of `H` in bytes, which is also the leaf length.
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha512 => 64,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 | HashAlgorithm::Blake3 => 32,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// A single pass of `H`.
    pub fn hash_once(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            HashAlgorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
            HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        }
    }

    /// `H(H(data))`. Total over all inputs, including the empty slice.
    pub fn digest(&self, data: &[u8]) -> Digest {
        Digest::new(self.hash_once(&self.hash_once(data)))
    }

    /// Parent of two nodes: `digest(left || right)`.
    pub fn combine(&self, left: &Digest, right: &Digest) -> Digest {
        let mut joined = Vec::with_capacity(left.len() + right.len());
        joined.extend_from_slice(left.as_bytes());
        joined.extend_from_slice(right.as_bytes());
        self.digest(&joined)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            "sha3-256" | "sha3_256" | "sha3" => Ok(HashAlgorithm::Sha3_256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Bitcoin-style `SHA256(SHA256(data))`.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}
