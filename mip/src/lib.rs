//! Merkle inclusion proof client and authority.
//!
//! A client holds a trusted root digest and a list of transaction identifiers. For each
//! identifier it opens one connection to an authority, which answers with the ordered sibling
//! digests of that transaction's inclusion path. Folding the siblings over the transaction's
//! leaf digest (see [`mip_core::proof`]) recomputes a candidate root; the transaction is valid
//! iff the candidate equals the trusted root.
//!
//! The wire protocol is plaintext lines over TCP: the client sends the transaction identifier
//! as one line, the authority answers with zero or more digest lines followed by the sentinel
//! line `"done"`. See [`wire`].

pub mod authority;
pub mod error;
pub mod logging;
pub mod request;
pub mod wire;

mod client;

pub use authority::{serve, CannedSource, SiblingSource};
pub use error::Error;
pub use request::{Outcome, ProofRequest, ProofRequestBuilder, VerificationReport};

pub use mip_core::{Digest, DigestHasher, SiblingPath};

#[cfg(feature = "blake3-hasher")]
pub use mip_core::hasher::Blake3Hasher;

#[cfg(feature = "sha2-hasher")]
pub use mip_core::hasher::Sha2Hasher;
