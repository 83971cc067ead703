//! Recomputing a Merkle root from a transaction identifier and its sibling digests.
//!
//! An inclusion proof here is an ordered list of sibling digests, leaf towards root. The
//! candidate root is recomputed by hashing the transaction identifier into its leaf digest and
//! folding the siblings over it, left to right. The protocol carries no left/right position
//! tags: every sibling is appended on the right of the running accumulator's hex form, so this
//! verifies a single linear path rather than an arbitrary branching tree.

use crate::digest::Digest;
use crate::hasher::DigestHasher;

use alloc::vec::Vec;

/// Sibling digests supplied for one transaction, in ascending order from the leaf towards the
/// root. Order is significant and preserved exactly as received. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiblingPath(pub Vec<Digest>);

impl SiblingPath {
    /// The number of siblings in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no siblings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Hash a transaction identifier into its leaf digest.
pub fn leaf_digest<H: DigestHasher>(tx: &str) -> Digest {
    H::digest(tx.as_bytes())
}

/// Fold the sibling path over the transaction's leaf digest, producing the candidate root.
///
/// With an empty path the candidate is the leaf digest itself. Each fold step hashes
/// `hex(candidate) ++ hex(sibling)`; the digest value of the accumulator is threaded through
/// every step.
pub fn fold_candidate<H: DigestHasher>(tx: &str, path: &SiblingPath) -> Digest {
    let mut candidate = leaf_digest::<H>(tx);
    for sibling in &path.0 {
        candidate = H::digest_hex_concat(&candidate, sibling);
    }
    candidate
}

/// Whether the candidate root recomputed from `tx` and `path` equals the trusted root exactly.
///
/// A mismatch is the normal "not included" outcome, not an error.
pub fn verify<H: DigestHasher>(tx: &str, path: &SiblingPath, root: &Digest) -> bool {
    fold_candidate::<H>(tx, path) == *root
}
