//! Core operations and types for Merkle inclusion proofs.
//!
//! This crate defines the digest schema and the fold that recomputes a candidate root from a
//! transaction identifier and an ordered list of sibling digests, in a transport-agnostic manner.
//!
//! The core types and verification routines of this crate do not require the
//! standard library, but do require Rust's alloc crate.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

pub mod digest;
pub mod hasher;
pub mod proof;

pub use digest::{Digest, NotADigest};
pub use hasher::DigestHasher;
pub use proof::{fold_candidate, leaf_digest, verify, SiblingPath};
