//! Hashers (feature-gated) and utilities for implementing them.

use crate::digest::Digest;

use alloc::string::String;

/// A digest function for inclusion proofs.
///
/// The same function is used to hash a transaction identifier into its leaf digest and to fold
/// the running accumulator with each sibling. Client and authority must agree on the function
/// in use for a given deployment; nothing on the wire identifies it.
pub trait DigestHasher {
    /// Hash arbitrary bytes into a digest.
    fn digest(input: &[u8]) -> Digest;

    /// Hash the concatenation of the hex encodings of `a` and `b`, in that order.
    ///
    /// This is the fold step of proof verification: the preimage is the textual form
    /// `hex(a) ++ hex(b)`, never the raw bytes. Implementations with an incremental interface
    /// should override this to avoid building the intermediate string.
    fn digest_hex_concat(a: &Digest, b: &Digest) -> Digest {
        let mut preimage = String::with_capacity(crate::digest::DIGEST_HEX_LEN * 2);
        preimage.push_str(&a.to_hex());
        preimage.push_str(&b.to_hex());
        Self::digest(preimage.as_bytes())
    }
}

#[cfg(any(feature = "blake3-hasher", test))]
pub use blake3::Blake3Hasher;

/// A digest hasher making use of blake3.
#[cfg(any(feature = "blake3-hasher", test))]
pub mod blake3 {
    use super::DigestHasher;
    use crate::digest::Digest;

    /// A [`DigestHasher`] implementation for Blake3.
    pub struct Blake3Hasher;

    impl DigestHasher for Blake3Hasher {
        fn digest(input: &[u8]) -> Digest {
            Digest::from(*blake3::hash(input).as_bytes())
        }

        fn digest_hex_concat(a: &Digest, b: &Digest) -> Digest {
            let mut hasher = blake3::Hasher::new();
            hasher.update(a.to_hex().as_bytes());
            hasher.update(b.to_hex().as_bytes());
            Digest::from(*hasher.finalize().as_bytes())
        }
    }
}

#[cfg(feature = "sha2-hasher")]
pub use sha2::Sha2Hasher;

/// A digest hasher making use of sha2-256.
#[cfg(feature = "sha2-hasher")]
pub mod sha2 {
    use super::DigestHasher;
    use crate::digest::Digest;
    use sha2::{Digest as _, Sha256};

    /// A [`DigestHasher`] implementation for Sha2.
    pub struct Sha2Hasher;

    impl DigestHasher for Sha2Hasher {
        fn digest(input: &[u8]) -> Digest {
            let mut hasher = Sha256::new();
            hasher.update(input);
            Digest::from(<[u8; 32]>::from(hasher.finalize()))
        }

        fn digest_hex_concat(a: &Digest, b: &Digest) -> Digest {
            let mut hasher = Sha256::new();
            hasher.update(a.to_hex().as_bytes());
            hasher.update(b.to_hex().as_bytes());
            Digest::from(<[u8; 32]>::from(hasher.finalize()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake3_concat_matches_default_method() {
        struct Plain;
        impl DigestHasher for Plain {
            fn digest(input: &[u8]) -> Digest {
                Blake3Hasher::digest(input)
            }
        }

        let a = Blake3Hasher::digest(b"left");
        let b = Blake3Hasher::digest(b"right");
        assert_eq!(
            Blake3Hasher::digest_hex_concat(&a, &b),
            Plain::digest_hex_concat(&a, &b)
        );
    }

    #[test]
    fn concat_order_matters() {
        let a = Blake3Hasher::digest(b"left");
        let b = Blake3Hasher::digest(b"right");
        assert_ne!(
            Blake3Hasher::digest_hex_concat(&a, &b),
            Blake3Hasher::digest_hex_concat(&b, &a)
        );
    }
}
