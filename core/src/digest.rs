//! The digest value schema.
//!
//! All digests are 256 bits, rendered as 64 lowercase hexadecimal characters wherever they
//! cross an API or wire boundary. Parsing is strict: anything that is not exactly 64 lowercase
//! hex characters is rejected. This is what guarantees that a digest line can never collide
//! with the response sentinel of the wire protocol, without any escaping.

use alloc::string::String;
use core::fmt;

/// The width of a digest, in bytes.
pub const DIGEST_LEN: usize = 32;

/// The width of a hex-encoded digest, in characters.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// A 256-bit digest. The output of the [`crate::hasher::DigestHasher`] in use and the unit of
/// every sibling list and every root.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Parse a digest from its canonical encoding: exactly 64 lowercase hex characters.
    pub fn from_hex(s: &str) -> Result<Self, NotADigest> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(NotADigest::BadLength(s.len()));
        }
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(NotADigest::BadCharacter);
        }
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| NotADigest::BadCharacter)?;
        Ok(Digest(bytes))
    }

    /// The canonical encoding of this digest: 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl core::str::FromStr for Digest {
    type Err = NotADigest;

    fn from_str(s: &str) -> Result<Self, NotADigest> {
        Digest::from_hex(s)
    }
}

/// Errors in parsing a digest from its hex encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotADigest {
    /// The input was not exactly [`DIGEST_HEX_LEN`] characters long.
    BadLength(usize),
    /// The input contained a character outside `[0-9a-f]`.
    BadCharacter,
}

impl fmt::Display for NotADigest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotADigest::BadLength(len) => {
                write!(f, "expected {} hex characters, got {}", DIGEST_HEX_LEN, len)
            }
            NotADigest::BadCharacter => write!(f, "expected only lowercase hex characters"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NotADigest {}
