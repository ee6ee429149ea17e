//! Signature scheme identifiers.

use std::fmt;
use std::str::FromStr;

use crate::codec::SignatureError;

/// Signature algorithm family a signature blob was produced with.
///
/// The scheme is carried in the first byte of every encoded signature, not
/// alongside the registered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    Ed25519,
    Sr25519,
}

impl SignatureScheme {
    /// Every supported scheme, in tag order.
    pub const ALL: [SignatureScheme; 2] = [SignatureScheme::Ed25519, SignatureScheme::Sr25519];

    /// Wire tag prefixed to the raw signature bytes.
    pub const fn tag(self) -> u8 {
        match self {
            SignatureScheme::Ed25519 => b'e',
            SignatureScheme::Sr25519 => b's',
        }
    }

    /// Scheme for a wire tag, `None` for unknown tags.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'e' => Some(SignatureScheme::Ed25519),
            b's' => Some(SignatureScheme::Sr25519),
            _ => None,
        }
    }

    /// Length of a raw signature for this scheme.
    pub const fn signature_len(self) -> usize {
        match self {
            SignatureScheme::Ed25519 => ed25519_dalek::SIGNATURE_LENGTH,
            SignatureScheme::Sr25519 => schnorrkel::SIGNATURE_LENGTH,
        }
    }

    /// Length of an encoded public key for this scheme.
    pub const fn public_key_len(self) -> usize {
        match self {
            SignatureScheme::Ed25519 => ed25519_dalek::PUBLIC_KEY_LENGTH,
            SignatureScheme::Sr25519 => schnorrkel::PUBLIC_KEY_LENGTH,
        }
    }

    /// Lowercase key type name, as used in twin records.
    pub const fn name(self) -> &'static str {
        match self {
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::Sr25519 => "sr25519",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureScheme {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ed25519" => Ok(SignatureScheme::Ed25519),
            "sr25519" => Ok(SignatureScheme::Sr25519),
            other => Err(SignatureError::UnsupportedScheme(other.to_string())),
        }
    }
}
