//! Tagged signature codec.
//!
//! Wire form: `hex([tag] ++ raw_signature)` where `tag` is `'e'` (Ed25519)
//! or `'s'` (Sr25519) and `raw_signature` is exactly the scheme's signature
//! length.

use crate::scheme::SignatureScheme;

/// Failure to turn a signature string into bytes.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("signature is empty")]
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("could not decode signature: {0}")]
    Decode(#[from] DecodeError),
    #[error("unrecognized signature prefix {0:#04x}, should be either Ed25519 or Sr25519")]
    UnrecognizedScheme(u8),
    #[error("malformed {scheme} signature: expected {expected} bytes, got {got}")]
    Malformed {
        scheme: SignatureScheme,
        expected: usize,
        got: usize,
    },
    #[error("unsupported signature scheme: {0}")]
    UnsupportedScheme(String),
}

/// A signature split into its scheme and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSignature {
    pub scheme: SignatureScheme,
    pub bytes: Vec<u8>,
}

impl TaggedSignature {
    pub fn new(scheme: SignatureScheme, bytes: impl Into<Vec<u8>>) -> Self {
        Self { scheme, bytes: bytes.into() }
    }

    pub fn encode(&self) -> String {
        encode(self.scheme, &self.bytes)
    }
}

/// Decode a hex signature string into its scheme and raw signature bytes.
///
/// Hex digits may be upper, lower or mixed case. The raw signature must be
/// exactly [`SignatureScheme::signature_len`] bytes.
pub fn decode(encoded: &str) -> Result<TaggedSignature, SignatureError> {
    let decoded = hex::decode(encoded).map_err(DecodeError::from)?;
    let (&tag, raw) = decoded.split_first().ok_or(DecodeError::Empty)?;

    let scheme = SignatureScheme::from_tag(tag).ok_or(SignatureError::UnrecognizedScheme(tag))?;

    let expected = scheme.signature_len();
    if raw.len() != expected {
        return Err(SignatureError::Malformed {
            scheme,
            expected,
            got: raw.len(),
        });
    }

    Ok(TaggedSignature::new(scheme, raw))
}

/// Prefix `raw` with the scheme tag and hex encode (lower case).
pub fn encode(scheme: SignatureScheme, raw: &[u8]) -> String {
    let mut out = Vec::with_capacity(1 + raw.len());
    out.push(scheme.tag());
    out.extend_from_slice(raw);
    hex::encode(out)
}
