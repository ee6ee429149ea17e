//! Verifying keys for the supported signature schemes.
//!
//! A registered public key is stored as raw bytes without a scheme; the
//! scheme comes from the signature tag. The same bytes are interpreted as
//! whichever key type the signature claims, so a mismatch between the key's
//! real algorithm and the claimed one surfaces as a failed verification.

use ed25519_dalek::Verifier as _;

use crate::codec::SignatureError;
use crate::scheme::SignatureScheme;

/// Signing context shared by substrate-compatible Sr25519 signers.
pub const SR25519_SIGNING_CONTEXT: &[u8] = b"substrate";

/// Why a verification returned `false`.
///
/// This never becomes a distinct public error: every variant means "not
/// verified". It exists so callers can log what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyFailure {
    #[error("public key could not be decoded: {0}")]
    InvalidPublicKey(String),
    #[error("signature could not be decoded: {0}")]
    InvalidSignature(String),
    #[error("signature does not match message and key")]
    Mismatch,
}

/// Verify raw signature bytes against a message.
pub trait Verifier {
    /// Verify and report the failure cause.
    fn check(&self, message: &[u8], signature: &[u8]) -> Result<(), VerifyFailure>;

    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        self.check(message, signature).is_ok()
    }
}

/// Raw Ed25519 public key bytes. Verifies the message directly, no transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519VerifyingKey(pub Vec<u8>);

impl Ed25519VerifyingKey {
    fn key(&self) -> Result<ed25519_dalek::VerifyingKey, VerifyFailure> {
        let bytes: &[u8; ed25519_dalek::PUBLIC_KEY_LENGTH] =
            self.0.as_slice().try_into().map_err(|_| {
                VerifyFailure::InvalidPublicKey(format!(
                    "expected {} bytes, got {}",
                    SignatureScheme::Ed25519.public_key_len(),
                    self.0.len()
                ))
            })?;

        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| VerifyFailure::InvalidPublicKey(e.to_string()))
    }
}

impl Verifier for Ed25519VerifyingKey {
    fn check(&self, message: &[u8], signature: &[u8]) -> Result<(), VerifyFailure> {
        let key = self.key()?;
        let sig = ed25519_dalek::Signature::from_slice(signature)
            .map_err(|e| VerifyFailure::InvalidSignature(e.to_string()))?;

        key.verify(message, &sig).map_err(|_| VerifyFailure::Mismatch)
    }
}

/// Raw Sr25519 (schnorrkel over Ristretto) public key bytes.
///
/// Messages are wrapped in a signing transcript under the `"substrate"`
/// context before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sr25519VerifyingKey(pub Vec<u8>);

impl Sr25519VerifyingKey {
    fn key(&self) -> Result<schnorrkel::PublicKey, VerifyFailure> {
        schnorrkel::PublicKey::from_bytes(&self.0)
            .map_err(|e| VerifyFailure::InvalidPublicKey(e.to_string()))
    }
}

impl Verifier for Sr25519VerifyingKey {
    fn check(&self, message: &[u8], signature: &[u8]) -> Result<(), VerifyFailure> {
        let key = self.key()?;
        let transcript = schnorrkel::signing_context(SR25519_SIGNING_CONTEXT).bytes(message);
        let sig = schnorrkel::Signature::from_bytes(signature)
            .map_err(|e| VerifyFailure::InvalidSignature(e.to_string()))?;

        key.verify(transcript, &sig).map_err(|_| VerifyFailure::Mismatch)
    }
}

/// A public key interpreted under one signature scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyingKey {
    Ed25519(Ed25519VerifyingKey),
    Sr25519(Sr25519VerifyingKey),
}

impl VerifyingKey {
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            VerifyingKey::Ed25519(_) => SignatureScheme::Ed25519,
            VerifyingKey::Sr25519(_) => SignatureScheme::Sr25519,
        }
    }
}

impl Verifier for VerifyingKey {
    fn check(&self, message: &[u8], signature: &[u8]) -> Result<(), VerifyFailure> {
        match self {
            VerifyingKey::Ed25519(k) => k.check(message, signature),
            VerifyingKey::Sr25519(k) => k.check(message, signature),
        }
    }
}

/// Interpret `public_key` under `scheme`.
pub fn construct_verifier(public_key: &[u8], scheme: SignatureScheme) -> VerifyingKey {
    match scheme {
        SignatureScheme::Ed25519 => VerifyingKey::Ed25519(Ed25519VerifyingKey(public_key.to_vec())),
        SignatureScheme::Sr25519 => VerifyingKey::Sr25519(Sr25519VerifyingKey(public_key.to_vec())),
    }
}

/// Like [`construct_verifier`] but takes the textual key type
/// (`"ed25519"` or `"sr25519"`).
pub fn construct_verifier_for(public_key: &[u8], key_type: &str) -> Result<VerifyingKey, SignatureError> {
    let scheme: SignatureScheme = key_type.parse()?;
    Ok(construct_verifier(public_key, scheme))
}
