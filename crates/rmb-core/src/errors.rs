//! Verification error taxonomy.
//!
//! Every variant names the step that failed. None of them is fatal to the
//! process; retry policy belongs to the caller.

use rmb_crypto::{SignatureError, SignatureScheme, VerifyFailure};
use thiserror::Error;

use crate::challenge::ChallengeError;
use crate::registry::RegistryError;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("could not get twin from twin id, twin_id: {twin_id}")]
    TwinLookup {
        twin_id: u32,
        #[source]
        source: RegistryError,
    },

    #[error("could not get signature from envelope")]
    MissingSignature,

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("could not get challenge hash: {0}")]
    Challenge(#[from] ChallengeError),

    /// The common negative result. `cause` is diagnostic only.
    #[error("could not verify {scheme} signature of twin {twin_id}")]
    SignatureMismatch {
        twin_id: u32,
        scheme: SignatureScheme,
        cause: VerifyFailure,
    },
}

impl VerificationError {
    /// True when the signature was well formed but did not verify.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, VerificationError::SignatureMismatch { .. })
    }

    /// Short machine readable name of the failed step.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationError::TwinLookup { .. } => "twin_lookup",
            VerificationError::MissingSignature => "missing_signature",
            VerificationError::Signature(SignatureError::Decode(_)) => "decode",
            VerificationError::Signature(SignatureError::UnrecognizedScheme(_)) => "unrecognized_scheme",
            VerificationError::Signature(SignatureError::Malformed { .. }) => "malformed_signature",
            VerificationError::Signature(SignatureError::UnsupportedScheme(_)) => "unsupported_scheme",
            VerificationError::Challenge(_) => "challenge",
            VerificationError::SignatureMismatch { .. } => "signature_mismatch",
        }
    }
}
