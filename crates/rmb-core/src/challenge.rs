//! Challenge construction: the bytes a signature is computed over.

use rmb_crypto::transcript::{FieldTooLong, Transcript};
use thiserror::Error;

use crate::envelope::{EnvelopeV1, Message};

#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("could not encode challenge: {0}")]
    Encoding(#[from] FieldTooLong),
}

/// Deterministic canonical digest of an envelope's signable fields.
///
/// Signer and verifier must use the same implementation.
pub trait Challenge<E: ?Sized> {
    fn challenge(&self, envelope: &E) -> Result<Vec<u8>, ChallengeError>;
}

impl<E: ?Sized, F> Challenge<E> for F
where
    F: Fn(&E) -> Result<Vec<u8>, ChallengeError>,
{
    fn challenge(&self, envelope: &E) -> Result<Vec<u8>, ChallengeError> {
        self(envelope)
    }
}

/// Transcript based challenge for [`EnvelopeV1`].
///
/// Covers every field except the signature itself and returns the
/// SHA-256 of the transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptChallenge;

impl TranscriptChallenge {
    pub const DOMAIN: &'static str = "rmb_envelope_challenge_v1";

    pub fn transcript(envelope: &EnvelopeV1) -> Result<Transcript, ChallengeError> {
        if envelope.uid.is_empty() {
            return Err(ChallengeError::MissingField("uid"));
        }

        let mut t = Transcript::new(Self::DOMAIN)?;
        t.append_str(1, &envelope.uid)?;
        t.append_opt_bytes(2, envelope.tags.as_deref().map(str::as_bytes))?;
        t.append_u64(3, envelope.timestamp);
        t.append_u64(4, envelope.expiration);
        t.append_u32(5, envelope.source.twin);
        t.append_opt_bytes(6, envelope.source.connection.as_deref().map(str::as_bytes))?;
        t.append_u32(7, envelope.destination.twin);
        t.append_opt_bytes(8, envelope.destination.connection.as_deref().map(str::as_bytes))?;

        match &envelope.message {
            Message::Request { command } => {
                t.append_str(9, "request")?;
                t.append_str(10, command)?;
            }
            Message::Response => {
                t.append_str(9, "response")?;
            }
            Message::Error { code, message } => {
                t.append_str(9, "error")?;
                t.append_u32(10, *code);
                t.append_str(11, message)?;
            }
        }

        t.append_opt_bytes(12, envelope.schema.as_deref().map(str::as_bytes))?;
        t.append_opt_bytes(13, envelope.federation.as_deref().map(str::as_bytes))?;
        t.append_bytes(14, &envelope.payload)?;
        Ok(t)
    }
}

impl Challenge<EnvelopeV1> for TranscriptChallenge {
    fn challenge(&self, envelope: &EnvelopeV1) -> Result<Vec<u8>, ChallengeError> {
        Ok(Self::transcript(envelope)?.finalize().to_vec())
    }
}
