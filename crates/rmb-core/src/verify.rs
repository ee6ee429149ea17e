//! End-to-end envelope signature verification.

use rmb_crypto::{codec, construct_verifier, Verifier};

use crate::challenge::Challenge;
use crate::envelope::Envelope;
use crate::errors::VerificationError;
use crate::registry::TwinRegistry;

/// Verify that `envelope` was signed by the registered key of its source twin.
///
/// Steps, each failing fast:
/// 1. resolve the source twin's public key
/// 2. read and decode the tagged signature
/// 3. interpret the key under the scheme the signature declares
/// 4. recompute the challenge and verify against it
///
/// Nothing is retried.
#[tracing::instrument(level = "debug", skip_all, fields(twin_id = envelope.source_twin()))]
pub async fn verify_signature<R, C, E>(
    registry: &R,
    challenge: &C,
    envelope: &E,
) -> Result<(), VerificationError>
where
    R: TwinRegistry + ?Sized,
    C: Challenge<E> + ?Sized,
    E: Envelope + ?Sized,
{
    let twin_id = envelope.source_twin();

    let twin = registry
        .get_twin(twin_id)
        .await
        .map_err(|source| VerificationError::TwinLookup { twin_id, source })?;

    let encoded = envelope
        .signature()
        .ok_or(VerificationError::MissingSignature)?;
    let signature = codec::decode(encoded)?;

    // scheme comes from the signature tag, never from the twin record
    let verifier = construct_verifier(&twin.public_key, signature.scheme);

    let data = challenge.challenge(envelope)?;

    if let Err(cause) = verifier.check(&data, &signature.bytes) {
        tracing::warn!(
            twin_id,
            scheme = %signature.scheme,
            public_key = %hex::encode(&twin.public_key),
            %cause,
            "signature verification failed"
        );
        return Err(VerificationError::SignatureMismatch {
            twin_id,
            scheme: signature.scheme,
            cause,
        });
    }

    tracing::debug!(twin_id, scheme = %signature.scheme, "signature verified");
    Ok(())
}

/// A registry and challenge bundled behind a single `verify(envelope)` call.
#[derive(Debug, Clone)]
pub struct EnvelopeVerifier<R, C> {
    registry: R,
    challenge: C,
}

impl<R: TwinRegistry, C> EnvelopeVerifier<R, C> {
    pub fn new(registry: R, challenge: C) -> Self {
        Self { registry, challenge }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub async fn verify<E>(&self, envelope: &E) -> Result<(), VerificationError>
    where
        C: Challenge<E>,
        E: Envelope + ?Sized,
    {
        verify_signature(&self.registry, &self.challenge, envelope).await
    }
}
