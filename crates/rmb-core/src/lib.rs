//! rmb-core: verification of signed twin envelopes.
//!
//! [`verify_signature`] resolves the envelope's source twin through a
//! [`TwinRegistry`], decodes the tagged signature, picks the verifier for the
//! declared scheme and checks it against the envelope's [`Challenge`].

pub mod challenge;
pub mod envelope;
pub mod errors;
pub mod registry;
pub mod verify;

pub use challenge::{Challenge, ChallengeError, TranscriptChallenge};
pub use envelope::{Address, Envelope, EnvelopeV1, Message};
pub use errors::VerificationError;
pub use registry::{MemoryTwinRegistry, RegistryError, Twin, TwinRegistry};
pub use verify::{verify_signature, EnvelopeVerifier};
