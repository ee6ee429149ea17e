#![forbid(unsafe_code)]

//! Signature primitives for twin envelopes.
//!
//! - [`scheme`]: the supported signature schemes and their wire tags
//! - [`codec`]: the tagged, hex-encoded signature blob
//! - [`verifier`]: Ed25519 / Sr25519 verifying keys and the factory
//! - [`transcript`]: deterministic tag-length-value transcripts

pub mod codec;
pub mod scheme;
pub mod transcript;
pub mod verifier;

pub use codec::{decode, encode, DecodeError, SignatureError, TaggedSignature};
pub use scheme::SignatureScheme;
pub use transcript::{FieldTooLong, Transcript};
pub use verifier::{
    construct_verifier, construct_verifier_for, Ed25519VerifyingKey, Sr25519VerifyingKey,
    Verifier, VerifyFailure, VerifyingKey,
};

#[cfg(test)]
mod proptests;
