//! Envelope abstraction and the concrete v1 envelope record.

use serde::{Deserialize, Serialize};

/// What the verification path needs to read from a message.
pub trait Envelope {
    /// Twin id the envelope claims to originate from.
    fn source_twin(&self) -> u32;

    /// Hex encoded tagged signature, if the envelope is signed.
    fn signature(&self) -> Option<&str>;
}

/// Twin id plus an optional connection (session) id on that twin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub twin: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
}

impl Address {
    pub fn twin(twin: u32) -> Self {
        Self { twin, connection: None }
    }
}

/// Envelope body kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Message {
    Request { command: String },
    Response,
    Error { code: u32, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeV1 {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub timestamp: u64,
    pub expiration: u64,
    pub source: Address,
    pub destination: Address,
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation: Option<String>,
    #[serde(default, with = "hex_bytes")]
    pub payload: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl EnvelopeV1 {
    /// Parse an envelope from its JSON form.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

impl Envelope for EnvelopeV1 {
    fn source_twin(&self) -> u32 {
        self.source.twin
    }

    fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

impl<E: Envelope + ?Sized> Envelope for &E {
    fn source_twin(&self) -> u32 {
        (**self).source_twin()
    }

    fn signature(&self) -> Option<&str> {
        (**self).signature()
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}
