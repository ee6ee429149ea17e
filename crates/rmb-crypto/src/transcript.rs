//! Deterministic transcripts for challenge construction.
//!
//! Fields are appended as `(tag, len, bytes)` records after a domain
//! separator, so signer and verifier derive identical bytes from the same
//! logical content. Lengths are `u32`; a field that does not fit is an error,
//! never a truncated prefix.

use bytes::{BufMut, BytesMut};
use sha2::{Digest, Sha256};

/// Tag used for the domain separator record.
pub const DOMAIN_TAG: u32 = 0;

/// A field too long for its `u32` length prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transcript field {tag} is {len} bytes, over the u32 length limit")]
pub struct FieldTooLong {
    pub tag: u32,
    pub len: usize,
}

fn record_len(tag: u32, len: usize, extra: usize) -> Result<u32, FieldTooLong> {
    len.checked_add(extra)
        .and_then(|total| u32::try_from(total).ok())
        .ok_or(FieldTooLong { tag, len })
}

#[derive(Clone, Debug)]
pub struct Transcript {
    buf: BytesMut,
}

impl Transcript {
    /// Start a transcript with a domain separator record.
    pub fn new(domain: &'static str) -> Result<Self, FieldTooLong> {
        let mut t = Self { buf: BytesMut::with_capacity(256) };
        t.append_str(DOMAIN_TAG, domain)?;
        Ok(t)
    }

    /// Append raw bytes with a tag.
    pub fn append_bytes(&mut self, tag: u32, data: &[u8]) -> Result<&mut Self, FieldTooLong> {
        // tag (u32 be) + len (u32 be) + data
        let len = record_len(tag, data.len(), 0)?;
        self.buf.put_u32(tag);
        self.buf.put_u32(len);
        self.buf.extend_from_slice(data);
        Ok(self)
    }

    /// Append a u64 (big-endian) with a tag.
    pub fn append_u64(&mut self, tag: u32, v: u64) -> &mut Self {
        self.buf.put_u32(tag);
        self.buf.put_u32(8);
        self.buf.put_u64(v);
        self
    }

    /// Append a u32 (big-endian) with a tag.
    pub fn append_u32(&mut self, tag: u32, v: u32) -> &mut Self {
        self.buf.put_u32(tag);
        self.buf.put_u32(4);
        self.buf.put_u32(v);
        self
    }

    /// Append a UTF-8 string with a tag.
    pub fn append_str(&mut self, tag: u32, s: &str) -> Result<&mut Self, FieldTooLong> {
        self.append_bytes(tag, s.as_bytes())
    }

    /// Append an optional value; absence and presence encode differently.
    pub fn append_opt_bytes(&mut self, tag: u32, data: Option<&[u8]>) -> Result<&mut Self, FieldTooLong> {
        match data {
            Some(d) => {
                let len = record_len(tag, d.len(), 1)?;
                self.buf.put_u32(tag);
                self.buf.put_u32(len);
                self.buf.put_u8(1);
                self.buf.extend_from_slice(d);
            }
            None => {
                self.buf.put_u32(tag);
                self.buf.put_u32(1);
                self.buf.put_u8(0);
            }
        }
        Ok(self)
    }

    /// Raw transcript bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// SHA-256 of the transcript contents.
    pub fn finalize(&self) -> [u8; 32] {
        Sha256::digest(&self.buf).into()
    }

    /// Length of the encoded transcript in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
