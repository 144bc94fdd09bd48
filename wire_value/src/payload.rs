//! Binary payloads
//!
//! Files, buffers and streams travel through an instruction tree untouched.
//! A payload is reference counted so that every clone points at the same
//! bytes, which lets callers check that a value came through by reference.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// What kind of binary source a payload was created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    File,
    Buffer,
    Stream,
}

#[derive(Clone, PartialEq)]
struct PayloadData {
    kind: PayloadKind,
    name: Option<String>,
    media_type: Option<String>,
    bytes: Vec<u8>,
}

/// Opaque binary value stored inside a tree
#[derive(Clone)]
pub struct Payload(Arc<PayloadData>);

impl Payload {
    fn new(kind: PayloadKind, name: Option<String>, bytes: Vec<u8>) -> Self {
        Self(Arc::new(PayloadData {
            kind,
            name,
            media_type: None,
            bytes,
        }))
    }

    /// Create a file payload with a file name
    pub fn file(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(PayloadKind::File, Some(name.into()), bytes.into())
    }

    /// Create an anonymous in-memory buffer
    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(PayloadKind::Buffer, None, bytes.into())
    }

    /// Create a payload from bytes drained from a stream
    pub fn stream(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(PayloadKind::Stream, None, bytes.into())
    }

    /// Attach a media type such as `image/png`
    pub fn with_media_type(self, media_type: impl Into<String>) -> Self {
        let data = Arc::unwrap_or_clone(self.0);
        Self(Arc::new(PayloadData {
            media_type: Some(media_type.into()),
            ..data
        }))
    }

    pub fn kind(&self) -> PayloadKind {
        self.0.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn media_type(&self) -> Option<&str> {
        self.0.media_type.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    pub fn size(&self) -> usize {
        self.0.bytes.len()
    }

    /// True when both handles share the same allocation
    pub fn ptr_eq(&self, other: &Payload) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Metadata rendered when a payload is JSON encoded
    pub fn metadata(&self) -> serde_json::Value {
        let mut meta = serde_json::Map::new();
        meta.insert("kind".to_string(), serde_json::json!(self.kind()));
        if let Some(name) = self.name() {
            meta.insert("name".to_string(), serde_json::Value::from(name));
        }
        if let Some(media_type) = self.media_type() {
            meta.insert("type".to_string(), serde_json::Value::from(media_type));
        }
        meta.insert("size".to_string(), serde_json::Value::from(self.size()));
        serde_json::Value::Object(meta)
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("media_type", &self.media_type())
            .field("size", &self.size())
            .finish()
    }
}
