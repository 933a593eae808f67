/// A fully-formed WAV file tagged with its media type.
///
/// Immutable once built; independent of the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavBlob {
    bytes: Vec<u8>,
    mime_type: String,
}

impl WavBlob {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for WavBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
