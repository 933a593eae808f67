use parking_lot::Mutex;

use crate::models::error::RecorderError;
use crate::models::wav_blob::WavBlob;
use crate::traits::export_sink::ExportSink;

/// Export sink that keeps every delivered blob in memory.
#[derive(Default)]
pub struct MemorySink {
    blobs: Mutex<Vec<WavBlob>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.lock().is_empty()
    }

    pub fn last(&self) -> Option<WavBlob> {
        self.blobs.lock().last().cloned()
    }

    /// Remove and return everything delivered so far.
    pub fn take(&self) -> Vec<WavBlob> {
        std::mem::take(&mut *self.blobs.lock())
    }
}

impl ExportSink for MemorySink {
    fn deliver(&self, blob: WavBlob) -> Result<(), RecorderError> {
        self.blobs.lock().push(blob);
        Ok(())
    }
}
