use crate::models::error::RecorderError;
use crate::models::wav_blob::WavBlob;

/// Consumer of exported recordings (file writer, upload, UI download, ...).
pub trait ExportSink: Send + Sync {
    fn deliver(&self, blob: WavBlob) -> Result<(), RecorderError>;
}

impl<F> ExportSink for F
where
    F: Fn(WavBlob) -> Result<(), RecorderError> + Send + Sync,
{
    fn deliver(&self, blob: WavBlob) -> Result<(), RecorderError> {
        self(blob)
    }
}
