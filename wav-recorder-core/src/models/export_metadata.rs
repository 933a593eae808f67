use serde::{Deserialize, Serialize};

use crate::processing::wav_format::WavHeader;

/// Metadata stored alongside an exported recording.
///
/// Serializable for a JSON sidecar next to the WAV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub id: String,
    pub created_at: String,
    pub file_path: String,
    pub checksum: String,
    pub mime_type: String,
    pub channels: u16,
    pub sample_rate: u32,
    pub data_size: u32,
    pub duration_secs: f64,
}

impl ExportMetadata {
    /// Creates metadata for a freshly written WAV file.
    pub fn new(header: &WavHeader, file_path: &str, checksum: &str, mime_type: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            file_path: file_path.to_string(),
            checksum: checksum.to_string(),
            mime_type: mime_type.to_string(),
            channels: header.channels,
            sample_rate: header.sample_rate,
            data_size: header.data_size,
            duration_secs: header.duration_secs(),
        }
    }
}
