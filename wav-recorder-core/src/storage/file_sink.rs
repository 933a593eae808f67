use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::models::error::RecorderError;
use crate::models::export_metadata::ExportMetadata;
use crate::models::wav_blob::WavBlob;
use crate::processing::wav_format;
use crate::storage::metadata;
use crate::traits::export_sink::ExportSink;

/// File name used when a sink is created for a directory.
pub const DEFAULT_FILE_NAME: &str = "output.wav";

/// Export sink that saves each delivered WAV to disk.
///
/// Every delivery overwrites the target file. The SHA-256 checksum and
/// header-derived details of the last write are kept as `ExportMetadata`,
/// and optionally written as a sidecar (see `metadata::sidecar_path`).
pub struct FileSink {
    file_path: PathBuf,
    write_sidecar: bool,
    last_export: Mutex<Option<ExportMetadata>>,
}

impl FileSink {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            write_sidecar: false,
            last_export: Mutex::new(None),
        }
    }

    /// Sink writing `output.wav` inside `directory`.
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        Self::new(directory.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Also write a JSON metadata sidecar next to every file.
    pub fn with_metadata_sidecar(mut self) -> Self {
        self.write_sidecar = true;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Metadata of the most recent successful write.
    pub fn last_export(&self) -> Option<ExportMetadata> {
        self.last_export.lock().clone()
    }

    /// Write `blob` to the target file and return its metadata.
    pub fn write(&self, blob: &WavBlob) -> Result<ExportMetadata, RecorderError> {
        let header = wav_format::parse_wav_header(blob.bytes())?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| RecorderError::StorageError(format!("failed to create directory: {}", e)))?;
            }
        }

        fs::write(&self.file_path, blob.bytes())
            .map_err(|e| RecorderError::StorageError(format!("failed to write {}: {}", self.file_path.display(), e)))?;

        let checksum = sha256_hex(blob.bytes());
        let export = ExportMetadata::new(&header, &self.file_path.to_string_lossy(), &checksum, blob.mime_type());

        if self.write_sidecar {
            metadata::write_metadata(&export, &self.file_path)?;
        }

        log::info!(
            "Saved {} bytes ({:.2}s) to {}",
            blob.len(),
            export.duration_secs,
            self.file_path.display()
        );

        *self.last_export.lock() = Some(export.clone());
        Ok(export)
    }
}

impl ExportSink for FileSink {
    fn deliver(&self, blob: WavBlob) -> Result<(), RecorderError> {
        self.write(&blob).map(|_| ())
    }
}

/// SHA-256 hex digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
