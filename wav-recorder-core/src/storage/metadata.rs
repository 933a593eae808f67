use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::RecorderError;
use crate::models::export_metadata::ExportMetadata;
use crate::storage::file_sink::sha256_hex;

const SIDECAR_SUFFIX: &str = ".metadata.json";

/// Sidecar location for a recording: `take.wav` → `take.wav.metadata.json`.
pub fn sidecar_path(recording_path: &Path) -> PathBuf {
    let mut name = OsString::from(recording_path.as_os_str());
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Write `metadata` next to the recording and return the sidecar path.
pub fn write_metadata(metadata: &ExportMetadata, recording_path: &Path) -> Result<PathBuf, RecorderError> {
    let path = sidecar_path(recording_path);
    let json = serde_json::to_vec_pretty(metadata)
        .map_err(|e| RecorderError::StorageError(format!("cannot encode sidecar for {}: {}", recording_path.display(), e)))?;
    fs::write(&path, json).map_err(|e| RecorderError::StorageError(format!("cannot write {}: {}", path.display(), e)))?;
    log::debug!("Wrote metadata sidecar {}", path.display());
    Ok(path)
}

/// Load the sidecar for `recording_path` and verify it still describes the file.
///
/// Fails with `StorageError` when the WAV on disk no longer hashes to the
/// recorded checksum.
pub fn read_metadata(recording_path: &Path) -> Result<ExportMetadata, RecorderError> {
    let path = sidecar_path(recording_path);
    let json = fs::read(&path).map_err(|e| RecorderError::StorageError(format!("cannot read {}: {}", path.display(), e)))?;
    let metadata: ExportMetadata = serde_json::from_slice(&json)
        .map_err(|e| RecorderError::StorageError(format!("invalid sidecar {}: {}", path.display(), e)))?;

    let recording = fs::read(recording_path)
        .map_err(|e| RecorderError::StorageError(format!("cannot read {}: {}", recording_path.display(), e)))?;
    let checksum = sha256_hex(&recording);
    if checksum != metadata.checksum {
        return Err(RecorderError::StorageError(format!(
            "{} changed since export (sidecar {}, file {})",
            recording_path.display(),
            metadata.checksum,
            checksum
        )));
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audio_models::ChannelMode;
    use crate::processing::wav_format::{encode_wav, parse_wav_header};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wav_recorder_meta_{}_{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_recording(path: &Path) -> ExportMetadata {
        let bytes = encode_wav(&[0.25; 16], ChannelMode::Mono, 8000).unwrap();
        fs::write(path, &bytes).unwrap();
        let header = parse_wav_header(&bytes).unwrap();
        ExportMetadata::new(&header, &path.to_string_lossy(), &sha256_hex(&bytes), "audio/wav")
    }

    #[test]
    fn sidecar_keeps_recording_extension() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/take.wav")),
            PathBuf::from("/tmp/take.wav.metadata.json")
        );
    }

    #[test]
    fn round_trip_verifies_checksum() {
        let dir = temp_dir("round_trip");
        let recording = dir.join("take.wav");
        let metadata = write_recording(&recording);

        let sidecar = write_metadata(&metadata, &recording).unwrap();

        assert_eq!(sidecar, dir.join("take.wav.metadata.json"));
        assert_eq!(read_metadata(&recording).unwrap(), metadata);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn modified_recording_is_rejected() {
        let dir = temp_dir("tampered");
        let recording = dir.join("take.wav");
        let metadata = write_recording(&recording);
        write_metadata(&metadata, &recording).unwrap();

        let mut bytes = fs::read(&recording).unwrap();
        bytes[44] ^= 0xFF;
        fs::write(&recording, bytes).unwrap();

        assert!(matches!(read_metadata(&recording), Err(RecorderError::StorageError(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_sidecar_is_a_storage_error() {
        let dir = temp_dir("missing");
        let recording = dir.join("take.wav");
        write_recording(&recording);

        assert!(matches!(read_metadata(&recording), Err(RecorderError::StorageError(_))));

        fs::remove_dir_all(&dir).ok();
    }
}
