use serde::{Deserialize, Serialize};

use super::audio_models::ChannelMode;
use super::error::RecorderError;

/// Media type attached to exported WAV blobs unless overridden.
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Default upstream block size in samples per channel.
pub const DEFAULT_BUFFER_BLOCK_SIZE: usize = 4096;

/// Configuration for a recorder session.
///
/// Deserializes from camelCase JSON. The legacy keys `channelType`,
/// `bufferLen` and `type` are accepted as aliases; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecorderConfig {
    /// Mono or stereo capture (default: stereo). Fixed for a session's lifetime.
    #[serde(alias = "channelType")]
    pub channel_mode: ChannelMode,

    /// Samples per channel per delivered block (default: 4096).
    ///
    /// Advisory: only affects how the audio source chunks its output.
    #[serde(alias = "bufferLen")]
    pub buffer_block_size: usize,

    /// Media type attached to exported blobs (default: `audio/wav`).
    #[serde(alias = "type")]
    pub mime_type: String,
}

impl RecorderConfig {
    pub fn mono() -> Self {
        Self {
            channel_mode: ChannelMode::Mono,
            ..Self::default()
        }
    }

    pub fn stereo() -> Self {
        Self {
            channel_mode: ChannelMode::Stereo,
            ..Self::default()
        }
    }

    /// Parse a full configuration from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, RecorderError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RecorderError::InvalidConfiguration(format!("failed to parse config: {}", e)))?;
        config.validate().map_err(RecorderError::InvalidConfiguration)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_block_size == 0 {
            return Err("buffer block size must be positive".into());
        }
        if self.mime_type.trim().is_empty() {
            return Err("mime type must not be empty".into());
        }
        Ok(())
    }

    /// Returns a copy with the fields present in `update` applied.
    ///
    /// The channel mode is never taken from `update`; callers decide what to
    /// do with a conflicting mode.
    pub fn merged(&self, update: &ConfigUpdate) -> Self {
        let mut next = self.clone();
        if let Some(size) = update.buffer_block_size {
            next.buffer_block_size = size;
        }
        if let Some(ref mime_type) = update.mime_type {
            next.mime_type = mime_type.clone();
        }
        next
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            channel_mode: ChannelMode::Stereo,
            buffer_block_size: DEFAULT_BUFFER_BLOCK_SIZE,
            mime_type: WAV_MIME_TYPE.to_string(),
        }
    }
}

/// Partial configuration applied with merge semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    #[serde(alias = "channelType")]
    pub channel_mode: Option<ChannelMode>,

    #[serde(alias = "bufferLen")]
    pub buffer_block_size: Option<usize>,

    #[serde(alias = "type")]
    pub mime_type: Option<String>,
}

impl ConfigUpdate {
    pub fn from_json(json: &str) -> Result<Self, RecorderError> {
        serde_json::from_str(json)
            .map_err(|e| RecorderError::InvalidConfiguration(format!("failed to parse config update: {}", e)))
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_buffer_block_size(mut self, size: usize) -> Self {
        self.buffer_block_size = Some(size);
        self
    }
}
