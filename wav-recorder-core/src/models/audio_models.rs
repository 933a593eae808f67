use serde::{Deserialize, Serialize};

/// Channel layout of a recorder session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    Mono,
    Stereo,
}

impl ChannelMode {
    /// Number of channels carried by this layout (1 or 2).
    pub fn channel_count(&self) -> u16 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }

    pub fn from_channel_count(channels: u16) -> Option<Self> {
        match channels {
            1 => Some(Self::Mono),
            2 => Some(Self::Stereo),
            _ => None,
        }
    }
}

/// Counters for debugging a recorder session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecorderDiagnostics {
    pub blocks_accepted: u64,
    pub blocks_discarded: u64,
    pub samples_buffered: u64,
    pub exports_completed: u64,
}
