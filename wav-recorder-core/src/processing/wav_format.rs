//! WAV file format utilities.
//!
//! Generates standard 44-byte RIFF WAV headers, encodes whole recordings as
//! 16-bit PCM, and parses headers back for inspection.

use crate::models::audio_models::ChannelMode;
use crate::models::error::RecorderError;
use crate::processing::pcm;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Bit depth of every file this crate encodes.
pub const BITS_PER_SAMPLE: u16 = 16;

const PCM_FORMAT_CODE: u16 = 1;
const FMT_CHUNK_SIZE: u32 = 16;

/// Generate a 44-byte WAV RIFF header.
///
/// Format: PCM (format code 1), little-endian.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    36 + data_size
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * bit_depth / 8
/// [32-33]  block_align = channels * bit_depth / 8
/// [34-35]  bit_depth
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
///
/// Arithmetic is unchecked; `encode_wav` range-checks the inputs first.
pub(crate) fn generate_wav_header(sample_rate: u32, bit_depth: u16, channels: u16, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let block_align = channels * bit_depth / 8;
    let byte_rate = sample_rate * block_align as u32;
    let chunk_size = 36 + data_size;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&FMT_CHUNK_SIZE.to_le_bytes());
    header[20..22].copy_from_slice(&PCM_FORMAT_CODE.to_le_bytes());
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&bit_depth.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Encode samples as a complete 16-bit PCM WAV file.
///
/// For stereo, `samples` must already be interleaved; `samples.len()` counts
/// every sample across both channels. Output is `44 + 2 * samples.len()` bytes.
pub fn encode_wav(samples: &[f32], channel_mode: ChannelMode, sample_rate: u32) -> Result<Vec<u8>, RecorderError> {
    let data_size = samples
        .len()
        .checked_mul(pcm::BYTES_PER_SAMPLE)
        .and_then(|size| u32::try_from(size).ok())
        .filter(|size| size.checked_add(36).is_some())
        .ok_or_else(|| {
            RecorderError::EncodingFailed(format!("{} samples exceed the 32-bit RIFF size limit", samples.len()))
        })?;
    sample_rate
        .checked_mul(channel_mode.channel_count() as u32 * BITS_PER_SAMPLE as u32 / 8)
        .ok_or_else(|| RecorderError::EncodingFailed(format!("byte rate overflows for {} Hz", sample_rate)))?;

    let header = generate_wav_header(sample_rate, BITS_PER_SAMPLE, channel_mode.channel_count(), data_size);

    let mut wav = Vec::with_capacity(WAV_HEADER_SIZE + data_size as usize);
    wav.extend_from_slice(&header);
    wav.extend_from_slice(&pcm::quantize_to_le_bytes(samples));
    Ok(wav)
}

/// Fields decoded from a 44-byte PCM WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub format_code: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WavHeader {
    pub fn channel_mode(&self) -> Option<ChannelMode> {
        ChannelMode::from_channel_count(self.channels)
    }

    /// Playback length implied by the data size and byte rate.
    pub fn duration_secs(&self) -> f64 {
        if self.byte_rate == 0 {
            return 0.0;
        }
        self.data_size as f64 / self.byte_rate as f64
    }
}

/// Parse the canonical 44-byte header at the start of `bytes`.
pub fn parse_wav_header(bytes: &[u8]) -> Result<WavHeader, RecorderError> {
    if bytes.len() < WAV_HEADER_SIZE {
        return Err(RecorderError::MalformedWav(format!(
            "need {} header bytes, got {}",
            WAV_HEADER_SIZE,
            bytes.len()
        )));
    }

    for (offset, tag) in [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
        if &bytes[offset..offset + 4] != tag {
            return Err(RecorderError::MalformedWav(format!(
                "expected {:?} at offset {}",
                String::from_utf8_lossy(tag),
                offset
            )));
        }
    }

    let fmt_size = read_u32(bytes, 16);
    if fmt_size != FMT_CHUNK_SIZE {
        return Err(RecorderError::MalformedWav(format!("unsupported fmt chunk size: {}", fmt_size)));
    }

    Ok(WavHeader {
        chunk_size: read_u32(bytes, 4),
        format_code: read_u16(bytes, 20),
        channels: read_u16(bytes, 22),
        sample_rate: read_u32(bytes, 24),
        byte_rate: read_u32(bytes, 28),
        block_align: read_u16(bytes, 32),
        bits_per_sample: read_u16(bytes, 34),
        data_size: read_u32(bytes, 40),
    })
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}
