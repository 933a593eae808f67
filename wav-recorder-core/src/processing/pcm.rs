/// Scale applied to negative samples (magnitude of `i16::MIN`).
pub const NEGATIVE_SCALE: f32 = 32768.0;

/// Scale applied to non-negative samples (`i16::MAX`).
pub const POSITIVE_SCALE: f32 = 32767.0;

/// Bytes per quantized sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// Convert one f32 sample to 16-bit PCM.
///
/// Clamps to `[-1.0, 1.0]`, then scales negatives by 32768 and everything
/// else by 32767 so that -1.0 reaches `i16::MIN` and 1.0 reaches `i16::MAX`.
/// The product is truncated toward zero. NaN maps to 0.
pub fn quantize_sample(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * NEGATIVE_SCALE) as i16
    } else {
        (clamped * POSITIVE_SCALE) as i16
    }
}

pub fn quantize(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| quantize_sample(s)).collect()
}

/// Quantize and serialize as little-endian bytes.
///
/// Output length = `samples.len() * 2` bytes.
pub fn quantize_to_le_bytes(samples: &[f32]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    for &sample in samples {
        data.extend_from_slice(&quantize_sample(sample).to_le_bytes());
    }
    data
}

/// Map a quantized value back into `[-1.0, 1.0]` using the same scales.
pub fn dequantize_sample(value: i16) -> f32 {
    if value < 0 {
        value as f32 / NEGATIVE_SCALE
    } else {
        value as f32 / POSITIVE_SCALE
    }
}
