use crate::models::error::RecorderError;

/// Interleave two equal-length channels into `[L0, R0, L1, R1, ...]`.
pub fn interleave(left: &[f32], right: &[f32]) -> Result<Vec<f32>, RecorderError> {
    if left.len() != right.len() {
        return Err(RecorderError::ChannelMismatch {
            expected: left.len(),
            actual: right.len(),
        });
    }

    let mut stereo = Vec::with_capacity(left.len() * 2);
    for (&l, &r) in left.iter().zip(right) {
        stereo.push(l);
        stereo.push(r);
    }
    Ok(stereo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_basic() {
        let left = [1.0, 2.0, 3.0];
        let right = [4.0, 5.0, 6.0];

        let result = interleave(&left, &right).unwrap();

        assert_eq!(result, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn index_law() {
        let left: Vec<f32> = (0..257).map(|i| i as f32 / 257.0).collect();
        let right: Vec<f32> = left.iter().map(|s| -s).collect();

        let result = interleave(&left, &right).unwrap();

        assert_eq!(result.len(), 2 * left.len());
        for i in 0..left.len() {
            assert_eq!(result[2 * i], left[i]);
            assert_eq!(result[2 * i + 1], right[i]);
        }
    }

    #[test]
    fn interleave_empty() {
        assert!(interleave(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn unequal_lengths_rejected() {
        let err = interleave(&[1.0, 2.0], &[4.0, 5.0, 6.0]).unwrap_err();
        assert_eq!(err, RecorderError::ChannelMismatch { expected: 2, actual: 3 });
    }
}
