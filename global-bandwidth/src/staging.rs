//! Host side test pattern and output validation.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("kernel failed to copy entry {index} input{lane}={expected} output{lane}={actual}")]
    Mismatch {
        lane: usize,
        index: usize,
        expected: u8,
        actual: u8,
    },

    #[error("output{lane} holds {actual} bytes, expected {expected}")]
    Length {
        lane: usize,
        expected: usize,
        actual: usize,
    },
}

/// `byte[i] == i % 256`
pub fn fill_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Compares a lane output with the staged input, stops at the first mismatch.
pub fn verify_lane(lane: usize, expected: &[u8], actual: &[u8]) -> Result<(), ValidationError> {
    if expected.len() != actual.len() {
        return Err(ValidationError::Length {
            lane,
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    match expected.iter().zip(actual).position(|(e, a)| e != a) {
        Some(index) => Err(ValidationError::Mismatch {
            lane,
            index,
            expected: expected[index],
            actual: actual[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_pattern() {
        let pattern = fill_pattern(1024 * 1024);

        assert_eq!(pattern.len(), 1_048_576);
        assert_eq!(pattern[0], 0);
        assert_eq!(pattern[255], 255);
        assert_eq!(pattern[256], 0);
        assert_eq!(pattern[1_048_575], 255);
        assert!(pattern.iter().enumerate().all(|(i, &b)| b as usize == i % 256));

        assert!(fill_pattern(0).is_empty());
    }

    #[test]
    fn test_verify_lane() {
        let expected = fill_pattern(4096);
        let actual = expected.clone();
        assert_eq!(verify_lane(0, &expected, &actual), Ok(()));
    }

    #[test]
    fn test_verify_lane_mismatch() {
        let expected = fill_pattern(4096);
        let mut actual = expected.clone();
        actual[300] = 0;
        actual[301] = 0;

        let err = verify_lane(1, &expected, &actual).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Mismatch {
                lane: 1,
                index: 300,
                expected: 44,
                actual: 0,
            }
        );
        assert_eq!(
            err.to_string(),
            "kernel failed to copy entry 300 input1=44 output1=0"
        );
    }

    #[test]
    fn test_verify_lane_length() {
        let expected = fill_pattern(64);

        let err = verify_lane(0, &expected, &expected[..32]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Length {
                lane: 0,
                expected: 64,
                actual: 32,
            }
        );
    }
}
