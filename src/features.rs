//! Shape bookkeeping for the input feature tensor.
//!
//! The tensor itself is produced by an external [`FeatureGenerator`](crate::pipeline::FeatureGenerator);
//! here we only know how many channels it must carry.

use crate::types::LabelGridError;

/// Channel count of the input tensor, driven by the optional feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputChannels(usize);

impl InputChannels {
    pub fn from_flags(use_constant: bool, use_intensity: bool) -> Self {
        match (use_constant, use_intensity) {
            (true, true) => Self(8),
            (true, false) | (false, true) => Self(6),
            (false, false) => Self(4),
        }
    }

    #[inline]
    pub fn count(self) -> usize {
        self.0
    }
}

/// Dense `(size, size, channels)` input tensor.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    pub shape: [usize; 3],
    pub data: Vec<f32>,
}

impl InputTensor {
    pub fn new(shape: [usize; 3], data: Vec<f32>) -> Result<Self, LabelGridError> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(LabelGridError::InvalidConfig(format!(
                "input tensor data length {} does not match shape {:?}",
                data.len(),
                shape
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn zeros(shape: [usize; 3]) -> Self {
        Self {
            data: vec![0.0; shape.iter().product()],
            shape,
        }
    }
}

/// Ensure an input tensor shape matches the target grid and feature flags.
pub fn validate_input_shape(
    shape: [usize; 3],
    size: u32,
    channels: InputChannels,
) -> Result<(), LabelGridError> {
    let size = size as usize;
    let expected = [size, size, channels.count()];
    if shape != expected {
        return Err(LabelGridError::InputShapeMismatch {
            expected,
            actual: shape,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_count_follows_flags() {
        assert_eq!(InputChannels::from_flags(true, true).count(), 8);
        assert_eq!(InputChannels::from_flags(true, false).count(), 6);
        assert_eq!(InputChannels::from_flags(false, true).count(), 6);
        assert_eq!(InputChannels::from_flags(false, false).count(), 4);
    }

    #[test]
    fn shape_validation() {
        let channels = InputChannels::from_flags(false, true);
        assert!(validate_input_shape([16, 16, 6], 16, channels).is_ok());
        let err = validate_input_shape([16, 16, 8], 16, channels).unwrap_err();
        assert!(matches!(
            err,
            LabelGridError::InputShapeMismatch {
                expected: [16, 16, 6],
                actual: [16, 16, 8]
            }
        ));
        assert!(validate_input_shape([16, 15, 6], 16, channels).is_err());
    }

    #[test]
    fn tensor_length_is_checked() {
        assert!(InputTensor::new([2, 2, 4], vec![0.0; 16]).is_ok());
        assert!(InputTensor::new([2, 2, 4], vec![0.0; 15]).is_err());
    }
}
