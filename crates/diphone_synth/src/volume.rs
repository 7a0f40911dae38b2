//! Output volume rescaling

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::types::SampleBuffer;

/// Playback volume as a percentage of full scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Volume(u8);

impl Volume {
    /// Highest accepted percentage
    pub const MAX: u8 = 100;

    /// Full scale, the identity transform
    pub const FULL: Self = Self(Self::MAX);

    /// Create a volume from a percentage
    ///
    /// # Errors
    ///
    /// Returns `SynthError::Configuration` for values above 100.
    pub fn new(percent: u8) -> Result<Self, SynthError> {
        if percent > Self::MAX {
            return Err(SynthError::Configuration(format!(
                "Volume must be between 0 and {}, got {percent}",
                Self::MAX
            )));
        }
        Ok(Self(percent))
    }

    /// The percentage
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Linear gain between 0.0 and 1.0
    pub fn gain(self) -> f32 {
        f32::from(self.0) / f32::from(Self::MAX)
    }

    /// Rescale a buffer, truncating toward zero
    #[must_use]
    pub fn apply(self, buffer: &SampleBuffer) -> SampleBuffer {
        if self == Self::FULL {
            return buffer.clone();
        }

        let gain = self.gain();
        // `as` saturates float to int conversions.
        let samples = buffer
            .samples()
            .iter()
            .map(|&sample| (f32::from(sample) * gain) as i16)
            .collect();
        SampleBuffer::new(samples, buffer.sample_rate())
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for Volume {
    type Error = SynthError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<Volume> for u8 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> SampleBuffer {
        SampleBuffer::new(vec![1000, -1000, 3, i16::MAX, i16::MIN], 16_000)
    }

    #[test]
    fn full_volume_is_identity() {
        assert_eq!(Volume::FULL.apply(&buffer()), buffer());
        assert_eq!(Volume::default(), Volume::FULL);
    }

    #[test]
    fn zero_volume_is_silence() {
        let silent = Volume::new(0).unwrap().apply(&buffer());
        assert!(silent.samples().iter().all(|&s| s == 0));
        assert_eq!(silent.len(), 5);
    }

    #[test]
    fn half_volume_truncates_toward_zero() {
        let half = Volume::new(50).unwrap().apply(&buffer());
        assert_eq!(half.samples(), &[500, -500, 1, 16_383, -16_384]);
        assert_eq!(half.sample_rate(), 16_000);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(matches!(Volume::new(101), Err(SynthError::Configuration(_))));
        assert!(Volume::new(100).is_ok());
    }

    #[test]
    fn gain_is_linear() {
        assert!((Volume::new(25).unwrap().gain() - 0.25).abs() < f32::EPSILON);
        assert_eq!(Volume::new(25).unwrap().percent(), 25);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let volume: Volume = serde_json::from_str("40").unwrap();
        assert_eq!(volume.percent(), 40);
        assert!(serde_json::from_str::<Volume>("150").is_err());
    }
}
