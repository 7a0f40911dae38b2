//! Configuration for diphone synthesis

use serde::{Deserialize, Serialize};

/// Configuration passed into every synthesis component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Whether to pronounce words or spell them letter by letter
    #[serde(default)]
    pub mode: SynthMode,

    /// Blend unit boundaries with overlap-add instead of plain concatenation
    #[serde(default)]
    pub crossfade: bool,

    /// Crossfade overlap window in milliseconds
    #[serde(default = "default_crossfade_window_ms")]
    pub crossfade_window_ms: f64,

    /// Sample rate of the inventory and of the output in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// What to do when no unit can be found for a diphone
    #[serde(default)]
    pub missing_unit_policy: MissingUnitPolicy,

    /// Hand emphasis markers to the emphasis hook
    #[serde(default)]
    pub emphasis: bool,
}

/// Front-end reading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SynthMode {
    /// Pronounce words through the lexicon
    #[default]
    Speak,
    /// Spell every character separately
    Spell,
}

/// Policy for diphones whose emergency search finds nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingUnitPolicy {
    /// Drop the unit, leaving an audible gap, and keep going
    #[default]
    Skip,
    /// Abort the whole synthesis
    FailFast,
}

const fn default_crossfade_window_ms() -> f64 {
    10.0
}

const fn default_sample_rate() -> u32 {
    16_000
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            mode: SynthMode::default(),
            crossfade: false,
            crossfade_window_ms: default_crossfade_window_ms(),
            sample_rate: default_sample_rate(),
            missing_unit_policy: MissingUnitPolicy::default(),
            emphasis: false,
        }
    }
}

impl SynthConfig {
    /// Crossfade overlap window length in samples, `round(window × rate)`
    #[must_use]
    pub fn crossfade_window_samples(&self) -> usize {
        (self.crossfade_window_ms / 1000.0 * f64::from(self.sample_rate)).round() as usize
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("Sample rate must be greater than 0".to_string());
        }

        if !(self.crossfade_window_ms > 0.0 && self.crossfade_window_ms <= 100.0) {
            return Err(format!(
                "Crossfade window must be between 0 and 100 ms, got {}",
                self.crossfade_window_ms
            ));
        }

        if self.crossfade && self.crossfade_window_samples() == 0 {
            return Err("Crossfade window is shorter than one sample".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = SynthConfig::default();

        assert_eq!(config.mode, SynthMode::Speak);
        assert!(!config.crossfade);
        assert!((config.crossfade_window_ms - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.sample_rate, 16_000);
        assert_eq!(config.missing_unit_policy, MissingUnitPolicy::Skip);
        assert!(!config.emphasis);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_window_is_160_samples_at_16khz() {
        assert_eq!(SynthConfig::default().crossfade_window_samples(), 160);
    }

    #[test]
    fn window_follows_sample_rate() {
        let config = SynthConfig {
            sample_rate: 44_100,
            ..Default::default()
        };
        assert_eq!(config.crossfade_window_samples(), 441);
    }

    #[test]
    fn validate_fails_with_zero_sample_rate() {
        let config = SynthConfig {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_with_invalid_window() {
        let mut config = SynthConfig::default();
        config.crossfade_window_ms = 0.0;
        assert!(config.validate().is_err());

        config.crossfade_window_ms = 250.0;
        assert!(config.validate().is_err());

        config.crossfade_window_ms = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_fails_when_window_rounds_to_nothing() {
        let config = SynthConfig {
            crossfade: true,
            crossfade_window_ms: 0.01,
            sample_rate: 8_000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn mode_serializes_lowercase() {
        let speak = serde_json::to_string(&SynthMode::Speak).unwrap();
        let spell = serde_json::to_string(&SynthMode::Spell).unwrap();

        assert_eq!(speak, "\"speak\"");
        assert_eq!(spell, "\"spell\"");
    }

    #[test]
    fn policy_serializes_snake_case() {
        let skip = serde_json::to_string(&MissingUnitPolicy::Skip).unwrap();
        let fail = serde_json::to_string(&MissingUnitPolicy::FailFast).unwrap();

        assert_eq!(skip, "\"skip\"");
        assert_eq!(fail, "\"fail_fast\"");
    }

    #[test]
    fn config_deserializes_from_toml() {
        let toml = r#"
            mode = "spell"
            crossfade = true
            crossfade_window_ms = 5.0
            sample_rate = 22050
            missing_unit_policy = "fail_fast"
            emphasis = true
        "#;

        let config: SynthConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.mode, SynthMode::Spell);
        assert!(config.crossfade);
        assert!((config.crossfade_window_ms - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.sample_rate, 22_050);
        assert_eq!(config.missing_unit_policy, MissingUnitPolicy::FailFast);
        assert!(config.emphasis);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: SynthConfig = toml::from_str("crossfade = true").unwrap();

        assert!(config.crossfade);
        assert_eq!(config.sample_rate, 16_000);
        assert_eq!(config.mode, SynthMode::Speak);
    }
}
