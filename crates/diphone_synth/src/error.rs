//! Synthesis errors

use thiserror::Error;

/// Errors raised while turning a raw token into words
///
/// These are always recovered by the normalizer: the token is discarded
/// and the diagnostic is logged and reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Token looks like a date but is not a valid calendar date
    #[error("Invalid date '{token}': {reason}")]
    Date {
        /// The offending token
        token: String,
        /// Why parsing failed
        reason: String,
    },

    /// Token looks like a number but cannot be read out
    #[error("Invalid number '{token}': {reason}")]
    Number {
        /// The offending token
        token: String,
        /// Why parsing failed
        reason: String,
    },
}

impl NormalizeError {
    /// Create a date error
    pub fn date(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Date {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Create a number error
    pub fn number(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Number {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// The token that could not be normalized
    pub fn token(&self) -> &str {
        match self {
            Self::Date { token, .. } | Self::Number { token, .. } => token,
        }
    }
}

/// Errors that can occur during diphone synthesis
#[derive(Debug, Error)]
pub enum SynthError {
    /// Malformed date token
    #[error("Date parse error: {0}")]
    DateParse(String),

    /// Malformed number token
    #[error("Number parse error: {0}")]
    NumberParse(String),

    /// Word could not be pronounced, not even letter by letter
    #[error("No pronunciation for '{0}'")]
    LexiconMiss(String),

    /// Diphone key absent from the inventory
    #[error("Diphone unit missing: {0}")]
    UnitMiss(String),

    /// No inventory key matched any emergency candidate
    #[error("No emergency unit found for {key} (tried: {candidates})")]
    EmergencySearchExhausted {
        /// The requested diphone key
        key: String,
        /// The wildcard candidates that were tried
        candidates: String,
    },

    /// Nothing to assemble
    #[error("Assembly failed: {0}")]
    Assembly(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A unit file could not be used as inventory audio
    #[error("Invalid unit '{key}': {reason}")]
    InvalidUnit {
        /// Inventory key of the unit
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// Filesystem failure in a collaborator
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV decoding or encoding failure
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio device could not be opened or played to
    #[error("Playback error: {0}")]
    Playback(String),
}

impl SynthError {
    /// Create an exhausted emergency search error
    pub fn exhausted(key: impl Into<String>, candidates: &[String]) -> Self {
        let candidates = if candidates.is_empty() {
            "none".to_string()
        } else {
            candidates.join(", ")
        };
        Self::EmergencySearchExhausted {
            key: key.into(),
            candidates,
        }
    }

    /// Create an invalid unit error
    pub fn invalid_unit(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUnit {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl From<NormalizeError> for SynthError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Date { .. } => Self::DateParse(err.to_string()),
            NormalizeError::Number { .. } => Self::NumberParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_error_message() {
        let err = NormalizeError::date("31/02/2001", "day out of range");
        assert_eq!(err.to_string(), "Invalid date '31/02/2001': day out of range");
        assert_eq!(err.token(), "31/02/2001");
    }

    #[test]
    fn number_error_message() {
        let err = NormalizeError::number("12345", "more than four digits");
        assert_eq!(err.to_string(), "Invalid number '12345': more than four digits");
    }

    #[test]
    fn normalize_error_converts_to_matching_variant() {
        let date: SynthError = NormalizeError::date("1/1/1", "bad year").into();
        assert!(matches!(date, SynthError::DateParse(_)));

        let number: SynthError = NormalizeError::number("3rd", "not all digits").into();
        assert_eq!(
            number.to_string(),
            "Number parse error: Invalid number '3rd': not all digits"
        );
    }

    #[test]
    fn lexicon_miss_error_message() {
        let err = SynthError::LexiconMiss("xyzzy".to_string());
        assert_eq!(err.to_string(), "No pronunciation for 'xyzzy'");
    }

    #[test]
    fn unit_miss_error_message() {
        let err = SynthError::UnitMiss("aa-zz".to_string());
        assert_eq!(err.to_string(), "Diphone unit missing: aa-zz");
    }

    #[test]
    fn exhausted_error_lists_candidates() {
        let err = SynthError::exhausted("aa-zz", &["aa-z*".to_string(), "aa-z*".to_string()]);
        assert_eq!(
            err.to_string(),
            "No emergency unit found for aa-zz (tried: aa-z*, aa-z*)"
        );
    }

    #[test]
    fn exhausted_error_without_candidates() {
        let err = SynthError::exhausted("pau", &[]);
        assert_eq!(err.to_string(), "No emergency unit found for pau (tried: none)");
    }

    #[test]
    fn assembly_error_message() {
        let err = SynthError::Assembly("no units".to_string());
        assert_eq!(err.to_string(), "Assembly failed: no units");
    }

    #[test]
    fn configuration_error_message() {
        let err = SynthError::Configuration("sample rate is zero".to_string());
        assert_eq!(err.to_string(), "Configuration error: sample rate is zero");
    }

    #[test]
    fn invalid_unit_error_message() {
        let err = SynthError::invalid_unit("h-e", "stereo audio");
        assert_eq!(err.to_string(), "Invalid unit 'h-e': stereo audio");
    }

    #[test]
    fn playback_error_message() {
        let err = SynthError::Playback("no output device".to_string());
        assert_eq!(err.to_string(), "Playback error: no output device");
    }

    #[test]
    fn io_error_converts() {
        let err: SynthError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
