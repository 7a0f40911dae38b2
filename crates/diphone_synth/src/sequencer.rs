//! Phoneme stream to diphone keys

use tracing::debug;

use crate::types::{DiphoneKey, PAUSE_PHONE, PauseLength, Pronunciation, PunctuationMarker};

/// Builds diphone key sequences from resolved pronunciations
#[derive(Debug, Clone, Copy, Default)]
pub struct DiphoneSequencer;

impl DiphoneSequencer {
    /// Create a sequencer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Flatten pronunciations into one stream with pause markers
    ///
    /// The stream opens with a plain `pau` boundary, gets `pau4`/`pau2`
    /// after punctuated tokens and always closes with a pause. A phrase
    /// with no phonemes at all yields an empty stream.
    pub fn phone_stream(
        &self,
        pronunciations: &[Pronunciation],
        punctuation: &[PunctuationMarker],
    ) -> Vec<String> {
        if pronunciations.iter().all(Pronunciation::is_empty) {
            return Vec::new();
        }

        let mut stream = vec![PAUSE_PHONE.to_string()];
        let mut markers = punctuation.iter().peekable();

        for (index, pronunciation) in pronunciations.iter().enumerate() {
            stream.extend(pronunciation.phones().iter().map(|phone| bare_phone(phone)));

            while let Some(marker) = markers.next_if(|marker| marker.token_index <= index) {
                if marker.token_index < index {
                    continue;
                }
                if let Some(pause) = PauseLength::for_punctuation(marker.mark) {
                    stream.push(pause.marker().to_string());
                }
            }
        }

        if !stream.last().is_some_and(|last| is_pause(last)) {
            stream.push(PauseLength::Long.marker().to_string());
        }

        stream
    }

    /// Diphone keys for a phrase's pronunciations and punctuation
    pub fn sequence(
        &self,
        pronunciations: &[Pronunciation],
        punctuation: &[PunctuationMarker],
    ) -> Vec<DiphoneKey> {
        let stream = self.phone_stream(pronunciations, punctuation);
        let keys = diphones(&stream);
        debug!("{} phones make {} diphones", stream.len(), keys.len());
        keys
    }
}

/// Pair every adjacent element: a stream of N elements gives N-1 keys
pub fn diphones<S: AsRef<str>>(stream: &[S]) -> Vec<DiphoneKey> {
    stream
        .windows(2)
        .map(|pair| DiphoneKey::pair(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}

/// Lowercase phone symbol with stress digits removed
fn bare_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .collect::<String>()
        .to_lowercase()
}

fn is_pause(element: &str) -> bool {
    element.starts_with(PAUSE_PHONE)
}
