//! Speaker output through the default audio device

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use tracing::debug;

use crate::error::SynthError;
use crate::ports::WaveformSink;
use crate::types::SampleBuffer;

/// Plays waveforms on the default output device
///
/// `write` blocks until the waveform has been played.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakerSink;

impl SpeakerSink {
    /// Create a sink for the default output device
    pub const fn new() -> Self {
        Self
    }
}

/// Mono rodio source over a copy of the waveform
fn source(waveform: &SampleBuffer) -> SamplesBuffer<i16> {
    SamplesBuffer::new(1, waveform.sample_rate(), waveform.samples().to_vec())
}

impl WaveformSink for SpeakerSink {
    fn write(&self, waveform: &SampleBuffer) -> Result<(), SynthError> {
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| SynthError::Playback(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| SynthError::Playback(e.to_string()))?;

        sink.append(source(waveform));
        sink.sleep_until_end();

        debug!("Played {} ms of audio", waveform.duration_ms());
        Ok(())
    }
}
