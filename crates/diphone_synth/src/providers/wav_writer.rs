//! WAV file output

use std::path::PathBuf;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use crate::error::SynthError;
use crate::ports::WaveformSink;
use crate::types::SampleBuffer;

/// Writes waveforms as mono 16-bit PCM WAV files
#[derive(Debug, Clone)]
pub struct WavFileSink {
    path: PathBuf,
}

impl WavFileSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WaveformSink for WavFileSink {
    fn write(&self, waveform: &SampleBuffer) -> Result<(), SynthError> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: waveform.sample_rate(),
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut writer = WavWriter::create(&self.path, spec)?;
        for &sample in waveform.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;

        debug!(
            "Wrote {} samples to {}",
            waveform.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hound::WavReader;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn writes_mono_16_bit_pcm() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let waveform = SampleBuffer::new(vec![0, 100, -100, i16::MAX], 16_000);

        WavFileSink::new(&path).write(&waveform).unwrap();

        let reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(samples, waveform.samples());
    }

    #[test]
    fn unwritable_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        let waveform = SampleBuffer::new(vec![1], 16_000);

        assert!(WavFileSink::new(path).write(&waveform).is_err());
    }
}
