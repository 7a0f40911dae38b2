//! Waveform assembly
//!
//! Units are either concatenated as they are, or tapered with a linear
//! fade-in/fade-out envelope and overlap-added so that each unit's fade-in
//! lies on top of the previous unit's fade-out.

use std::borrow::Cow;

use tracing::debug;

use crate::config::SynthConfig;
use crate::error::SynthError;
use crate::types::SampleBuffer;

/// One piece of the output: a recorded unit or inserted silence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Samples of a selected unit
    Unit(&'a [i16]),
    /// This many zero samples
    Silence(usize),
}

impl Segment<'_> {
    /// Number of samples
    pub const fn len(&self) -> usize {
        match self {
            Self::Unit(samples) => samples.len(),
            Self::Silence(len) => *len,
        }
    }

    /// Whether the segment has no samples
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn samples(&self) -> Cow<'_, [i16]> {
        match self {
            Self::Unit(samples) => Cow::Borrowed(*samples),
            Self::Silence(len) => Cow::Owned(vec![0; *len]),
        }
    }
}

/// How segments are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    /// Plain concatenation
    Naive,
    /// Overlap-add with linear ramps of `window` samples
    Crossfade {
        /// Overlap window length in samples
        window: usize,
    },
}

/// Joins segments into one waveform
#[derive(Debug, Clone, Copy)]
pub struct WaveformAssembler {
    mode: AssemblyMode,
    sample_rate: u32,
}

impl WaveformAssembler {
    /// Create an assembler
    #[must_use]
    pub const fn new(mode: AssemblyMode, sample_rate: u32) -> Self {
        Self { mode, sample_rate }
    }

    /// Create an assembler from the crossfade settings of a config
    #[must_use]
    pub fn from_config(config: &SynthConfig) -> Self {
        let mode = if config.crossfade {
            AssemblyMode::Crossfade {
                window: config.crossfade_window_samples(),
            }
        } else {
            AssemblyMode::Naive
        };
        Self::new(mode, config.sample_rate)
    }

    /// Assembly mode in use
    pub const fn mode(&self) -> AssemblyMode {
        self.mode
    }

    /// Join segments into one buffer
    ///
    /// # Errors
    ///
    /// Returns `SynthError::Assembly` if there are no segments or they hold
    /// no samples.
    pub fn assemble(&self, segments: Vec<Segment<'_>>) -> Result<SampleBuffer, SynthError> {
        if segments.is_empty() {
            return Err(SynthError::Assembly("no units to assemble".to_string()));
        }

        let samples = match self.mode {
            AssemblyMode::Naive => concatenate(&segments),
            AssemblyMode::Crossfade { window } => crossfade(&segments, window),
        };

        if samples.is_empty() {
            return Err(SynthError::Assembly("units contain no samples".to_string()));
        }

        debug!(
            "Assembled {} segments into {} samples ({:?})",
            segments.len(),
            samples.len(),
            self.mode
        );
        Ok(SampleBuffer::new(samples, self.sample_rate))
    }
}

fn concatenate(segments: &[Segment<'_>]) -> Vec<i16> {
    let mut output = Vec::with_capacity(segments.iter().map(Segment::len).sum());
    for segment in segments {
        match segment {
            Segment::Unit(samples) => output.extend_from_slice(samples),
            Segment::Silence(len) => output.resize(output.len() + len, 0),
        }
    }
    output
}

fn crossfade(segments: &[Segment<'_>], window: usize) -> Vec<i16> {
    let mut segments = segments.iter();
    let Some(first) = segments.next() else {
        return Vec::new();
    };

    let mut accumulated = apply_window(&first.samples(), window);
    for segment in segments {
        let windowed = apply_window(&segment.samples(), window);
        accumulated = overlap_add(accumulated, &windowed, window);
    }
    accumulated
}

/// Gain envelope: ramp up over `window` samples, flat, ramp down
///
/// The ramp is shortened to `len / 2` when the buffer is shorter than two
/// windows. Ramps include both end points.
pub fn envelope(len: usize, window: usize) -> Vec<f32> {
    let ramp = window.min(len / 2);
    let rising: Vec<f32> = (0..ramp)
        .map(|i| if ramp > 1 { i as f32 / (ramp - 1) as f32 } else { 0.0 })
        .collect();

    let mut gains = vec![1.0_f32; len];
    gains[..ramp].copy_from_slice(&rising);
    for (gain, up) in gains[len - ramp..].iter_mut().zip(&rising) {
        *gain = 1.0 - up;
    }

    gains
}

/// Multiply samples by their envelope, truncating toward zero
pub fn apply_window(samples: &[i16], window: usize) -> Vec<i16> {
    envelope(samples.len(), window)
        .into_iter()
        .zip(samples)
        .map(|(gain, &sample)| (f32::from(sample) * gain) as i16)
        .collect()
}

/// Sum `next` onto the end of `accumulated`, overlapping by up to `window`
///
/// The overlap is `window` samples unless either buffer is shorter than
/// that. Sums saturate at the i16 range.
pub fn overlap_add(mut accumulated: Vec<i16>, next: &[i16], window: usize) -> Vec<i16> {
    let overlap = window.min(accumulated.len()).min(next.len());
    let start = accumulated.len() - overlap;

    let (overlapping, rest) = next.split_at(overlap);
    for (slot, &sample) in accumulated[start..].iter_mut().zip(overlapping) {
        *slot = saturate(i32::from(*slot) + i32::from(sample));
    }
    accumulated.extend_from_slice(rest);
    accumulated
}

fn saturate(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
