//! Diphone synthesizer CLI
//!
//! Speaks a phrase through a directory of diphone recordings and a CMU
//! pronouncing dictionary, and saves the result as a WAV file or plays it
//! on the default audio device.

#![allow(clippy::print_stdout)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
#[cfg(feature = "playback")]
use diphone_synth::SpeakerSink;
use diphone_synth::{
    CmuDictLexicon, InventorySource, LexiconSource, MissingUnitPolicy, SampleBuffer, SynthConfig,
    SynthMode, Synthesizer, Volume, WavDirectoryInventory, WavFileSink, WaveformSink,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Diphone synthesizer CLI
#[derive(Debug, Parser)]
#[command(name = "diphone-synth")]
#[command(author, version, about = "Concatenative diphone speech synthesizer", long_about = None)]
struct Cli {
    /// Phrase to speak
    phrase: String,

    /// Directory of diphone WAV files, one unit per file named `a-b.wav`
    #[arg(long, default_value = "./diphones")]
    diphones: PathBuf,

    /// CMU pronouncing dictionary file
    #[arg(long)]
    lexicon: PathBuf,

    /// Save the output waveform to this WAV file
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Play the output on the default audio device
    #[arg(short, long)]
    play: bool,

    /// Spell the phrase letter by letter
    #[arg(short, long)]
    spell: bool,

    /// Crossfade unit boundaries instead of plain concatenation
    #[arg(short, long)]
    crossfade: bool,

    /// Output volume in percent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// TOML file with synthesis settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort when a diphone has no usable unit instead of leaving a gap
    #[arg(long)]
    fail_fast: bool,

    /// Print what was recovered during synthesis as JSON
    #[arg(long)]
    report: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command-line flags over a loaded configuration
    fn apply_to(&self, mut config: SynthConfig) -> SynthConfig {
        if self.spell {
            config.mode = SynthMode::Spell;
        }
        if self.crossfade {
            config.crossfade = true;
        }
        if self.fail_fast {
            config.missing_unit_policy = MissingUnitPolicy::FailFast;
        }
        config
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Read a TOML config file, or the defaults when there is none
fn load_config(path: Option<&Path>) -> anyhow::Result<SynthConfig> {
    let Some(path) = path else {
        return Ok(SynthConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(feature = "playback")]
fn play(waveform: &SampleBuffer) -> anyhow::Result<()> {
    SpeakerSink::new()
        .write(waveform)
        .context("Failed to play audio")
}

#[cfg(not(feature = "playback"))]
fn play(_waveform: &SampleBuffer) -> anyhow::Result<()> {
    anyhow::bail!("Playback is not available; rebuild with `--features playback`")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries only the report
    let filter = log_filter_from_verbosity(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.apply_to(load_config(cli.config.as_deref())?);
    let volume = cli.volume.map(Volume::new).transpose()?.unwrap_or_default();

    let lexicon = CmuDictLexicon::new(&cli.lexicon)
        .load()
        .with_context(|| format!("Failed to load lexicon {}", cli.lexicon.display()))?;
    let inventory = WavDirectoryInventory::new(&cli.diphones, config.sample_rate)
        .load()
        .with_context(|| format!("Failed to load diphones from {}", cli.diphones.display()))?;
    info!(
        "Loaded {} words and {} diphone units",
        lexicon.len(),
        inventory.len()
    );

    let synth = Synthesizer::new(config, &lexicon, &inventory)?;
    let (waveform, report) = synth.synthesize_with_report(&cli.phrase)?;
    let waveform = volume.apply(&waveform);

    if let Some(path) = &cli.outfile {
        WavFileSink::new(path)
            .write(&waveform)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {} ms of audio to {}", waveform.duration_ms(), path.display());
    }

    if cli.play {
        play(&waveform)?;
    } else if cli.outfile.is_none() {
        warn!("Neither --outfile nor --play given, the waveform is discarded");
    }

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("diphone-synth").chain(args.iter().copied()))
    }

    #[test]
    fn parses_minimal_invocation() {
        let cli = parse(&["--lexicon", "cmudict.dict", "hello world"]).unwrap();

        assert_eq!(cli.phrase, "hello world");
        assert_eq!(cli.lexicon, PathBuf::from("cmudict.dict"));
        assert_eq!(cli.diphones, PathBuf::from("./diphones"));
        assert!(cli.outfile.is_none());
        assert!(!cli.spell && !cli.crossfade && !cli.fail_fast && !cli.report && !cli.play);
        assert_eq!(cli.volume, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parses_short_flags() {
        let cli = parse(&["--lexicon", "d", "-s", "-c", "-o", "out.wav", "-vv", "abc"]).unwrap();

        assert!(cli.spell);
        assert!(cli.crossfade);
        assert!(!cli.play);
        assert_eq!(cli.outfile, Some(PathBuf::from("out.wav")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parses_play_flag() {
        assert!(parse(&["--lexicon", "d", "-p", "hi"]).unwrap().play);
        assert!(parse(&["--lexicon", "d", "--play", "hi"]).unwrap().play);
    }

    #[test]
    fn lexicon_is_required() {
        assert!(parse(&["hello"]).is_err());
    }

    #[test]
    fn phrase_is_required() {
        assert!(parse(&["--lexicon", "d"]).is_err());
    }

    #[test]
    fn volume_is_range_checked() {
        assert_eq!(
            parse(&["--lexicon", "d", "--volume", "40", "hi"]).unwrap().volume,
            Some(40)
        );
        assert!(parse(&["--lexicon", "d", "--volume", "101", "hi"]).is_err());
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&["--lexicon", "d", "--spell", "--fail-fast", "hi"]).unwrap();
        let config = SynthConfig {
            crossfade: true,
            ..SynthConfig::default()
        };

        let merged = cli.apply_to(config);

        assert_eq!(merged.mode, SynthMode::Spell);
        assert!(merged.crossfade);
        assert_eq!(merged.missing_unit_policy, MissingUnitPolicy::FailFast);
    }

    #[test]
    fn config_file_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "crossfade = true\ncrossfade_window_ms = 5.0").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert!(config.crossfade);
        assert_eq!(config.crossfade_window_samples(), 80);
        assert_eq!(config.sample_rate, 16_000);
    }

    #[test]
    fn missing_config_means_defaults() {
        assert_eq!(load_config(None).unwrap(), SynthConfig::default());
        assert!(load_config(Some(Path::new("/nonexistent/synth.toml"))).is_err());
    }

    #[test]
    fn log_filter_levels() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(7), "trace");
    }
}
