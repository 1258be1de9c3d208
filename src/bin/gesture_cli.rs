use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use gesture_trainer::analysis::{
    ChannelVector, ClassLabel, DebounceFilter, SampleBatch, SequenceClassifier, SignalNormalizer,
    TrainingSampleChecker, CHANNEL_COUNT, NULL_CLASS_LABEL,
};
use gesture_trainer::calibration::{CalibrationPose, CalibrationProcedure, CalibrationProfile};
use gesture_trainer::pipeline::GesturePipeline;
use gesture_trainer::tuning::TunableRegistry;
use gesture_trainer::{AppConfig, CheckOutcome};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(
    name = "gesture_cli",
    about = "Offline calibration and training-data checks for Gesture Trainer"
)]
struct Cli {
    /// Configuration file (defaults to assets/gesture_config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run both calibration poses from recorded batches and print the profile
    Calibrate {
        /// JSON array of readings captured upright
        #[arg(long)]
        upright: PathBuf,
        /// JSON array of readings captured upside down
        #[arg(long)]
        upside_down: PathBuf,
        /// Write the resulting profile here
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check a recorded training gesture
    CheckSample {
        #[arg(long)]
        input: PathBuf,
    },
    /// Normalize recorded readings with a saved profile, one JSON object per
    /// reading keyed by the configured channel labels
    Normalize {
        #[arg(long)]
        profile: PathBuf,
        #[arg(long)]
        input: PathBuf,
    },
    /// Show the tunable parameters, optionally validating new values
    Tunables {
        /// NAME=VALUE, may be repeated
        #[arg(long = "set")]
        assignments: Vec<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);

    match cli.command {
        Commands::Calibrate {
            upright,
            upside_down,
            output,
        } => run_calibrate(&config, &upright, &upside_down, output),
        Commands::CheckSample { input } => run_check_sample(&config, &input),
        Commands::Normalize { profile, input } => run_normalize(&config, &profile, &input),
        Commands::Tunables { assignments } => run_tunables(&config, &assignments),
    }
}

fn run_calibrate(
    config: &AppConfig,
    upright: &Path,
    upside_down: &Path,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let mut procedure = CalibrationProcedure::new(&config.calibration);
    let mut rounds = Vec::with_capacity(CalibrationPose::ALL.len());

    for (pose, path) in [
        (CalibrationPose::Upright, upright),
        (CalibrationPose::UpsideDown, upside_down),
    ] {
        let batch = load_batch(path)?;
        let outcome = procedure
            .submit(pose, batch)
            .with_context(|| format!("calibrating {} from {}", pose, path.display()))?;
        rounds.push(PoseRound { pose, outcome });
    }

    let faulted = rounds.iter().any(|round| round.outcome.is_fault());
    let profile = procedure.profile().copied();
    let report = CalibrationReport {
        rounds: &rounds,
        profile: profile.as_ref(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let (Some(path), Some(profile)) = (output_path, profile) {
        let json = serde_json::to_string_pretty(&profile)?;
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    if faulted || profile.is_none() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::from(0))
    }
}

fn run_check_sample(config: &AppConfig, input: &Path) -> Result<ExitCode> {
    let batch = load_batch(input)?;
    let outcome = TrainingSampleChecker::new(&config.quality).check(&batch);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(ExitCode::from(0))
}

fn run_normalize(config: &AppConfig, profile_path: &Path, input: &Path) -> Result<ExitCode> {
    let contents = fs::read_to_string(profile_path)
        .with_context(|| format!("reading {}", profile_path.display()))?;
    let profile: CalibrationProfile = serde_json::from_str(&contents)
        .with_context(|| format!("parsing profile {}", profile_path.display()))?;
    let normalizer = SignalNormalizer::new(&profile)
        .with_context(|| format!("profile {} cannot normalize", profile_path.display()))?;

    let labels = &config.stream.channel_labels;
    let batch = load_batch(input)?;
    let mut normalized = [0.0; CHANNEL_COUNT];
    for raw in batch.iter() {
        normalizer.normalize_into(raw, &mut normalized);
        let reading: serde_json::Map<String, serde_json::Value> = labels
            .iter()
            .zip(normalized)
            .map(|(label, value)| (label.clone(), serde_json::Value::from(value)))
            .collect();
        println!("{}", serde_json::to_string(&reading)?);
    }
    Ok(ExitCode::from(0))
}

fn run_tunables(config: &AppConfig, assignments: &[String]) -> Result<ExitCode> {
    let pipeline = GesturePipeline::new(DetachedStage, DetachedStage);
    let mut registry = TunableRegistry::attach(&pipeline, &config.tuning);
    let mut rejected = false;

    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        if let Err(err) = registry.set_by_name(name, value) {
            eprintln!("Rejected {assignment}: {err}");
            rejected = true;
        }
    }

    println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
    Ok(ExitCode::from(if rejected { 2 } else { 0 }))
}

fn parse_assignment(assignment: &str) -> Result<(&str, f64)> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got {assignment:?}"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("parsing value in {assignment:?}"))?;
    Ok((name.trim(), value))
}

fn load_batch(path: &Path) -> Result<SampleBatch> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let rows: Vec<Vec<f64>> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing readings in {}", path.display()))?;
    if rows.is_empty() {
        bail!("{} contains no readings", path.display());
    }
    SampleBatch::from_rows(rows.as_slice()).with_context(|| format!("reading batch {}", path.display()))
}

/// Stand-in for both pipeline stages when only parameter bounds matter
struct DetachedStage;

impl SequenceClassifier for DetachedStage {
    fn predict(&mut self, _sample: &ChannelVector) -> ClassLabel {
        NULL_CLASS_LABEL
    }

    fn set_rejection_coefficient(&mut self, _coefficient: f64) {}

    fn recompute_rejection_thresholds(&mut self) {}
}

impl DebounceFilter for DetachedStage {
    fn filter(&mut self, label: ClassLabel) -> ClassLabel {
        label
    }

    fn set_timeout_duration(&mut self, _timeout_ms: u32) {}
}

#[derive(Serialize)]
struct PoseRound {
    pose: CalibrationPose,
    outcome: CheckOutcome,
}

#[derive(Serialize)]
struct CalibrationReport<'a> {
    rounds: &'a [PoseRound],
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a CalibrationProfile>,
}
