//! turnpoint-bench: CLI tool for analysis parameter experimentation and diagnostics.
//!
//! Builds a stroke from pointer samples (a built-in shape or a JSON file
//! of points), runs the curve analysis on it with configurable
//! parameters and prints per-stage diagnostics. Useful for:
//!
//! - Tuning the walk step bounds against real strokes
//! - Seeing how the cluster divisor changes the final point count
//! - Measuring per-stage durations
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin turnpoint-bench -- [OPTIONS] [POINTS_JSON]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod shapes;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use turnpoint_core::diagnostics::{AnalysisDiagnostics, Clock, analyze_with_diagnostics};
use turnpoint_core::{Analysis, AnalysisConfig, Point, StrokeBuilder, kurbo};

use crate::shapes::Shape;

/// Curve analysis parameter experimentation and diagnostics.
///
/// Runs turning point detection, cluster reduction and region sizing on
/// a stroke and prints detailed per-stage timing and count diagnostics.
#[derive(Parser)]
#[command(name = "turnpoint-bench", version)]
struct Cli {
    /// JSON file with an array of `{"x": .., "y": ..}` pointer samples.
    ///
    /// When omitted, the stroke is generated from `--shape`.
    points_path: Option<PathBuf>,

    /// Built-in stroke shape used when no points file is given.
    #[arg(long, value_enum, default_value_t = Shape::SCurve)]
    shape: Shape,

    /// Number of pointer samples for the built-in shape.
    #[arg(long, default_value_t = 200, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(2..))]
    samples: usize,

    /// Walk steps per unit of arc length.
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_STEP_SCALE)]
    step_scale: f64,

    /// Lower bound on the number of walk steps.
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_MIN_STEPS)]
    min_steps: f64,

    /// Upper bound on the number of walk steps.
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_MAX_STEPS)]
    max_steps: f64,

    /// Floor on the sampler's step distance.
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_MIN_SAMPLE_STEP)]
    min_sample_step: f64,

    /// Cluster threshold is curve length divided by this.
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_CLUSTER_DIVISOR)]
    cluster_divisor: f64,

    /// Side length of a region with no neighbors.
    #[arg(long, default_value_t = AnalysisConfig::DEFAULT_RECT_SIDE)]
    default_rect_side: f64,

    /// Disable cluster reduction.
    #[arg(long)]
    no_reduce: bool,

    /// Also resample the stroke into a display polyline.
    #[arg(long)]
    sample_line: bool,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,

    /// Print the final points and their regions after the report.
    #[arg(long)]
    print_points: bool,

    /// Full analysis config as a JSON string.
    ///
    /// When provided, all other analysis parameter flags are ignored.
    /// The JSON must be a valid `AnalysisConfig` serialization; missing
    /// fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

/// Build an [`AnalysisConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual parameter flags are ignored.  Otherwise, a config is
/// assembled from the individual flags.
fn config_from_cli(cli: &Cli) -> Result<AnalysisConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(AnalysisConfig {
        step_scale: cli.step_scale,
        min_steps: cli.min_steps,
        max_steps: cli.max_steps,
        min_sample_step: cli.min_sample_step,
        cluster_divisor: cli.cluster_divisor,
        default_rect_side: cli.default_rect_side,
        reduce_clusters: !cli.no_reduce,
        sample_line: cli.sample_line,
    })
}

/// Load pointer samples from the points file, or generate the shape.
fn samples_from_cli(cli: &Cli) -> Result<Vec<Point>, String> {
    let Some(ref path) = cli.points_path else {
        return Ok(cli.shape.samples(cli.samples));
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("Error parsing {}: {e}", path.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let samples = match samples_from_cli(&cli) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let curve = StrokeBuilder::from_samples(&samples);
    match cli.points_path {
        Some(ref path) => {
            tracing::info!(path = %path.display(), samples = samples.len(), "loaded stroke");
        }
        None => {
            tracing::info!(shape = ?cli.shape, samples = samples.len(), "generated stroke");
        }
    }
    tracing::debug!(?config, runs = cli.runs, "starting analysis");

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        match analyze_with_diagnostics(&curve, &config, &StdClock) {
            Ok((analysis, diagnostics)) => {
                if cli.json {
                    match serde_json::to_string_pretty(&diagnostics) {
                        Ok(json) => println!("{json}"),
                        Err(e) => {
                            eprintln!("Error serializing diagnostics: {e}");
                            return ExitCode::FAILURE;
                        }
                    }
                } else {
                    println!("{}", diagnostics.report());
                }

                // Print points on the first run only.
                if run == 0 {
                    if analysis.is_empty() {
                        tracing::warn!("stroke produced no turning points");
                    }
                    if cli.print_points {
                        print_points(&analysis);
                    }
                }

                all_diagnostics.push(diagnostics);
            }
            Err(e) => {
                tracing::error!(error = %e, "analysis failed");
                return ExitCode::FAILURE;
            }
        }

        if cli.runs > 1 {
            eprintln!();
        }
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    ExitCode::SUCCESS
}

/// Print each final point with its region bounds, then the sampled line
/// as SVG path data when there is one.
fn print_points(analysis: &Analysis) {
    println!();
    for (p, r) in analysis.points.iter().zip(&analysis.rects) {
        let bounds = kurbo::Rect::from(*r);
        println!(
            "({:>9.3}, {:>9.3})  side={:.3}  bounds=[{:.3}, {:.3}, {:.3}, {:.3}]",
            p.x, p.y, r.side, bounds.x0, bounds.y0, bounds.x1, bounds.y1,
        );
    }
    if let Some(ref sampled) = analysis.sampled {
        println!();
        println!("sampled: {}", sampled.as_bez_path().to_svg());
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Function pointer type for extracting a stage duration from diagnostics.
type StageExtractor = fn(&AnalysisDiagnostics) -> Option<Duration>;

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[AnalysisDiagnostics]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    println!();
    println!("{:<24} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(40));

    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("Measure", |d| Some(d.measure.duration)),
        ("Sampling", |d| d.sampling.as_ref().map(|s| s.duration)),
        ("Turning Points", |d| Some(d.turning_points.duration)),
        ("Cluster Reduction", |d| {
            d.cluster_reduction.as_ref().map(|s| s.duration)
        }),
        ("Region Sizing", |d| Some(d.region_sizing.duration)),
    ];

    for (name, extractor) in stage_extractors {
        let stage_durations: Vec<f64> = all_diagnostics
            .iter()
            .filter_map(extractor)
            .map(|dur| dur.as_secs_f64() * 1000.0)
            .collect();

        if stage_durations.is_empty() {
            continue;
        }

        let stage_mean = stage_durations.iter().sum::<f64>() / stage_durations.len() as f64;
        println!("{name:<24} {stage_mean:>10.3}ms");
    }
}
