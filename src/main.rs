//! tracetracer - recover the series behind a plotted curve.
//!
//! Prints one `x,y` line per traced column to stdout. Diagnostics go to stderr.

use anyhow::Context;
use clap::{ArgAction, Parser};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracetracer::pipeline::{
    AxisRange, DEFAULT_COLOR, DEFAULT_FUZZY_THRESHOLD, TraceConfig, TracePipeline,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tracetracer")]
#[command(version, about = "Trace a colored curve in a plot image back into x,y data", long_about = None)]
struct Cli {
    /// Plot image (PNG, JPEG, GIF, ...)
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Hex color to search for, will fuzzy match
    #[arg(long, default_value = DEFAULT_COLOR)]
    color: String,

    /// y value at minimum (used to scale)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    ymin: f64,

    /// y value at maximum (used to scale)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    ymax: f64,

    /// x value at minimum (used to scale)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    xmin: f64,

    /// x value at maximum (used to scale)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    xmax: f64,

    /// Only get the longest continuous run of the color
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
    )]
    onlylongest: bool,

    /// Number of missing pixels allowed to still be considered continuous
    #[arg(long, default_value_t = 0)]
    longestgap: usize,

    /// Match if rgb values are this similar (0..1)
    #[arg(long = "fuzzy-thresh", alias = "fuzzyThresh", default_value_t = DEFAULT_FUZZY_THRESHOLD)]
    fuzzy_thresh: f64,

    /// Scan image columns on all cores
    #[arg(long)]
    parallel: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> TraceConfig {
        TraceConfig {
            color: self.color.clone(),
            x_target: AxisRange::new(self.xmin, self.xmax),
            y_target: AxisRange::new(self.ymin, self.ymax),
            only_longest: self.onlylongest,
            longest_gap: self.longestgap,
            fuzzy_threshold: self.fuzzy_thresh,
            parallel: self.parallel,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,tracetracer=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let pipeline = TracePipeline::new(cli.to_config())?;
    let trace = pipeline.trace_path(&cli.image)?;
    tracing::info!(
        image = %cli.image.display(),
        matched = trace.columns_matched,
        emitted = trace.points.len(),
        "traced curve"
    );

    let mut out = BufWriter::new(io::stdout().lock());
    for point in &trace.points {
        writeln!(out, "{point}").context("failed to write output")?;
    }
    out.flush().context("failed to write output")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tracetracer: {err:#}");
            ExitCode::FAILURE
        }
    }
}
