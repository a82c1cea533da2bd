//! tracecutter - keep a time window of a `time,value` csv and re-zero its clock.

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracetracer::core_modules::trace_window::{self, TimeWindow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "tracecutter")]
#[command(version, about = "Cut a time window out of a time,value csv", long_about = None)]
struct Cli {
    /// Start time (inclusive), in seconds or as a duration like 1m30s
    #[arg(long, default_value = "0", value_parser = trace_window::parse_seconds, allow_negative_numbers = true)]
    start: f64,

    /// End time (inclusive), in seconds or as a duration like 1m30s
    #[arg(long, default_value = "0", value_parser = trace_window::parse_seconds, allow_negative_numbers = true)]
    end: f64,

    /// Input csv path
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Output csv path
    #[arg(long = "out", value_name = "FILE")]
    output: PathBuf,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let output = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;

    let window = TimeWindow::new(cli.start, cli.end);
    let kept = trace_window::cut(BufReader::new(input), BufWriter::new(output), window)?;
    tracing::info!(kept, start = cli.start, end = cli.end, "wrote trace window");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_filter = if cli.verbose {
        "warn,tracetracer=debug,tracecutter=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tracecutter: {err:#}");
            ExitCode::FAILURE
        }
    }
}
