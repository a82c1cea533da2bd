//! Error types for the tracer and the trace window utility.
//!
//! Every failure is fatal: nothing in the pipeline is retried or recovered,
//! the binaries print the error chain once and exit non-zero. Messages do not
//! repeat their `source`; print with `{:#}` through `anyhow` to see the chain.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which data axis a normalization error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Main error type for tracing a curve out of an image.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The target color string is not 3 or 6 hex digits.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: &'static str },

    /// The match threshold is NaN or outside [0, 1].
    #[error("invalid fuzzy threshold {0}: must be within [0, 1]")]
    InvalidThreshold(f64),

    /// The image file could not be opened or read.
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image bytes are not in a supported format.
    #[error("failed to read image format")]
    Decode(#[from] image::ImageError),

    /// No column contained the target color.
    #[error("did not find any values")]
    NoSamples,

    /// Observed bounds collapse on one axis, so the scale factor is undefined.
    #[error("logic error: got inf bounds or norm terms on the {axis} axis")]
    DegenerateBounds { axis: Axis },
}

/// Errors from filtering a `time,value` csv to a time window.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("line {line}: want time,val pairs: got missing ,")]
    MissingComma { line: usize },

    #[error("line {line}: missing value")]
    MissingValue { line: usize },

    #[error("line {line}: unable to parse time")]
    BadTime {
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("line {line}: unable to parse val")]
    BadValue {
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for tracer operations
pub type Result<T> = std::result::Result<T, TraceError>;
