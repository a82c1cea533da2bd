// THEORY:
// This file is the main entry point for the `tracetracer` library crate. It exposes
// the `TracePipeline` and its configuration as the high-level interface: hand it a
// plot image and a curve color, get back the numeric series the curve draws.
//
// The stages themselves (`core_modules`) stay public so the command-line tools and
// tests can drive them individually, but most callers only need `pipeline`.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::normalizer::TracePoint;
pub use core_modules::pixel::pixel::Pixel;
pub use core_modules::trace_window::TimeWindow;
pub use error::{Result, TraceError, WindowError};
pub use pipeline::{AxisRange, Trace, TraceConfig, TracePipeline};
