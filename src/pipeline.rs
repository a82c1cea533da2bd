// THEORY:
// The `pipeline` module is the top-level API of the tracer. It sequences the leaf
// stages into a single call: image in, data-space points out.
//
// Stages:
// 1.  Decode: read the file once, decode it, release the handle.
// 2.  Scan: one `ColumnSample` per column that contains the target color.
// 3.  Select: optionally keep only the longest gap-tolerant run of columns.
// 4.  Normalize: pin the observed extremes to the caller's axis bounds.
//
// Every stage runs to completion before the next starts and any failure aborts
// the trace, so callers either get the full series or an error, never a prefix.

use crate::core_modules::color_match::color_match::Threshold;
use crate::core_modules::column_scan::column_scan;
use crate::core_modules::normalizer::{self, TracePoint};
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::plot_image::{self, PlotImage};
use crate::core_modules::run_selector::{self, MaxGap};
use crate::error::{Result, TraceError};
use crate::parallel_pipeline;
use std::path::Path;

// Re-export key data structures for the public API.
pub use crate::core_modules::column_scan::ColumnSample;
pub use crate::core_modules::normalizer::AxisRange;

pub const DEFAULT_COLOR: &str = "#000";
pub const DEFAULT_FUZZY_THRESHOLD: Threshold = 0.85;
pub const DEFAULT_LONGEST_GAP: MaxGap = 0;

/// Configuration for the TracePipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    /// Hex color of the curve, 3 or 6 digits with an optional leading `#`.
    pub color: String,
    /// Data-space bounds the leftmost and rightmost traced columns map to.
    pub x_target: AxisRange,
    /// Data-space bounds the lowest and highest traced heights map to.
    pub y_target: AxisRange,
    /// Keep only the longest continuous run of columns.
    pub only_longest: bool,
    /// Missing columns tolerated inside a run.
    pub longest_gap: MaxGap,
    /// Color similarity in [0, 1]; 1.0 requires an exact match.
    pub fuzzy_threshold: Threshold,
    /// Scan columns on a worker pool.
    pub parallel: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            x_target: AxisRange::default(),
            y_target: AxisRange::default(),
            only_longest: true,
            longest_gap: DEFAULT_LONGEST_GAP,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            parallel: false,
        }
    }
}

/// The traced series plus what it took to get there.
#[derive(Debug, Clone)]
pub struct Trace {
    /// Columns that matched, before run selection.
    pub columns_matched: usize,
    /// Samples kept by run selection, in column order.
    pub samples: Vec<ColumnSample>,
    /// The samples in data coordinates, same order.
    pub points: Vec<TracePoint>,
}

/// A validated tracer, ready to run over any number of images.
#[derive(Debug, Clone)]
pub struct TracePipeline {
    target: Pixel,
    config: TraceConfig,
}

impl TracePipeline {
    pub fn new(config: TraceConfig) -> Result<Self> {
        let target = Pixel::from_hex(&config.color)?;
        let t = config.fuzzy_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(TraceError::InvalidThreshold(t));
        }
        Ok(Self { target, config })
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn target(&self) -> Pixel {
        self.target
    }

    /// Decodes the image at `path` and traces it.
    pub fn trace_path(&self, path: &Path) -> Result<Trace> {
        let plot = plot_image::load_plot(path)?;
        self.trace(&plot)
    }

    /// Traces an already-decoded image.
    pub fn trace<I: PlotImage + Sync + ?Sized>(&self, image: &I) -> Result<Trace> {
        // Stage 1: Column Scan
        let samples = self.scan(image);
        let columns_matched = samples.len();
        tracing::debug!(
            columns = image.bounds().width(),
            matched = columns_matched,
            "scanned columns"
        );
        if samples.is_empty() {
            return Err(TraceError::NoSamples);
        }

        // Stage 2: Run Selection
        let samples = if self.config.only_longest {
            let run = run_selector::longest_run(&samples, self.config.longest_gap).to_vec();
            tracing::debug!(
                kept = run.len(),
                first = run.first().map(|s| s.x),
                last = run.last().map(|s| s.x),
                "selected longest run"
            );
            run
        } else {
            samples
        };

        // Stage 3: Normalization
        let points: Vec<TracePoint> =
            normalizer::normalize(&samples, self.config.x_target, self.config.y_target)?;

        Ok(Trace {
            columns_matched,
            samples,
            points,
        })
    }

    fn scan<I: PlotImage + Sync + ?Sized>(&self, image: &I) -> Vec<ColumnSample> {
        let columns = image.bounds().columns();
        let threshold = self.config.fuzzy_threshold;
        if self.config.parallel {
            parallel_pipeline::scan_columns_parallel(image, &self.target, columns, threshold)
        } else {
            column_scan::scan_columns(image, &self.target, columns, threshold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;
    use image::{Rgba, RgbaImage};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn blank(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, WHITE)
    }

    #[test]
    fn defaults_match_command_line_defaults() {
        let config = TraceConfig::default();
        assert_eq!(config.color, "#000");
        assert_eq!(config.x_target, AxisRange::new(0.0, 1.0));
        assert_eq!(config.y_target, AxisRange::new(0.0, 1.0));
        assert!(config.only_longest);
        assert_eq!(config.longest_gap, 0);
        assert_eq!(config.fuzzy_threshold, 0.85);
        assert!(!config.parallel);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let bad_color = TraceConfig {
            color: "#12345".into(),
            ..Default::default()
        };
        assert!(matches!(
            TracePipeline::new(bad_color),
            Err(TraceError::InvalidColor { .. })
        ));

        for t in [-0.1, 1.5, f64::NAN] {
            let bad_threshold = TraceConfig {
                fuzzy_threshold: t,
                ..Default::default()
            };
            assert!(matches!(
                TracePipeline::new(bad_threshold),
                Err(TraceError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn points_are_the_normalized_samples() {
        let mut img = blank(6, 6);
        for (x, row) in [(0, 5), (1, 3), (2, 4), (3, 0), (4, 2)] {
            img.put_pixel(x, row, BLACK);
        }
        let config = TraceConfig {
            x_target: AxisRange::new(10.0, 20.0),
            y_target: AxisRange::new(-3.0, 3.0),
            ..Default::default()
        };
        let trace = TracePipeline::new(config.clone()).unwrap().trace(&img).unwrap();

        let expected =
            normalizer::normalize(&trace.samples, config.x_target, config.y_target).unwrap();
        assert_eq!(trace.points, expected);
        assert_eq!(trace.points[3], TracePoint { x: 17.5, y: 3.0 });
    }

    #[test]
    fn blank_image_finds_no_values() {
        let pipeline = TracePipeline::new(TraceConfig::default()).unwrap();
        let err = pipeline.trace(&blank(5, 5)).unwrap_err();
        assert!(matches!(err, TraceError::NoSamples));
        assert_eq!(err.to_string(), "did not find any values");
    }

    #[test]
    fn stray_marks_are_dropped_by_run_selection() {
        let mut img = blank(20, 10);
        // a short legend mark
        img.put_pixel(0, 0, BLACK);
        img.put_pixel(1, 0, BLACK);
        // the curve
        for x in 5..15 {
            img.put_pixel(x, 9 - (x - 5), BLACK);
        }

        let pipeline = TracePipeline::new(TraceConfig::default()).unwrap();
        let trace = pipeline.trace(&img).unwrap();
        assert_eq!(trace.columns_matched, 12);
        assert_eq!(trace.samples.len(), 10);
        assert_eq!(trace.samples[0].x, 5);
        assert_eq!(trace.points.first().unwrap().x, 0.0);
        assert_eq!(trace.points.last().unwrap().y, 1.0);
    }

    #[test]
    fn disabling_run_selection_keeps_every_column() {
        let mut img = blank(20, 10);
        img.put_pixel(0, 0, BLACK);
        for x in 5..15 {
            img.put_pixel(x, 9, BLACK);
        }

        let config = TraceConfig {
            only_longest: false,
            ..Default::default()
        };
        let trace = TracePipeline::new(config).unwrap().trace(&img).unwrap();
        assert_eq!(trace.samples.len(), 11);
        assert_eq!(trace.points[0].y, 1.0);
        assert_eq!(trace.points[1].y, 0.0);
    }

    #[test]
    fn flat_selected_run_is_degenerate() {
        let mut img = blank(10, 10);
        for x in 2..8 {
            img.put_pixel(x, 4, BLACK);
        }
        let pipeline = TracePipeline::new(TraceConfig::default()).unwrap();
        let err = pipeline.trace(&img).unwrap_err();
        assert!(matches!(err, TraceError::DegenerateBounds { axis: Axis::Y }));
    }

    #[test]
    fn gap_tolerance_bridges_missing_columns() {
        let mut img = blank(12, 12);
        for x in [0, 1, 2, 5, 6, 7, 8] {
            img.put_pixel(x, 11 - x, BLACK);
        }

        let strict = TracePipeline::new(TraceConfig::default()).unwrap();
        assert_eq!(strict.trace(&img).unwrap().samples.len(), 4);

        let tolerant = TracePipeline::new(TraceConfig {
            longest_gap: 2,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(tolerant.trace(&img).unwrap().samples.len(), 7);
    }
}
