// THEORY:
// The `ColumnScan` module turns one vertical strip of the plot into at most one
// number: where the curve crosses that column.
//
// Algorithm:
// 1.  Walk the rows of column `x` from the top of the image to the bottom.
// 2.  The first matching row opens a run; every following matching row extends it.
// 3.  The first non-matching row after the run has opened ends the scan. Matching
//     rows further down (a legend swatch, a second band of the same color) are never
//     looked at, so each column yields a single-valued reading.
// 4.  Each row in the run contributes its height above the bottom row, so the bottom
//     of the image reads low and the top reads high, as on a plot's y axis.
// 5.  The column's value is the mean of those heights. A column with no match yields
//     nothing at all, not zero.

use crate::core_modules::color_match::color_match::{Threshold, fuzzy_same};
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::plot_image::PlotImage;
use std::ops::Range;

/// One reading per image column: the column index and the curve height there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSample {
    pub x: u32,
    pub y: f64,
}

pub mod column_scan {
    use super::*;

    /// Mean height of the first contiguous run of `target` in column `x`,
    /// or `None` when the column never matches.
    pub fn mean_of_first_run<I: PlotImage + ?Sized>(
        image: &I,
        target: &Pixel,
        x: u32,
        threshold: Threshold,
    ) -> Option<f64> {
        let bounds = image.bounds();
        let bottom = bounds.bottom_row()?;

        let mut sum: u64 = 0;
        let mut count: u64 = 0;
        for y in bounds.rows() {
            if fuzzy_same(target, &image.pixel_at(x, y), threshold) {
                sum += (bottom - y) as u64;
                count += 1;
            } else if count > 0 {
                break;
            }
        }

        (count > 0).then(|| sum as f64 / count as f64)
    }

    /// Scans `x` and pairs the result with the column index.
    pub fn scan_column<I: PlotImage + ?Sized>(
        image: &I,
        target: &Pixel,
        x: u32,
        threshold: Threshold,
    ) -> Option<ColumnSample> {
        let y = mean_of_first_run(image, target, x, threshold)?;
        tracing::trace!(x, y, "column matched");
        Some(ColumnSample { x, y })
    }

    /// Scans a band of columns left to right, skipping columns without a match.
    pub fn scan_columns<I: PlotImage + ?Sized>(
        image: &I,
        target: &Pixel,
        columns: Range<u32>,
        threshold: Threshold,
    ) -> Vec<ColumnSample> {
        columns
            .filter_map(|x| scan_column(image, target, x, threshold))
            .collect()
    }
}
