// THEORY:
// Column scans never look at each other, so the scan stage splits cleanly across
// threads. The image is cut into contiguous bands of columns, one per worker; each
// worker returns its samples in column order and the bands are concatenated in the
// same order, giving exactly the sequence a sequential scan would.
//
// Workers borrow the image through a thread scope, so nothing is copied and no
// worker outlives the call.

use crate::core_modules::color_match::color_match::Threshold;
use crate::core_modules::column_scan::{ColumnSample, column_scan};
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::plot_image::PlotImage;
use std::ops::Range;

/// Bands narrower than this are not worth a thread of their own.
const MIN_COLUMNS_PER_WORKER: u32 = 64;

/// Splits `columns` into at most `workers` contiguous bands of near-equal width.
pub fn column_bands(columns: Range<u32>, workers: usize) -> Vec<Range<u32>> {
    let width = columns.end.saturating_sub(columns.start);
    if width == 0 {
        return Vec::new();
    }

    let by_width = width.div_ceil(MIN_COLUMNS_PER_WORKER).max(1);
    let workers = (workers.max(1) as u32).min(by_width);
    let band = width.div_ceil(workers);

    (0..workers)
        .map(|i| {
            let start = columns.start + i * band;
            start..(start + band).min(columns.end)
        })
        .filter(|r| !r.is_empty())
        .collect()
}

/// Scans `columns` on a scoped pool sized to the machine.
pub fn scan_columns_parallel<I: PlotImage + Sync + ?Sized>(
    image: &I,
    target: &Pixel,
    columns: Range<u32>,
    threshold: Threshold,
) -> Vec<ColumnSample> {
    scan_columns_with_workers(image, target, columns, threshold, num_cpus::get())
}

/// Scans `columns` with at most `workers` threads.
pub fn scan_columns_with_workers<I: PlotImage + Sync + ?Sized>(
    image: &I,
    target: &Pixel,
    columns: Range<u32>,
    threshold: Threshold,
    workers: usize,
) -> Vec<ColumnSample> {
    let bands = column_bands(columns, workers);
    tracing::debug!(bands = bands.len(), "scanning columns in parallel");

    if bands.len() <= 1 {
        return bands
            .into_iter()
            .flat_map(|band| column_scan::scan_columns(image, target, band, threshold))
            .collect();
    }

    std::thread::scope(|scope| {
        let handles: Vec<_> = bands
            .into_iter()
            .map(|band| {
                scope.spawn(move || column_scan::scan_columns(image, target, band, threshold))
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(samples) => samples,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
