// THEORY:
// The `RunSelector` stitches per-column readings back into a curve. Gridlines,
// legends and labels drawn in the curve's color produce short, isolated clusters of
// samples; the curve itself is the longest stretch of neighbouring columns.
//
// Two consecutive samples belong to the same run when at most `max_gap` columns are
// missing between them. Runs are ranked by how many samples they hold (not by the
// pixel span they cover), and on a tie the leftmost run wins.

use crate::core_modules::column_scan::ColumnSample;
use std::ops::Range;

/// Number of missing columns tolerated inside a run.
pub type MaxGap = usize;

/// Splits `samples` (sorted by `x`) into maximal runs, returned as index ranges.
pub fn find_runs(samples: &[ColumnSample], max_gap: MaxGap) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let Some(first) = samples.first() else {
        return runs;
    };

    let reach = (max_gap as u64).saturating_add(1);
    let mut start = 0;
    let mut last = first.x as u64;
    for (i, sample) in samples.iter().enumerate().skip(1) {
        let x = sample.x as u64;
        if x > last.saturating_add(reach) {
            runs.push(start..i);
            start = i;
        }
        last = x;
    }
    runs.push(start..samples.len());
    runs
}

/// The longest run of `samples`; the first one wins a tie.
pub fn longest_run(samples: &[ColumnSample], max_gap: MaxGap) -> &[ColumnSample] {
    let runs = find_runs(samples, max_gap);
    tracing::debug!(runs = runs.len(), "split samples into runs");

    // `max_by_key` keeps the last maximum, so compare on reversed index too.
    let best = runs
        .into_iter()
        .enumerate()
        .max_by_key(|(i, run)| (run.len(), std::cmp::Reverse(*i)))
        .map(|(_, run)| run);

    match best {
        Some(run) => &samples[run],
        None => &[],
    }
}
