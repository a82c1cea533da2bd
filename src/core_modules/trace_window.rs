// THEORY:
// The `TraceWindow` module cuts a time slice out of a traced series. Input and
// output are the plain `time,value` text the tracer emits; blank lines and `#`
// comments are skipped. Records whose time lies within `[start, end]` survive and
// have their time re-zeroed against the earliest surviving timestamp seen so far.

use crate::error::WindowError;
use std::io::{BufRead, Write};

/// An inclusive time window, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Parses a window bound: plain seconds (`2.5`) or a duration (`1m30s`, `500ms`).
pub fn parse_seconds(input: &str) -> Result<f64, humantime::DurationError> {
    let input = input.trim();
    if let Ok(secs) = input.parse::<f64>() {
        return Ok(secs);
    }
    humantime::parse_duration(input).map(|d| d.as_secs_f64())
}

/// One `time,value` record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub time: f64,
    pub value: f64,
}

/// Parses one line. `Ok(None)` for blank lines and comments.
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_record(line: &str, line_no: usize) -> Result<Option<Record>, WindowError> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (time, value) = line
        .split_once(',')
        .ok_or(WindowError::MissingComma { line: line_no })?;
    if value.is_empty() {
        return Err(WindowError::MissingValue { line: line_no });
    }

    let time = time.parse().map_err(|source| WindowError::BadTime {
        line: line_no,
        source,
    })?;
    let value = value.parse().map_err(|source| WindowError::BadValue {
        line: line_no,
        source,
    })?;
    Ok(Some(Record { time, value }))
}

/// Streams records from `input` to `output`, keeping those inside `window`.
/// Returns the number of records written.
pub fn cut<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    window: TimeWindow,
) -> Result<usize, WindowError> {
    let mut t_min = window.end;
    let mut kept = 0;

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let Some(record) = parse_record(&line, i + 1)? else {
            continue;
        };
        if !window.contains(record.time) {
            continue;
        }

        t_min = t_min.min(record.time);
        writeln!(output, "{:.6},{:.6}", record.time - t_min, record.value)?;
        kept += 1;
    }

    output.flush()?;
    tracing::debug!(kept, "cut trace window");
    Ok(kept)
}
