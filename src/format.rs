//! Label text and per-frame line cap for the progress arc.

use crate::config::LineCap;

/// Output of one formatter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedProgress {
    pub label: String,
    pub line_cap: LineCap,
}

/// Run the formatter for the current state.
pub fn format_progress(
    progress: f64,
    line_cap: LineCap,
    float_mode: bool,
    percent_sign_visible: bool,
) -> FormattedProgress {
    let mut label = if float_mode {
        float_label(progress)
    } else {
        integer_label(progress)
    };
    if percent_sign_visible {
        label.push('%');
    }
    FormattedProgress {
        label,
        line_cap: resolve_line_cap(line_cap, progress),
    }
}

/// A round cap on an empty arc would still paint a dot, so zero progress
/// always strokes with a butt cap.
pub fn resolve_line_cap(line_cap: LineCap, progress: f64) -> LineCap {
    if line_cap == LineCap::Round && progress <= 0.0 {
        LineCap::Butt
    } else {
        line_cap
    }
}

/// The stored value as reported to callers: one decimal in float mode,
/// otherwise a plain integer. No padding and no percent sign.
pub fn progress_value(progress: f64, float_mode: bool) -> String {
    to_fixed(progress, if float_mode { 1 } else { 0 })
}

fn float_label(progress: f64) -> String {
    let fixed = to_fixed(progress, 1);
    if fixed == "100.0" {
        "100".to_string()
    } else {
        fixed
    }
}

fn integer_label(progress: f64) -> String {
    // below 99 the label never runs ahead of the real value; from 99 up
    // it rounds so 99.5 reads as done
    let whole = if progress < 99.0 {
        progress.floor() as i64
    } else {
        to_fixed(progress, 0).parse::<i64>().unwrap_or(100)
    };
    format!("{:02}", whole)
}

/// Fixed-point formatting that rounds the exact binary value to nearest
/// and breaks exact ties upwards.
///
/// `format!` alone rounds ties to even, which would turn 99.5 into "100"
/// but 98.5 into "98".
pub fn to_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    let exact = value.mul_add(scale, -scaled) == 0.0;
    if exact && (scaled - scaled.floor()) == 0.5 {
        format!("{:.*}", digits, (scaled.floor() + 1.0) / scale)
    } else {
        format!("{:.*}", digits, value)
    }
}
