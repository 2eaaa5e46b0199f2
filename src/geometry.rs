//! Ring geometry and progress angles derived from the widget state.

use std::f64::consts::PI;

/// Smallest accepted surface edge length in pixels.
pub const MIN_SIZE: u32 = 100;
/// Largest accepted surface edge length. Matches the per-canvas area cap
/// browsers enforce (16384 x 16384 pixels).
pub const MAX_SIZE: u32 = 16_384;
/// Surface edge length used when none is configured.
pub const DEFAULT_SIZE: u32 = 300;

/// Top of the circle, where every progress arc begins.
pub const START_ANGLE: f64 = 1.5 * PI;
/// One full turn.
pub const FULL_ANGLE: f64 = 2.0 * PI;

/// Pixel measurements of the ring for one surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub size: u32,
    pub half_size: f64,
    pub radius: f64,
    pub line_width: f64,
    pub guide_line_width: f64,
    pub font_size: f64,
}

impl Geometry {
    /// Compute the ring measurements so the thicker of the two strokes is
    /// inscribed in the surface.
    pub fn compute(size: u32, small_guide: bool) -> Self {
        let unit = size as f64 / 100.0;
        let half_size = size as f64 / 2.0;

        let (guide_scale, line_scale) = if small_guide { (3.0, 6.0) } else { (6.0, 3.0) };
        let guide_line_width = unit * guide_scale;
        let line_width = unit * line_scale;

        let thicker = line_width.max(guide_line_width);

        Self {
            size,
            half_size,
            radius: half_size - thicker / 2.0,
            line_width,
            guide_line_width,
            font_size: half_size / 2.0,
        }
    }
}

/// Start and end angle of the progress arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAngles {
    pub start: f64,
    pub end: f64,
    pub counter_clockwise: bool,
}

impl ProgressAngles {
    pub fn compute(progress: f64, counter_clockwise: bool) -> Self {
        let end_offset = (FULL_ANGLE / 100.0) * progress;
        let end = if counter_clockwise {
            START_ANGLE - end_offset
        } else {
            START_ANGLE + end_offset
        };
        Self {
            start: START_ANGLE,
            end,
            counter_clockwise,
        }
    }

    /// Angular distance covered by the arc, always non-negative.
    pub fn sweep(&self) -> f64 {
        (self.end - self.start).abs()
    }
}
