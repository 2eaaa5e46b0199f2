// ============================================================================
// DRAWING SURFACE
// ============================================================================

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::color::Color;
use crate::config::LineCap;
use crate::geometry::FULL_ANGLE;

/// Square RGBA8 frame buffer owned by one widget.
///
/// Pixels are stored row-major with straight alpha. A cleared surface is
/// fully transparent.
#[derive(Debug, Clone)]
pub struct Surface {
    id: String,
    width: usize,
    height: usize,
    frame: Vec<u8>,
}

impl Surface {
    /// Byte length of a `size` x `size` RGBA frame, or `None` when it does
    /// not fit in `usize`.
    pub fn frame_len(size: u32) -> Option<usize> {
        let side = usize::try_from(size).ok()?;
        side.checked_mul(side)?.checked_mul(4)
    }

    /// `size` must already have passed `frame_len`.
    pub(crate) fn new(id: impl Into<String>, size: u32) -> Self {
        let side = size as usize;
        Self {
            id: id.into(),
            width: side,
            height: side,
            frame: vec![0; side * side * 4],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let p = &self.frame[idx..idx + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Resize in place; the buffer is reused and left transparent.
    pub(crate) fn resize(&mut self, size: u32) {
        let side = size as usize;
        self.width = side;
        self.height = side;
        self.frame.clear();
        self.frame.resize(side * side * 4, 0);
    }

    pub(crate) fn clear(&mut self) {
        self.frame.fill(0);
    }

    /// Source-over blend of `color` scaled by `coverage`.
    pub(crate) fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let sa = color.alpha() * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let dst = &mut self.frame[idx..idx + 4];
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| -> u8 {
            ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as u8
        };
        let out = [
            mix(color.r, dst[0]),
            mix(color.g, dst[1]),
            mix(color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ];
        dst.copy_from_slice(&out);
    }

    /// Stroke a circular arc centred on `radius`, sweeping like a 2D canvas
    /// `arc()`: a sweep of a full turn or more is a whole circle, a zero sweep
    /// leaves only the caps.
    pub(crate) fn stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
        line_width: f64,
        line_cap: LineCap,
        color: Color,
    ) {
        let delta = if counter_clockwise {
            start_angle - end_angle
        } else {
            end_angle - start_angle
        };
        let full = delta >= FULL_ANGLE;
        let sweep = if full { FULL_ANGLE } else { delta.rem_euclid(FULL_ANGLE) };
        let half = line_width / 2.0;

        let caps = match line_cap {
            LineCap::Butt => None,
            LineCap::Round => Some([
                (cx + radius * start_angle.cos(), cy + radius * start_angle.sin()),
                (cx + radius * end_angle.cos(), cy + radius * end_angle.sin()),
            ]),
        };

        let reach = radius + half + 2.0;
        let (min_x, max_x) = ((cx - reach).floor() as i32, (cx + reach).ceil() as i32);
        let (min_y, max_y) = ((cy - reach).floor() as i32, (cy + reach).ceil() as i32);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                let (dx, dy) = (px - cx, py - cy);

                let mut coverage = 0.0f64;
                if sweep > 0.0 {
                    let dist = (dx * dx + dy * dy).sqrt();
                    let angle = dy.atan2(dx);
                    let offset = if counter_clockwise {
                        (start_angle - angle).rem_euclid(FULL_ANGLE)
                    } else {
                        (angle - start_angle).rem_euclid(FULL_ANGLE)
                    };
                    if full || offset <= sweep {
                        coverage = (half + 0.5 - (dist - radius).abs()).clamp(0.0, 1.0);
                    }
                }
                if let Some(ends) = caps {
                    for (ex, ey) in ends {
                        let d = ((px - ex).powi(2) + (py - ey).powi(2)).sqrt();
                        coverage = coverage.max((half + 0.5 - d).clamp(0.0, 1.0));
                    }
                }
                if coverage > 0.01 {
                    self.blend_pixel(x, y, color, coverage as f32);
                }
            }
        }
    }

    pub(crate) fn stroke_line(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        thickness: f64,
        color: Color,
    ) {
        let pad = thickness.ceil() + 1.0;
        let min_x = (x0.min(x1) - pad).floor() as i32;
        let max_x = (x0.max(x1) + pad).ceil() as i32;
        let min_y = (y0.min(y1) - pad).floor() as i32;
        let max_y = (y0.max(y1) + pad).ceil() as i32;
        let dx = x1 - x0;
        let dy = y1 - y0;
        let len_sq = dx * dx + dy * dy;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5 - x0;
                let py = y as f64 + 0.5 - y0;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = x0 + t * dx;
                let ly = y0 + t * dy;
                let dist = ((lx - (x as f64 + 0.5)).powi(2) + (ly - (y as f64 + 0.5)).powi(2)).sqrt();
                let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa as f32);
                }
            }
        }
    }

    pub(crate) fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        thickness: f64,
        color: Color,
    ) {
        let (right, bottom) = (x + width, y + height);
        for (x0, y0, x1, y1) in [
            (x, y, right, y),
            (x, bottom, right, bottom),
            (x, y, x, bottom),
            (right, y, right, bottom),
        ] {
            self.stroke_line(x0, y0, x1, y1, thickness, color);
        }
    }

    /// Draw `text` with its ink box centred on `(x, y)`.
    pub(crate) fn draw_text(&mut self, x: f64, y: f64, text: &str, font: &Font, scale: Scale, color: Color) {
        let v_metrics = font.v_metrics(scale);
        let glyphs: Vec<PositionedGlyph> = font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .collect();
        let (min_x, max_x, min_y, max_y) = text_bounds(&glyphs);
        let width_px = if min_x < max_x { max_x - min_x } else { 0 };
        let height_px = if min_y < max_y { max_y - min_y } else { 0 };
        let offset_x = x.round() as i32 - width_px / 2;
        let offset_y = y.round() as i32 - height_px / 2;
        for glyph in glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = offset_x + gx as i32 + bb.min.x - min_x;
                    let py = offset_y + gy as i32 + bb.min.y - min_y;
                    self.blend_pixel(px, py, color, v);
                });
            }
        }
    }
}

fn text_bounds(glyphs: &[PositionedGlyph]) -> (i32, i32, i32, i32) {
    glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    )
}
