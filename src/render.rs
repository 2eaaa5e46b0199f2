// ============================================================================
// RENDERING
// ============================================================================

use crate::color::Color;
use crate::format::FormattedProgress;
use crate::geometry::{Geometry, ProgressAngles, FULL_ANGLE};
use crate::scene::{DrawCommand, Scene};
use crate::widget::Style;

/// Build the full frame for the current widget state.
///
/// Order matters: clear, diagnostics overlay, guide ring, progress arc, label.
pub(crate) fn compose(
    geometry: &Geometry,
    angles: &ProgressAngles,
    style: &Style,
    formatted: &FormattedProgress,
    diagnostics: bool,
) -> Scene {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear);

    if diagnostics {
        add_diagnostics_overlay(&mut scene, geometry);
    }

    let center = geometry.half_size;

    if style.guide_visible {
        scene.add_command(DrawCommand::Arc {
            cx: center,
            cy: center,
            radius: geometry.radius,
            start_angle: 0.0,
            end_angle: FULL_ANGLE,
            counter_clockwise: false,
            line_width: geometry.guide_line_width,
            line_cap: formatted.line_cap,
            color: style.guide_color,
        });
    }

    scene.add_command(DrawCommand::Arc {
        cx: center,
        cy: center,
        radius: geometry.radius,
        start_angle: angles.start,
        end_angle: angles.end,
        counter_clockwise: angles.counter_clockwise,
        line_width: geometry.line_width,
        line_cap: formatted.line_cap,
        color: style.progress_color,
    });

    scene.add_command(DrawCommand::Text {
        x: center,
        y: center,
        text: formatted.label.clone(),
        font_size: geometry.font_size,
        color: style.font_color,
    });

    scene
}

/// Crosshair through the centre plus a 1px border, for checking alignment.
pub(crate) fn add_diagnostics_overlay(scene: &mut Scene, geometry: &Geometry) {
    let size = geometry.size as f64;
    let half = geometry.half_size;
    let color = Color::GREEN_YELLOW;

    scene.add_command(DrawCommand::Line {
        x0: 0.0,
        y0: half,
        x1: size,
        y1: half,
        width: 1.0,
        color,
    });
    scene.add_command(DrawCommand::Line {
        x0: half,
        y0: 0.0,
        x1: half,
        y1: size,
        width: 1.0,
        color,
    });
    scene.add_command(DrawCommand::Rect {
        x: 0.0,
        y: 0.0,
        width: size - 1.0,
        height: size - 1.0,
        line_width: 1.0,
        color,
    });
}
