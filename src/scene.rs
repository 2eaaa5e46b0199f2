// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use rusttype::{Font, Scale};

use crate::color::Color;
use crate::config::LineCap;
use crate::surface::Surface;

/// One drawing operation, in surface pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        width: f64,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        line_width: f64,
        color: Color,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        counter_clockwise: bool,
        line_width: f64,
        line_cap: LineCap,
        color: Color,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        color: Color,
    },
}

/// Ordered list of commands making up one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Arcs in draw order.
    pub fn arcs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Arc { .. }))
    }

    /// Rasterize every command onto `surface`. Text is skipped when no font
    /// is available.
    pub fn render(&self, surface: &mut Surface, font: Option<&Font<'static>>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear => surface.clear(),
                DrawCommand::Line {
                    x0,
                    y0,
                    x1,
                    y1,
                    width,
                    color,
                } => {
                    surface.stroke_line(*x0, *y0, *x1, *y1, *width, *color);
                }
                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    line_width,
                    color,
                } => {
                    surface.stroke_rect(*x, *y, *width, *height, *line_width, *color);
                }
                DrawCommand::Arc {
                    cx,
                    cy,
                    radius,
                    start_angle,
                    end_angle,
                    counter_clockwise,
                    line_width,
                    line_cap,
                    color,
                } => {
                    surface.stroke_arc(
                        *cx,
                        *cy,
                        *radius,
                        *start_angle,
                        *end_angle,
                        *counter_clockwise,
                        *line_width,
                        *line_cap,
                        *color,
                    );
                }
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    color,
                } => {
                    if let Some(font) = font {
                        let scale = Scale::uniform(*font_size as f32);
                        surface.draw_text(*x, *y, text, font, scale, *color);
                    }
                }
            }
        }
    }
}
