//! The circular progress widget.
//!
//! Every setter validates first, mutates second and repaints last, all
//! through one `apply_and_render` path. A rejected call returns an error and
//! leaves both the state and the surface untouched.

use log::{debug, trace, warn};
use rusttype::Font;

use crate::color::Color;
use crate::command::WidgetCommand;
use crate::config::{LineCap, WidgetConfig};
use crate::error::WidgetError;
use crate::format::{format_progress, progress_value, FormattedProgress};
use crate::geometry::{Geometry, ProgressAngles, MAX_SIZE, MIN_SIZE};
use crate::host::Host;
use crate::render;
use crate::scene::Scene;
use crate::surface::Surface;

/// Visual settings that do not affect geometry on their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub line_cap: LineCap,
    pub font_color: Color,
    pub progress_color: Color,
    pub guide_color: Color,
    pub guide_visible: bool,
    pub float_mode: bool,
    pub percent_sign_visible: bool,
    pub small_guide: bool,
    pub counter_clockwise: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self::from(&WidgetConfig::default())
    }
}

impl From<&WidgetConfig> for Style {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            line_cap: config.line_cap,
            font_color: config.font_color,
            progress_color: config.progress_color,
            guide_color: config.guide_color,
            guide_visible: config.guide_visible,
            float_mode: config.float_mode,
            percent_sign_visible: config.percent_sign_visible,
            small_guide: config.small_guide,
            counter_clockwise: config.counter_clockwise,
        }
    }
}

/// Mutable widget fields, copied before each change so a rejected
/// mutation can be discarded wholesale.
#[derive(Debug, Clone, PartialEq)]
struct State {
    size: u32,
    progress: f64,
    style: Style,
    diagnostics: bool,
}

/// A ring-shaped progress indicator drawing into its own [`Surface`].
pub struct CircularProgress {
    state: State,
    geometry: Geometry,
    angles: ProgressAngles,
    formatted: FormattedProgress,
    scene: Scene,
    surface: Surface,
    font: Option<Font<'static>>,
}

impl std::fmt::Debug for CircularProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircularProgress")
            .field("surface_id", &self.surface.id())
            .field("size", &self.state.size)
            .field("progress", &self.state.progress)
            .field("label", &self.formatted.label)
            .field("style", &self.state.style)
            .field("diagnostics", &self.state.diagnostics)
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl CircularProgress {
    /// Create a widget, attach its surface under `mount_point` and paint the
    /// first frame at 0% progress.
    pub fn new(
        host: &mut Host,
        mount_point: &str,
        surface_id: &str,
        config: WidgetConfig,
    ) -> Result<Self, WidgetError> {
        if config.diagnostics {
            debug!("new({}, {}, {})", mount_point, surface_id, config.size);
        } else {
            trace!("new({}, {}, {})", mount_point, surface_id, config.size);
        }

        validate_size("new", config.size)?;

        let font = match config.font_data.clone() {
            Some(data) => Some(Font::try_from_vec(data).ok_or_else(|| {
                WidgetError::illegal("new", "font data is not a valid TrueType/OpenType font")
            })?),
            None => {
                warn!("no font configured for '{}', the label will not be drawn", surface_id);
                None
            }
        };

        if !host.attach(mount_point, surface_id) {
            return Err(WidgetError::null(
                "new",
                format!("progress bar container '{}' can't be null", mount_point),
            ));
        }

        let state = State {
            size: config.size,
            progress: 0.0,
            style: Style::from(&config),
            diagnostics: config.diagnostics,
        };
        let geometry = Geometry::compute(state.size, state.style.small_guide);
        let angles = ProgressAngles::compute(state.progress, state.style.counter_clockwise);
        let formatted = format_progress(
            state.progress,
            state.style.line_cap,
            state.style.float_mode,
            state.style.percent_sign_visible,
        );

        let mut widget = Self {
            surface: Surface::new(surface_id, state.size),
            state,
            geometry,
            angles,
            formatted,
            scene: Scene::new(),
            font,
        };
        widget.paint();
        Ok(widget)
    }

    // ------------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------------

    pub fn set_size(&mut self, size: u32) -> Result<(), WidgetError> {
        self.apply_and_render(format!("set_size({})", size), |state| {
            validate_size("set_size", size)?;
            state.size = size;
            Ok(())
        })
    }

    pub fn set_progress(&mut self, progress: f64) -> Result<(), WidgetError> {
        self.apply_and_render(format!("set_progress({})", progress), |state| {
            if !progress.is_finite() {
                return Err(WidgetError::illegal(
                    "set_progress",
                    "argument must be a number",
                ));
            }
            if !(0.0..=100.0).contains(&progress) {
                return Err(WidgetError::illegal(
                    "set_progress",
                    "argument must be between 0 - 100",
                ));
            }
            state.progress = progress;
            Ok(())
        })
    }

    pub fn set_line_cap_style(&mut self, line_cap: LineCap) {
        self.apply_infallible(format!("set_line_cap_style({})", line_cap), |state| {
            state.style.line_cap = line_cap;
        });
    }

    pub fn set_float_mode(&mut self, float_mode: bool) {
        self.apply_infallible(format!("set_float_mode({})", float_mode), |state| {
            state.style.float_mode = float_mode;
        });
    }

    pub fn set_small_guide(&mut self, small_guide: bool) {
        self.apply_infallible(format!("set_small_guide({})", small_guide), |state| {
            state.style.small_guide = small_guide;
        });
    }

    pub fn set_percent_sign_visible(&mut self, visible: bool) {
        self.apply_infallible(format!("set_percent_sign_visible({})", visible), |state| {
            state.style.percent_sign_visible = visible;
        });
    }

    pub fn set_counter_clockwise(&mut self, counter_clockwise: bool) {
        self.apply_infallible(
            format!("set_counter_clockwise({})", counter_clockwise),
            |state| state.style.counter_clockwise = counter_clockwise,
        );
    }

    pub fn set_font_color(&mut self, color: &str) -> Result<(), WidgetError> {
        let parsed = parse_color("set_font_color", color);
        self.apply_and_render(format!("set_font_color({})", color), |state| {
            state.style.font_color = parsed?;
            Ok(())
        })
    }

    pub fn set_progress_color(&mut self, color: &str) -> Result<(), WidgetError> {
        let parsed = parse_color("set_progress_color", color);
        self.apply_and_render(format!("set_progress_color({})", color), |state| {
            state.style.progress_color = parsed?;
            Ok(())
        })
    }

    pub fn set_guide_color(&mut self, color: &str) -> Result<(), WidgetError> {
        let parsed = parse_color("set_guide_color", color);
        self.apply_and_render(format!("set_guide_color({})", color), |state| {
            state.style.guide_color = parsed?;
            Ok(())
        })
    }

    pub fn set_guide_visible(&mut self, visible: bool) {
        self.apply_infallible(format!("set_guide_visible({})", visible), |state| {
            state.style.guide_visible = visible;
        });
    }

    /// Toggle the crosshair overlay and the debug-level operation log.
    pub fn set_diagnostics_mode(&mut self, enabled: bool) {
        self.apply_infallible(format!("set_diagnostics_mode({})", enabled), |state| {
            state.diagnostics = enabled;
        });
    }

    /// Dispatch a queued command to the matching setter.
    pub fn apply(&mut self, command: WidgetCommand) -> Result<(), WidgetError> {
        match command {
            WidgetCommand::SetSize(size) => self.set_size(size),
            WidgetCommand::SetProgress(progress) => self.set_progress(progress),
            WidgetCommand::SetLineCapStyle(line_cap) => {
                self.set_line_cap_style(line_cap);
                Ok(())
            }
            WidgetCommand::SetFloatMode(enabled) => {
                self.set_float_mode(enabled);
                Ok(())
            }
            WidgetCommand::SetSmallGuide(enabled) => {
                self.set_small_guide(enabled);
                Ok(())
            }
            WidgetCommand::SetPercentSignVisible(visible) => {
                self.set_percent_sign_visible(visible);
                Ok(())
            }
            WidgetCommand::SetCounterClockwise(enabled) => {
                self.set_counter_clockwise(enabled);
                Ok(())
            }
            WidgetCommand::SetFontColor(color) => self.set_font_color(&color),
            WidgetCommand::SetProgressColor(color) => self.set_progress_color(&color),
            WidgetCommand::SetGuideColor(color) => self.set_guide_color(&color),
            WidgetCommand::SetGuideVisible(visible) => {
                self.set_guide_visible(visible);
                Ok(())
            }
            WidgetCommand::SetDiagnosticsMode(enabled) => {
                self.set_diagnostics_mode(enabled);
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Current progress as text: one decimal in float mode, an integer
    /// otherwise. Never carries the percent sign.
    pub fn get_progress(&self) -> String {
        let value = progress_value(self.state.progress, self.state.style.float_mode);
        self.log_op(&format!("get_progress() : {}", value));
        value
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn size(&self) -> u32 {
        self.state.size
    }

    pub fn style(&self) -> &Style {
        &self.state.style
    }

    pub fn line_cap(&self) -> LineCap {
        self.state.style.line_cap
    }

    /// Cap actually used for the progress arc in the last frame.
    pub fn resolved_line_cap(&self) -> LineCap {
        self.formatted.line_cap
    }

    pub fn formatted_progress(&self) -> &str {
        &self.formatted.label
    }

    pub fn font_color(&self) -> Color {
        self.state.style.font_color
    }

    pub fn progress_color(&self) -> Color {
        self.state.style.progress_color
    }

    pub fn guide_color(&self) -> Color {
        self.state.style.guide_color
    }

    pub fn is_guide_visible(&self) -> bool {
        self.state.style.guide_visible
    }

    pub fn is_float_mode(&self) -> bool {
        self.state.style.float_mode
    }

    pub fn is_percent_sign_visible(&self) -> bool {
        self.state.style.percent_sign_visible
    }

    pub fn is_small_guide(&self) -> bool {
        self.state.style.small_guide
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.state.style.counter_clockwise
    }

    pub fn is_diagnostics_mode(&self) -> bool {
        self.state.diagnostics
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn angles(&self) -> &ProgressAngles {
        &self.angles
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_id(&self) -> &str {
        self.surface.id()
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Run `mutate` on a copy of the state; on success commit it, refresh
    /// every derived value and repaint.
    fn apply_and_render<F>(&mut self, operation: String, mutate: F) -> Result<(), WidgetError>
    where
        F: FnOnce(&mut State) -> Result<(), WidgetError>,
    {
        self.log_op(&operation);

        let mut next = self.state.clone();
        mutate(&mut next)?;

        if next.size != self.state.size {
            self.surface.resize(next.size);
        }
        self.state = next;
        self.geometry = Geometry::compute(self.state.size, self.state.style.small_guide);
        self.angles =
            ProgressAngles::compute(self.state.progress, self.state.style.counter_clockwise);
        self.paint();
        Ok(())
    }

    fn apply_infallible<F>(&mut self, operation: String, mutate: F)
    where
        F: FnOnce(&mut State),
    {
        // cannot fail: the closure never returns an error
        let _ = self.apply_and_render(operation, |state| {
            mutate(state);
            Ok(())
        });
    }

    fn paint(&mut self) {
        self.log_op("paint()");

        let style = &self.state.style;
        self.formatted = format_progress(
            self.state.progress,
            style.line_cap,
            style.float_mode,
            style.percent_sign_visible,
        );
        self.scene = render::compose(
            &self.geometry,
            &self.angles,
            style,
            &self.formatted,
            self.state.diagnostics,
        );
        self.scene.render(&mut self.surface, self.font.as_ref());
    }

    fn log_op(&self, operation: &str) {
        if self.state.diagnostics {
            debug!("[{}] {}", self.surface.id(), operation);
        } else {
            trace!("[{}] {}", self.surface.id(), operation);
        }
    }
}

fn validate_size(operation: &'static str, size: u32) -> Result<(), WidgetError> {
    if size < MIN_SIZE {
        return Err(WidgetError::illegal(
            operation,
            format!("size must be greater than {}", MIN_SIZE - 1),
        ));
    }
    if size > MAX_SIZE || Surface::frame_len(size).is_none() {
        return Err(WidgetError::illegal(
            operation,
            format!("size must not exceed {}", MAX_SIZE),
        ));
    }
    Ok(())
}

fn parse_color(operation: &'static str, color: &str) -> Result<Color, WidgetError> {
    color.parse::<Color>().map_err(|err| err.with_operation(operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::START_ANGLE;

    fn widget(size: u32) -> CircularProgress {
        let mut host = Host::new();
        host.add_mount_point("main");
        CircularProgress::new(&mut host, "main", "ring", WidgetConfig::builder().size(size).build())
            .unwrap()
    }

    #[test]
    fn test_initial_frame() {
        let w = widget(300);
        assert_eq!(w.progress(), 0.0);
        assert_eq!(w.formatted_progress(), "00%");
        assert_eq!(w.geometry().radius, 141.0);
        assert_eq!(w.angles().end, START_ANGLE);
        assert_eq!(w.surface().width(), 300);
        // guide ring is painted at the top of the ring
        assert!(w.surface().pixel(150, 5).unwrap().a > 0);
    }

    #[test]
    fn test_rejected_progress_keeps_state_and_pixels() {
        let mut w = widget(200);
        w.set_progress(30.0).unwrap();
        let before = w.surface().frame().to_vec();
        assert!(w.set_progress(101.0).unwrap_err().is_illegal_argument());
        assert!(w.set_progress(-1.0).unwrap_err().is_illegal_argument());
        assert!(w.set_progress(f64::NAN).unwrap_err().is_illegal_argument());
        assert_eq!(w.progress(), 30.0);
        assert_eq!(w.surface().frame(), &before[..]);
    }

    #[test]
    fn test_set_size_recomputes_geometry() {
        let mut w = widget(200);
        w.set_size(400).unwrap();
        assert_eq!(w.size(), 400);
        assert_eq!(w.geometry().half_size, 200.0);
        assert_eq!(w.surface().frame().len(), 400 * 400 * 4);
        assert!(w.set_size(99).unwrap_err().is_illegal_argument());
        assert_eq!(w.size(), 400);
    }

    #[test]
    fn test_size_above_max_rejected_without_touching_surface() {
        let mut w = widget(200);
        w.set_progress(40.0).unwrap();
        let before = w.surface().frame().to_vec();
        for size in [MAX_SIZE + 1, u32::MAX] {
            assert!(w.set_size(size).unwrap_err().is_illegal_argument());
            assert_eq!(w.size(), 200);
            assert_eq!(w.surface().width(), 200);
            assert_eq!(w.surface().frame(), &before[..]);
        }
        assert!(validate_size("set_size", MAX_SIZE).is_ok());
    }

    #[test]
    fn test_small_guide_recomputes_geometry() {
        let mut w = widget(200);
        assert_eq!(w.geometry().line_width, 6.0);
        w.set_small_guide(true);
        assert_eq!(w.geometry().line_width, 12.0);
        assert_eq!(w.geometry().guide_line_width, 6.0);
    }

    #[test]
    fn test_counter_clockwise_recomputes_angles() {
        let mut w = widget(200);
        w.set_progress(50.0).unwrap();
        let ccw_end = w.angles().end;
        w.set_counter_clockwise(false);
        assert!(w.angles().end > START_ANGLE);
        assert!(ccw_end < START_ANGLE);
    }

    #[test]
    fn test_bad_color_rejected() {
        let mut w = widget(200);
        let err = w.set_guide_color("bluish").unwrap_err();
        assert!(err.is_illegal_argument());
        assert!(err.to_string().starts_with("set_guide_color: IllegalArgument"));
        assert_eq!(w.guide_color(), Color::rgba(0, 99, 177, 128));
        w.set_guide_color("#ff0000").unwrap();
        assert_eq!(w.guide_color(), Color::new(255, 0, 0));
    }

    #[test]
    fn test_failed_construction_attaches_nothing() {
        let mut host = Host::new();
        host.add_mount_point("main");
        let config = WidgetConfig::builder().font_data(vec![0; 8]).build();
        assert!(CircularProgress::new(&mut host, "main", "ring", config).is_err());
        assert_eq!(host.surfaces("main"), Some(&[][..]));

        let err = CircularProgress::new(&mut host, "side", "ring", WidgetConfig::default())
            .unwrap_err();
        assert!(err.is_null_argument());
        assert!(host.find_surface("ring").is_none());
    }

    #[test]
    fn test_apply_dispatches() {
        let mut w = widget(200);
        w.apply(WidgetCommand::SetProgress(12.5)).unwrap();
        w.apply(WidgetCommand::SetFloatMode(true)).unwrap();
        assert_eq!(w.formatted_progress(), "12.5%");
        assert!(w.apply(WidgetCommand::SetSize(50)).is_err());
    }
}
