use bon::Builder;
use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::WidgetError;
use crate::geometry::DEFAULT_SIZE;

/// End style of the progress arc stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
}

impl LineCap {
    pub const STYLE_LINE_BUTT: LineCap = LineCap::Butt;
    pub const STYLE_LINE_ROUND: LineCap = LineCap::Round;

    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for LineCap {
    type Error = WidgetError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(LineCap::Butt),
            1 => Ok(LineCap::Round),
            other => Err(WidgetError::illegal(
                "set_line_cap_style",
                format!(
                    "line cap id {} must be LineCap::STYLE_LINE_BUTT or LineCap::STYLE_LINE_ROUND",
                    other
                ),
            )),
        }
    }
}

impl FromStr for LineCap {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "butt" => Ok(LineCap::Butt),
            "round" => Ok(LineCap::Round),
            other => Err(WidgetError::illegal(
                "set_line_cap_style",
                format!("unknown line cap '{}', expected 'butt' or 'round'", other),
            )),
        }
    }
}

impl fmt::Display for LineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineCap::Butt => write!(f, "butt"),
            LineCap::Round => write!(f, "round"),
        }
    }
}

/// Initial state of a progress widget.
///
/// Everything here can be changed later through the widget setters; the
/// config only decides what the first frame looks like.
#[derive(Debug, Clone, Builder)]
pub struct WidgetConfig {
    #[builder(default = DEFAULT_SIZE)]
    pub size: u32,

    // Style
    #[builder(default = LineCap::Butt)]
    pub line_cap: LineCap,
    #[builder(default = Color::BLACK)]
    pub font_color: Color,
    #[builder(default = Color::new(0, 99, 177))]
    pub progress_color: Color,
    #[builder(default = Color::rgba(0, 99, 177, 128))]
    pub guide_color: Color,

    // Flags
    #[builder(default = true)]
    pub guide_visible: bool,
    #[builder(default = false)]
    pub float_mode: bool,
    #[builder(default = true)]
    pub percent_sign_visible: bool,
    #[builder(default = false)]
    pub small_guide: bool,
    #[builder(default = true)]
    pub counter_clockwise: bool,
    #[builder(default = false)]
    pub diagnostics: bool,

    // Font configuration
    /// TrueType/OpenType bytes for the label. Without a font the label is
    /// laid out but not drawn.
    pub font_data: Option<Vec<u8>>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Settings for the preview window.
#[derive(Debug, Clone, Builder)]
pub struct ViewerConfig {
    #[builder(default = "Progress".to_string())]
    pub title: String,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    /// The surface is transparent where nothing is drawn; this is what
    /// shows through.
    #[builder(default = Color::WHITE)]
    pub background: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
