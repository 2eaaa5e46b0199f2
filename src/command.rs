use crate::config::LineCap;

/// Command enum for updating a widget from another thread
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    SetSize(u32),
    SetProgress(f64),
    SetLineCapStyle(LineCap),
    SetFloatMode(bool),
    SetSmallGuide(bool),
    SetPercentSignVisible(bool),
    SetCounterClockwise(bool),
    SetFontColor(String),
    SetProgressColor(String),
    SetGuideColor(String),
    SetGuideVisible(bool),
    SetDiagnosticsMode(bool),
}
