use std::fmt;
use std::str::FromStr;

use crate::error::WidgetError;

/// RGBA color used for every stroke and fill on the surface.
///
/// Alpha is straight (not premultiplied), 0 is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const GREEN_YELLOW: Color = Color::new(0xad, 0xff, 0x2f);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn alpha(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Parse a CSS-style color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
    /// with `a` in `0..=1`, and a table of named colors.
    pub fn parse(input: &str) -> Option<Color> {
        let s = input.trim().to_ascii_lowercase();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(body) = s.strip_prefix("rgba(").and_then(|b| b.strip_suffix(')')) {
            return parse_channels(body, true);
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
            return parse_channels(body, false);
        }
        named(&s)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| {
            WidgetError::illegal("parse_color", format!("'{}' is not a valid color string", s))
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alpha = (self.alpha() * 1000.0).round() / 1000.0;
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::new(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color::new(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_channels(body: &str, with_alpha: bool) -> Option<Color> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v: f64 = s.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if with_alpha {
        let v: f64 = parts[3].parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    } else {
        0xff
    };
    Some(Color::rgba(r, g, b, a))
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::new(0xff, 0x00, 0x00),
        "green" => Color::new(0x00, 0x80, 0x00),
        "lime" => Color::new(0x00, 0xff, 0x00),
        "blue" => Color::new(0x00, 0x00, 0xff),
        "yellow" => Color::new(0xff, 0xff, 0x00),
        "orange" => Color::new(0xff, 0xa5, 0x00),
        "purple" => Color::new(0x80, 0x00, 0x80),
        "gray" | "grey" => Color::new(0x80, 0x80, 0x80),
        "silver" => Color::new(0xc0, 0xc0, 0xc0),
        "navy" => Color::new(0x00, 0x00, 0x80),
        "teal" => Color::new(0x00, 0x80, 0x80),
        "cyan" | "aqua" => Color::new(0x00, 0xff, 0xff),
        "magenta" | "fuchsia" => Color::new(0xff, 0x00, 0xff),
        "maroon" => Color::new(0x80, 0x00, 0x00),
        "olive" => Color::new(0x80, 0x80, 0x00),
        "greenyellow" => Color::GREEN_YELLOW,
        _ => return None,
    };
    Some(color)
}
