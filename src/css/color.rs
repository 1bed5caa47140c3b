//! Color handling utilities
//!
//! Turns color literal tokens into RGBA values for previews and editor color
//! decorations. Accepts the same shapes the classifier finds: hex colors and
//! rgb/rgba/hsl/hsla calls.

use std::fmt;

/// Represents a color with RGBA components
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0.0-1.0)
    pub a: f32,
}

impl Color {
    /// Create a new color with RGB components and full opacity
    pub fn new_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with RGBA components
    pub fn new_rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any supported color literal
    pub fn parse(literal: &str) -> Option<Self> {
        let literal = literal.trim();
        if literal.starts_with('#') {
            Self::from_hex(literal)
        } else {
            Self::from_function(literal)
        }
    }

    /// Parse a hex color string and return a Color
    /// Supports #rgb, #rgba, #rrggbb and #rrggbbaa
    pub fn from_hex(hex_value: &str) -> Option<Self> {
        let hex_part = hex_value.strip_prefix('#').unwrap_or(hex_value);
        if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex_part[range], 16).ok();
        let short = |i: usize| u8::from_str_radix(&hex_part[i..i + 1].repeat(2), 16).ok();

        match hex_part.len() {
            3 => Some(Self::new_rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::new_rgba(
                short(0)?,
                short(1)?,
                short(2)?,
                short(3)? as f32 / 255.0,
            )),
            6 => Some(Self::new_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::new_rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)? as f32 / 255.0,
            )),
            _ => None,
        }
    }

    /// Parse `rgb()`, `rgba()`, `hsl()` or `hsla()` notation
    pub fn from_function(text: &str) -> Option<Self> {
        let open = text.find('(')?;
        let close = text.rfind(')')?;
        if close < open {
            return None;
        }

        let name = text[..open].trim().to_ascii_lowercase();
        let components: Vec<&str> = text[open + 1..close]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        if components.len() != 3 && components.len() != 4 {
            return None;
        }

        let alpha = match components.get(3) {
            Some(component) => parse_alpha(component)?,
            None => 1.0,
        };

        match name.as_str() {
            "rgb" | "rgba" => Some(Self::new_rgba(
                parse_rgb_channel(components[0])?,
                parse_rgb_channel(components[1])?,
                parse_rgb_channel(components[2])?,
                alpha,
            )),
            "hsl" | "hsla" => {
                let hue = components[0].trim_end_matches("deg").parse::<f32>().ok()?;
                let saturation = parse_percentage(components[1])?;
                let lightness = parse_percentage(components[2])?;
                let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
                Some(Self::new_rgba(r, g, b, alpha))
            }
            _ => None,
        }
    }

    /// Get RGB components as a tuple
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Convert to hex string format (#rrggbb)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to hex string with alpha (#rrggbbaa)
    pub fn to_hex_with_alpha(&self) -> String {
        let alpha = (self.a * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Channel as `0-255` or a percentage
fn parse_rgb_channel(component: &str) -> Option<u8> {
    let value = match component.strip_suffix('%') {
        Some(percent) => percent.parse::<f32>().ok()? * 255.0 / 100.0,
        None => component.parse::<f32>().ok()?,
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

/// Alpha as `0-1` or a percentage
fn parse_alpha(component: &str) -> Option<f32> {
    let value = match component.strip_suffix('%') {
        Some(percent) => percent.parse::<f32>().ok()? / 100.0,
        None => component.parse::<f32>().ok()?,
    };
    Some(value.clamp(0.0, 1.0))
}

/// Percentage as a `0-1` fraction; the `%` sign is optional
fn parse_percentage(component: &str) -> Option<f32> {
    let number = component.strip_suffix('%').unwrap_or(component);
    Some((number.parse::<f32>().ok()? / 100.0).clamp(0.0, 1.0))
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let hue = hue.rem_euclid(360.0) / 360.0;
    if saturation == 0.0 {
        let gray = (lightness * 255.0).round() as u8;
        return (gray, gray, gray);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        let value = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    };

    (channel(hue + 1.0 / 3.0), channel(hue), channel(hue - 1.0 / 3.0))
}
