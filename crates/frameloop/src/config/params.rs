use std::fmt::Display;

use image::Rgb;

use crate::color::{self, Color, ColorExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Scalar,
    Color,
    Toggle,
}

impl Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ParamKind::Scalar => "scalar",
            ParamKind::Color => "color",
            ParamKind::Toggle => "toggle",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Color(Color),
    Toggle(bool),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Scalar(_) => ParamKind::Scalar,
            ParamValue::Color(_) => ParamKind::Color,
            ParamValue::Toggle(_) => ParamKind::Toggle,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            ParamValue::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            ParamValue::Toggle(b) => Some(*b),
            _ => None,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Scalar(x) => write!(f, "{x}"),
            ParamValue::Color(c) => {
                let Rgb([r, g, b]) = c.to_rgb8();
                write!(f, "#{r:02x}{g:02x}{b:02x}")
            }
            ParamValue::Toggle(b) => write!(f, "{b}"),
        }
    }
}

/// Declaration of a parameter: its default and the range every value is clamped to.
///
/// For colors the range applies to each channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub default: ParamValue,
    pub min: f32,
    pub max: f32,
}

impl ParamSpec {
    pub fn scalar(default: f32, min: f32, max: f32) -> Self {
        Self {
            default: ParamValue::Scalar(default),
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn color(default: Color) -> Self {
        Self {
            default: ParamValue::Color(default),
            min: 0.0,
            max: 1.0,
        }
    }

    pub fn toggle(default: bool) -> Self {
        Self {
            default: ParamValue::Toggle(default),
            min: 0.0,
            max: 1.0,
        }
    }

    pub fn kind(&self) -> ParamKind {
        self.default.kind()
    }

    /// Bring `value` into the declared range. NaN maps to `min`.
    ///
    /// Returns None if `value` is not of the declared kind.
    pub fn clamp(&self, value: ParamValue) -> Option<ParamValue> {
        match (self.default, value) {
            (ParamValue::Scalar(_), ParamValue::Scalar(x)) => Some(ParamValue::Scalar(if x.is_nan() {
                self.min
            } else {
                x.clamp(self.min, self.max)
            })),
            (ParamValue::Color(_), ParamValue::Color(c)) => {
                Some(ParamValue::Color(c.clamp_channels(self.min, self.max)))
            }
            (ParamValue::Toggle(_), ParamValue::Toggle(b)) => Some(ParamValue::Toggle(b)),
            _ => None,
        }
    }

    /// Read a value of the declared kind from text.
    ///
    /// Colors are written `#rrggbb` or `0xrrggbb`, toggles `true`/`false`/`on`/`off`.
    pub fn parse(&self, input: &str) -> Option<ParamValue> {
        let input = input.trim();
        match self.kind() {
            ParamKind::Scalar => input.parse().ok().map(ParamValue::Scalar),
            ParamKind::Color => {
                let hex = input
                    .strip_prefix('#')
                    .or_else(|| input.strip_prefix("0x"))
                    .unwrap_or(input);
                u32::from_str_radix(hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 6)
                    .map(|x| ParamValue::Color(color::from_hex(x)))
            }
            ParamKind::Toggle => match input {
                "true" | "on" | "1" => Some(ParamValue::Toggle(true)),
                "false" | "off" | "0" => Some(ParamValue::Toggle(false)),
                _ => None,
            },
        }
    }
}
