//! Cell style types.

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color \"{0}\": expected #RRGGBB")]
    Invalid(String),
}

/// An RGB colour, stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const LIGHT_GRAY: Color = Color(0xD9D9D9);

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(text: &str) -> Result<Self, ColorError> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ColorError::Invalid(text.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Color)
            .map_err(|_| ColorError::Invalid(text.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Underline {
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
}

/// Cell alignment. Horizontal and vertical placements share one enum;
/// `CenterMiddle` centers on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
    CenterMiddle,
}

/// Visual style of a cell. Unset fields leave the backend's default in place.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: Option<Underline>,
    pub font_color: Option<Color>,
    pub background_color: Option<Color>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub alignment: Option<Alignment>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed style given to every header cell: bold, light-gray background, centered.
    pub fn header_default() -> Self {
        Style::new()
            .set_bold()
            .set_background_color(Color::LIGHT_GRAY)
            .set_alignment(Alignment::Center)
    }

    pub fn set_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn set_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn set_underline(mut self, underline: Underline) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn set_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    pub fn set_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn set_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn set_font_family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    pub fn set_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}
