//! Configuration type definitions
//!
//! Geometry is in pixels from the top-left corner of the surface. Text
//! positions are the top-left of the text box.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Interactive-mode colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Palette {
    /// Background after an even number of taps
    pub background: Color,
    /// Background after an odd number of taps
    pub background_alt: Color,
    pub text: Color,
    pub date_text: Color,
    pub divider: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x03, 0xA9, 0xF4),
            background_alt: Color::rgb(0x02, 0x88, 0xD1),
            text: Color::WHITE,
            date_text: Color::rgb(0xB3, 0xE5, 0xFC),
            divider: Color::rgb(0xB3, 0xE5, 0xFC),
        }
    }
}

/// Element placement for one screen shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    pub time_x: i32,
    pub time_y: i32,
    pub time_font: FontSize,
    pub date_x: i32,
    pub date_y: i32,
    pub date_font: FontSize,
    /// Separator row; the line is centered horizontally
    pub separator_y: i32,
    pub separator_half_width: u32,
    pub icon_x: i32,
    pub icon_y: i32,
    pub high_x: i32,
    pub low_x: i32,
    pub temp_y: i32,
    pub temp_font: FontSize,
}

impl Layout {
    /// Layout for square screens
    pub const fn square() -> Self {
        Self {
            time_x: 40,
            time_y: 56,
            time_font: FontSize::Large,
            date_x: 48,
            date_y: 96,
            date_font: FontSize::Small,
            separator_y: 120,
            separator_half_width: 30,
            icon_x: 24,
            icon_y: 136,
            high_x: 100,
            low_x: 160,
            temp_y: 156,
            temp_font: FontSize::Medium,
        }
    }

    /// Layout for round screens, pulled in from the bezel
    pub const fn round() -> Self {
        Self {
            time_x: 52,
            time_y: 64,
            time_font: FontSize::Large,
            date_x: 60,
            date_y: 104,
            date_font: FontSize::Small,
            separator_y: 126,
            separator_half_width: 30,
            icon_x: 40,
            icon_y: 140,
            high_x: 110,
            low_x: 160,
            temp_y: 160,
            temp_font: FontSize::Medium,
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::square()
    }
}

/// Face configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    pub palette: Palette,
    pub round: Layout,
    pub square: Layout,
    /// Show seconds while interactive
    pub show_seconds: bool,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            round: Layout::round(),
            square: Layout::square(),
            show_seconds: false,
        }
    }
}

impl FaceConfig {
    /// Layout for the given screen shape
    pub fn layout(&self, round: bool) -> &Layout {
        if round {
            &self.round
        } else {
            &self.square
        }
    }
}
