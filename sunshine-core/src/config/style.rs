//! Resolved draw style

use super::types::{Color, FaceConfig, Layout};

/// Everything the style depends on besides the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StyleInputs {
    pub ambient: bool,
    /// Low-bit display in ambient mode
    pub low_fidelity: bool,
    /// Round screen insets
    pub round: bool,
    /// Completed taps so far
    pub tap_count: u32,
}

/// Immutable draw style for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceStyle {
    pub ambient: bool,
    pub background: Color,
    pub text: Color,
    pub date_text: Color,
    pub divider: Color,
    /// Smooth glyph edges; off on low-bit ambient displays
    pub anti_alias: bool,
    pub show_icon: bool,
    pub show_seconds: bool,
    pub layout: Layout,
}

impl FaceStyle {
    /// Resolve the style for the given mode
    ///
    /// Ambient is white on black with no icon. Interactive uses the
    /// palette, alternating the background with tap parity.
    pub fn resolve(config: &FaceConfig, inputs: StyleInputs) -> Self {
        let layout = *config.layout(inputs.round);

        if inputs.ambient {
            return Self {
                ambient: true,
                background: Color::BLACK,
                text: Color::WHITE,
                date_text: Color::WHITE,
                divider: Color::WHITE,
                anti_alias: !inputs.low_fidelity,
                show_icon: false,
                show_seconds: false,
                layout,
            };
        }

        let palette = &config.palette;
        let background = if inputs.tap_count % 2 == 0 {
            palette.background
        } else {
            palette.background_alt
        };

        Self {
            ambient: false,
            background,
            text: palette.text,
            date_text: palette.date_text,
            divider: palette.divider,
            anti_alias: true,
            show_icon: true,
            show_seconds: config.show_seconds,
            layout,
        }
    }
}
