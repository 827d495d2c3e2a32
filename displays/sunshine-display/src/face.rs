//! Watch face frame
//!
//! A frame is composed from data that is already resident: the resolved
//! style, the local time and a weather snapshot. Drawing it never waits
//! on anything.

use sunshine_core::asset::IconBitmap;
use sunshine_core::config::{Color, FaceStyle, FontSize};
use sunshine_core::time::{format_date, format_time, DateText, LocalTime, TimeText};
use sunshine_core::weather::WeatherSnapshot;

use crate::backend::{DrawSurface, SurfaceError, TextStyle};

/// One composed frame of the face
#[derive(Debug, Clone)]
pub struct FaceFrame<'a> {
    style: FaceStyle,
    time: TimeText,
    date: DateText,
    high: &'a str,
    low: &'a str,
    icon: Option<&'a IconBitmap>,
}

impl<'a> FaceFrame<'a> {
    /// Compose a frame
    ///
    /// Temperatures not yet received render as empty strings.
    pub fn compose(style: FaceStyle, now: &LocalTime, weather: &'a WeatherSnapshot) -> Self {
        Self {
            style,
            time: format_time(now, style.show_seconds),
            date: format_date(now),
            high: weather.high.as_str(),
            low: weather.low.as_str(),
            icon: if style.show_icon {
                weather.icon.as_ref()
            } else {
                None
            },
        }
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Replay the frame onto a surface
    pub fn draw<S: DrawSurface>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        let style = &self.style;
        let layout = &style.layout;

        surface.clear(style.background)?;

        surface.draw_text(
            layout.time_x,
            layout.time_y,
            &self.time,
            self.text_style(style.text, layout.time_font),
        )?;
        surface.draw_text(
            layout.date_x,
            layout.date_y,
            &self.date,
            self.text_style(style.date_text, layout.date_font),
        )?;

        // Separator centered on the face
        let (width, _) = surface.size();
        let center_x = (width / 2) as i32;
        let half = layout.separator_half_width as i32;
        surface.draw_line(
            (center_x - half, layout.separator_y),
            (center_x + half, layout.separator_y),
            style.divider,
        )?;

        if let Some(icon) = self.icon {
            surface.draw_icon(layout.icon_x, layout.icon_y, icon)?;
        }

        let temp_style = self.text_style(style.text, layout.temp_font);
        surface.draw_text(layout.high_x, layout.temp_y, self.high, temp_style)?;
        surface.draw_text(
            layout.low_x,
            layout.temp_y,
            self.low,
            self.text_style(style.date_text, layout.temp_font),
        )?;

        surface.flush()
    }

    fn text_style(&self, color: Color, size: FontSize) -> TextStyle {
        TextStyle {
            color,
            size,
            anti_alias: self.style.anti_alias,
        }
    }
}
