//! Decoded icon storage

use heapless::Vec;

/// Maximum icon width or height in pixels
pub const ICON_MAX_SIDE: u32 = 64;

/// Maximum pixels per icon
pub const ICON_MAX_PIXELS: usize = (ICON_MAX_SIDE * ICON_MAX_SIDE) as usize;

/// Decoded icon
///
/// Pixels are raw RGB565 values in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconBitmap {
    width: u16,
    height: u16,
    pixels: Vec<u16, ICON_MAX_PIXELS>,
}

impl IconBitmap {
    /// Create a bitmap filled with `raw`
    ///
    /// Returns `None` if the dimensions exceed [`ICON_MAX_SIDE`].
    pub fn filled(width: u16, height: u16, raw: u16) -> Option<Self> {
        if u32::from(width) > ICON_MAX_SIDE || u32::from(height) > ICON_MAX_SIDE {
            return None;
        }
        let mut pixels = Vec::new();
        pixels
            .resize(usize::from(width) * usize::from(height), raw)
            .ok()?;
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Raw pixel at `(x, y)`
    pub fn pixel(&self, x: u16, y: u16) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    /// Overwrite the pixel at `(x, y)`; out-of-range writes are dropped
    pub fn set_pixel(&mut self, x: u16, y: u16, raw: u16) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = usize::from(y) * usize::from(self.width) + usize::from(x);
        if let Some(slot) = self.pixels.get_mut(index) {
            *slot = raw;
        }
    }

    /// Iterate `(x, y, raw)` in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = (u16, u16, u16)> + '_ {
        let width = self.width.max(1);
        self.pixels.iter().enumerate().map(move |(i, &raw)| {
            let i = i as u16;
            (i % width, i / width, raw)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_dimensions() {
        let icon = IconBitmap::filled(3, 2, 0xFFFF).unwrap();
        assert_eq!(icon.width(), 3);
        assert_eq!(icon.height(), 2);
        assert_eq!(icon.pixels().count(), 6);
    }

    #[test]
    fn test_filled_rejects_oversize() {
        assert!(IconBitmap::filled(65, 1, 0).is_none());
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut icon = IconBitmap::filled(4, 4, 0).unwrap();
        icon.set_pixel(2, 3, 0x07E0);
        assert_eq!(icon.pixel(2, 3), Some(0x07E0));
        assert_eq!(icon.pixel(4, 0), None);

        let (x, y, raw) = icon.pixels().nth(3 * 4 + 2).unwrap();
        assert_eq!((x, y, raw), (2, 3, 0x07E0));
    }
}
