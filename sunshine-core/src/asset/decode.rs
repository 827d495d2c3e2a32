//! BMP icon decoding

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use tinybmp::Bmp;

use super::bitmap::{IconBitmap, ICON_MAX_SIDE};
use super::AssetError;

/// Decode BMP bytes into an icon
///
/// Any BMP color depth tinybmp understands is converted to RGB565.
pub fn decode_icon(bytes: &[u8]) -> Result<IconBitmap, AssetError> {
    if bytes.is_empty() {
        return Err(AssetError::Empty);
    }

    let bmp = Bmp::<Rgb565>::from_slice(bytes).map_err(|_| AssetError::Malformed)?;
    let size = bmp.size();
    if size.width > ICON_MAX_SIDE || size.height > ICON_MAX_SIDE {
        return Err(AssetError::TooLarge);
    }

    let mut icon =
        IconBitmap::filled(size.width as u16, size.height as u16, 0).ok_or(AssetError::TooLarge)?;
    for Pixel(point, color) in bmp.pixels() {
        if point.x < 0 || point.y < 0 {
            continue;
        }
        icon.set_pixel(point.x as u16, point.y as u16, color.into_storage());
    }

    Ok(icon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Build a bottom-up 24-bit BMP filled with one color
    fn bmp24(width: u32, height: u32, bgr: [u8; 3]) -> Vec<u8> {
        let row = (width * 3 + 3) & !3;
        let image_size = row * height;
        let file_size = 54 + image_size;

        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&54u32.to_le_bytes());
        // BITMAPINFOHEADER
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&(width as i32).to_le_bytes());
        out.extend_from_slice(&(height as i32).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&image_size.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        for _ in 0..height {
            for _ in 0..width {
                out.extend_from_slice(&bgr);
            }
            for _ in width * 3..row {
                out.push(0);
            }
        }
        out
    }

    #[test]
    fn test_decode_solid_icon() {
        // Pure red in BGR order
        let bytes = bmp24(5, 3, [0x00, 0x00, 0xFF]);
        let icon = decode_icon(&bytes).unwrap();

        assert_eq!(icon.width(), 5);
        assert_eq!(icon.height(), 3);
        let red = Rgb565::RED.into_storage();
        assert!(icon.pixels().all(|(_, _, raw)| raw == red));
    }

    #[test]
    fn test_empty_bytes() {
        assert_eq!(decode_icon(&[]), Err(AssetError::Empty));
    }

    #[test]
    fn test_garbage_bytes() {
        assert_eq!(decode_icon(b"not a bitmap"), Err(AssetError::Malformed));
    }

    #[test]
    fn test_truncated_bitmap() {
        let bytes = bmp24(8, 8, [0x10, 0x20, 0x30]);
        assert_eq!(decode_icon(&bytes[..30]), Err(AssetError::Malformed));
    }

    #[test]
    fn test_oversize_icon() {
        let bytes = bmp24(ICON_MAX_SIDE + 1, 1, [0, 0, 0]);
        assert_eq!(decode_icon(&bytes), Err(AssetError::TooLarge));
    }
}
