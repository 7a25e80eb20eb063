//! Header geometry: stride, offsets and sizes derived from the canvas shape.

use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// BITMAPFILEHEADER size.
pub const FILE_HEADER_SIZE: usize = 14;
/// BITMAPINFOHEADER size, used for 24-bit output.
pub const INFO_HEADER_SIZE: usize = 40;
/// BITMAPV3INFOHEADER size: the info header plus four channel masks.
pub const V3_HEADER_SIZE: usize = 56;
/// 72 DPI expressed in pixels per meter.
pub const PIXELS_PER_METER: u32 = 2835;

// Channel masks for 32-bit output, written in header field order (R, G, B, A).
// Pixels are stored B, G, R, A, so read as a little-endian `u32` blue is the
// low byte and alpha the high byte.

/// Red mask as the little-endian `u32` a reader sees; on disk `00 00 FF 00`
/// (big-endian `0x0000FF00`).
pub const RED_MASK: u32 = 0x00FF_0000;
/// Green mask as the little-endian `u32` a reader sees; on disk `00 FF 00 00`
/// (big-endian `0x00FF0000`).
pub const GREEN_MASK: u32 = 0x0000_FF00;
/// Blue mask as the little-endian `u32` a reader sees; on disk `FF 00 00 00`
/// (big-endian `0xFF000000`).
pub const BLUE_MASK: u32 = 0x0000_00FF;
/// Alpha mask as the little-endian `u32` a reader sees; on disk `00 00 00 FF`
/// (big-endian `0x000000FF`).
pub const ALPHA_MASK: u32 = 0xFF00_0000;

/// Byte layout of an encoded BMP, fixed once the canvas is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpLayout {
    width: u32,
    height: u32,
    pixel: PixelLayout,
    stride: usize,
    pixel_offset: usize,
    file_size: usize,
}

impl BmpLayout {
    /// Compute the layout for a `width` x `height` canvas.
    ///
    /// Fails with [`BitmapError::InvalidDimension`] for a zero dimension and
    /// [`BitmapError::DimensionsTooLarge`] when a header field would overflow.
    pub fn new(width: u32, height: u32, has_alpha: bool) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidDimension { width, height });
        }
        let too_large = BitmapError::DimensionsTooLarge { width, height };
        // Width and negated height are signed 32-bit header fields.
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(too_large);
        }

        let pixel = PixelLayout::for_alpha(has_alpha);
        let w = width as usize;
        let h = height as usize;
        let stride = w
            .checked_mul(pixel.bytes_per_pixel())
            .and_then(|r| r.checked_add(3))
            .map(|r| r & !3)
            .ok_or(too_large)?;
        let header_size = if has_alpha {
            V3_HEADER_SIZE
        } else {
            INFO_HEADER_SIZE
        };
        let pixel_offset = FILE_HEADER_SIZE + header_size;
        let file_size = stride
            .checked_mul(h)
            .and_then(|d| d.checked_add(pixel_offset))
            .filter(|&s| u32::try_from(s).is_ok())
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

        Ok(Self {
            width,
            height,
            pixel,
            stride,
            pixel_offset,
            file_size,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_layout(&self) -> PixelLayout {
        self.pixel
    }

    pub fn has_alpha(&self) -> bool {
        self.pixel.has_alpha()
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.pixel.bytes_per_pixel()
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.pixel.bits_per_pixel()
    }

    /// Bytes per encoded row, a multiple of 4.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel bytes per row before padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Size of the DIB header: 40, or 56 with channel masks.
    pub fn header_size(&self) -> usize {
        self.pixel_offset - FILE_HEADER_SIZE
    }

    /// Offset of the first pixel row from the start of the file.
    pub fn pixel_offset(&self) -> usize {
        self.pixel_offset
    }

    /// Total encoded file size in bytes.
    pub fn file_size(&self) -> usize {
        self.file_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        for (w, h) in [(0, 1), (1, 0), (0, 0)] {
            assert!(matches!(
                BmpLayout::new(w, h, false),
                Err(BitmapError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn rejects_unrepresentable_dimensions() {
        assert!(matches!(
            BmpLayout::new(1, u32::MAX, false),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        assert!(matches!(
            BmpLayout::new(i32::MAX as u32 + 1, 1, false),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
        // Fits the signed fields, but the file size does not fit in u32.
        assert!(matches!(
            BmpLayout::new(65536, 65536, true),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn stride_pads_to_four_bytes() {
        let cases = [(1, 4), (2, 8), (3, 12), (4, 12), (5, 16), (7, 24)];
        for (w, stride) in cases {
            let layout = BmpLayout::new(w, 1, false).unwrap();
            assert_eq!(layout.stride(), stride, "width {w}");
            assert_eq!(layout.stride() % 4, 0);
            assert!(layout.stride() >= layout.row_bytes());
        }
        for w in 1..20 {
            let layout = BmpLayout::new(w, 1, true).unwrap();
            assert_eq!(layout.stride(), w as usize * 4);
        }
    }

    #[test]
    fn offsets_and_sizes() {
        let rgb = BmpLayout::new(2, 1, false).unwrap();
        assert_eq!(rgb.header_size(), 40);
        assert_eq!(rgb.pixel_offset(), 54);
        assert_eq!(rgb.file_size(), 62);
        assert_eq!(rgb.bits_per_pixel(), 24);

        let rgba = BmpLayout::new(1, 1, true).unwrap();
        assert_eq!(rgba.header_size(), 56);
        assert_eq!(rgba.pixel_offset(), 70);
        assert_eq!(rgba.file_size(), 74);
        assert_eq!(rgba.bits_per_pixel(), 32);
    }

    #[test]
    fn masks_on_disk_match_big_endian_form() {
        assert_eq!(RED_MASK.to_le_bytes(), 0x0000_FF00u32.to_be_bytes());
        assert_eq!(GREEN_MASK.to_le_bytes(), 0x00FF_0000u32.to_be_bytes());
        assert_eq!(BLUE_MASK.to_le_bytes(), 0xFF00_0000u32.to_be_bytes());
        assert_eq!(ALPHA_MASK.to_le_bytes(), 0x0000_00FFu32.to_be_bytes());
        // BGRA pixel bytes read as a little-endian u32 land under each mask.
        let px = u32::from_le_bytes([0x30, 0x20, 0x10, 0x40]);
        assert_eq!((px & RED_MASK) >> 16, 0x10);
        assert_eq!((px & GREEN_MASK) >> 8, 0x20);
        assert_eq!(px & BLUE_MASK, 0x30);
        assert_eq!((px & ALPHA_MASK) >> 24, 0x40);
    }

    #[test]
    fn file_size_is_offset_plus_rows() {
        for (w, h, alpha) in [(7, 7, false), (13, 3, true), (1024, 2, false)] {
            let l = BmpLayout::new(w, h, alpha).unwrap();
            assert_eq!(l.file_size(), l.pixel_offset() + h as usize * l.stride());
        }
    }
}
