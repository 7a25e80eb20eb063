//! BMP encoder: uncompressed, top-down 24-bit and 32-bit BMP.

use super::layout::{
    ALPHA_MASK, BLUE_MASK, BmpLayout, GREEN_MASK, PIXELS_PER_METER, RED_MASK,
};
use crate::pixel::Rgba;
use alloc::vec::Vec;

/// Serialize `pixels` (row-major, `layout.width() * layout.height()` long).
///
/// `check` runs once before the header and then every 16 rows; an error
/// from it aborts the encode.
pub(crate) fn encode_bmp<E>(
    pixels: &[Rgba],
    layout: &BmpLayout,
    mut check: impl FnMut() -> Result<(), E>,
) -> Result<Vec<u8>, E> {
    check()?;
    let colors_used = count_unique_colors(pixels);

    let mut out = Vec::with_capacity(layout.file_size());
    write_bmp_header(&mut out, layout, colors_used);
    debug_assert_eq!(out.len(), layout.pixel_offset());

    let w = layout.width() as usize;
    let pad_bytes = layout.stride() - layout.row_bytes();
    let alpha = layout.has_alpha();
    // Negative height in the header: row 0 is the top scanline, written first.
    for (row_idx, row) in pixels.chunks_exact(w).enumerate() {
        if row_idx % 16 == 0 {
            check()?;
        }
        for p in row {
            out.push(p.b);
            out.push(p.g);
            out.push(p.r);
            if alpha {
                out.push(p.a);
            }
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    debug_assert_eq!(out.len(), layout.file_size());
    Ok(out)
}

/// Number of distinct RGBA values in `pixels`.
///
/// Sorts packed keys in one flat allocation; O(n log n) time, O(n) space.
pub(crate) fn count_unique_colors(pixels: &[Rgba]) -> usize {
    let mut keys: Vec<u32> = pixels.iter().map(|p| p.to_u32()).collect();
    keys.sort_unstable();
    keys.dedup();
    keys.len()
}

fn write_bmp_header(out: &mut Vec<u8>, layout: &BmpLayout, colors_used: usize) {
    // BmpLayout guarantees the sizes fit in u32 and the dimensions in i32.
    let file_size = layout.file_size() as u32;
    let pixel_offset = layout.pixel_offset() as u32;

    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&pixel_offset.to_le_bytes());

    // DIB header (40 bytes; masks follow for V3)
    out.extend_from_slice(&(layout.header_size() as u32).to_le_bytes());
    out.extend_from_slice(&(layout.width() as i32).to_le_bytes());
    out.extend_from_slice(&(-(layout.height() as i32)).to_le_bytes()); // negative = top-down
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&layout.bits_per_pixel().to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression: BI_RGB
    out.extend_from_slice(&0u32.to_le_bytes()); // image size, 0 is valid for BI_RGB
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes()); // v resolution
    out.extend_from_slice(&(colors_used as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors: all

    // BITMAPV3INFOHEADER extension: R, G, B, A masks
    if layout.has_alpha() {
        for mask in [RED_MASK, GREEN_MASK, BLUE_MASK, ALPHA_MASK] {
            out.extend_from_slice(&mask.to_le_bytes());
        }
    }
}
