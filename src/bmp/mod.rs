//! BMP serialization (internal).
//!
//! Use [`crate::Canvas::to_bytes`] or [`crate::Canvas::encode`].

mod encode;
pub(crate) mod layout;

pub use layout::BmpLayout;

use crate::error::BitmapError;
use crate::pixel::Rgba;
use alloc::vec::Vec;
use core::convert::Infallible;
use enough::Stop;

/// Encode to BMP.
pub(crate) fn encode(pixels: &[Rgba], layout: &BmpLayout) -> Vec<u8> {
    let Ok(out) = encode::encode_bmp(pixels, layout, || Ok::<(), Infallible>(()));
    out
}

/// Encode to BMP, polling `stop` between rows.
pub(crate) fn encode_stoppable(
    pixels: &[Rgba],
    layout: &BmpLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(pixels, layout, || stop.check().map_err(BitmapError::from))
}

pub(crate) fn unique_colors(pixels: &[Rgba]) -> usize {
    encode::count_unique_colors(pixels)
}
