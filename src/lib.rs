//! # zenbmp
//!
//! Byte-exact encoder for uncompressed Windows BMP files.
//!
//! A [`Canvas`] owns a fixed-size RGBA pixel grid. Paint it with
//! [`Canvas::set_pixel`] / [`Canvas::set_pixel_rgba`] and call
//! [`Canvas::to_bytes`] for the finished file. Writing the bytes anywhere is
//! up to the caller.
//!
//! ## Output format
//!
//! - 14-byte file header, then BITMAPINFOHEADER (24-bit BGR) or
//!   BITMAPV3INFOHEADER (32-bit BGRA with R/G/B/A channel masks)
//! - Negative height: rows are stored top-down
//! - Rows padded with zeros to a multiple of 4 bytes
//! - 72 DPI resolution fields
//! - colors-used holds the number of distinct colors on the canvas
//!
//! ## Non-Goals
//!
//! - Decoding BMP files
//! - RLE, embedded JPEG/PNG, palettes, bit depths other than 24 and 32
//! - Color-space metadata
//!
//! ## Usage
//!
//! ```
//! use zenbmp::Canvas;
//!
//! let mut canvas = Canvas::new(2, 1, false)?;
//! canvas.set_pixel(0, 0, 255, 0, 0)?;
//! canvas.set_pixel(1, 0, 0, 255, 0)?;
//!
//! let bmp = canvas.to_bytes();
//! assert_eq!(bmp.len(), 62);
//! assert_eq!(&bmp[54..60], &[0, 0, 255, 0, 255, 0]);
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod canvas;
mod error;
mod limits;
mod pixel;

// Re-exports
pub use bmp::BmpLayout;
pub use bmp::layout::{
    ALPHA_MASK, BLUE_MASK, FILE_HEADER_SIZE, GREEN_MASK, INFO_HEADER_SIZE, PIXELS_PER_METER,
    RED_MASK, V3_HEADER_SIZE,
};
pub use canvas::Canvas;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::{Channel, PixelLayout, Rgba};
