use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use crate::bmp::{self, BmpLayout};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{Channel, Rgba};

/// An in-memory pixel grid that encodes to an uncompressed BMP file.
///
/// Dimensions and alpha mode are fixed at construction. Without alpha the
/// canvas encodes 24-bit BGR and reports every pixel's alpha as 255; with
/// alpha it encodes 32-bit BGRA behind a BITMAPV3INFOHEADER carrying
/// channel masks. Rows are written top-down.
///
/// New canvases are zero-filled: black with alpha 0 (reported as 255 when
/// the canvas has no alpha channel).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    layout: BmpLayout,
    pixels: Vec<Rgba>,
}

impl Canvas {
    /// Create a `width` x `height` canvas.
    ///
    /// Fails with [`BitmapError::InvalidDimension`] if either dimension is
    /// zero, or [`BitmapError::DimensionsTooLarge`] if the encoded file could
    /// not be described by a BMP header.
    pub fn new(width: u32, height: u32, has_alpha: bool) -> Result<Self, BitmapError> {
        let layout = BmpLayout::new(width, height, has_alpha)?;
        Ok(Self::allocate(layout))
    }

    /// Like [`Canvas::new`], rejecting geometry that exceeds `limits`.
    ///
    /// `max_memory_bytes` applies to the encoded file size.
    pub fn with_limits(
        width: u32,
        height: u32,
        has_alpha: bool,
        limits: &Limits,
    ) -> Result<Self, BitmapError> {
        let layout = BmpLayout::new(width, height, has_alpha)?;
        limits.check_layout(&layout)?;
        Ok(Self::allocate(layout))
    }

    fn allocate(layout: BmpLayout) -> Self {
        // BmpLayout bounds the file size, so the pixel count cannot overflow.
        let count = layout.width() as usize * layout.height() as usize;
        let fill = if layout.has_alpha() {
            Rgba::default()
        } else {
            Rgba::BLACK
        };
        Self {
            layout,
            pixels: vec![fill; count],
        }
    }

    pub fn width(&self) -> u32 {
        self.layout.width()
    }

    pub fn height(&self) -> u32 {
        self.layout.height()
    }

    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// Encoded byte layout (stride, offsets, file size).
    pub fn layout(&self) -> &BmpLayout {
        &self.layout
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, BitmapError> {
        let (width, height) = (self.width(), self.height());
        if x >= width || y >= height {
            return Err(BitmapError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(y as usize * width as usize + x as usize)
    }

    fn normalize(&self, mut color: Rgba) -> Rgba {
        if !self.has_alpha() {
            color.a = 255;
        }
        color
    }

    /// Set an opaque pixel. Channels are clamped with [`Channel::to_channel`].
    pub fn set_pixel<C: Channel>(
        &mut self,
        x: u32,
        y: u32,
        r: C,
        g: C,
        b: C,
    ) -> Result<(), BitmapError> {
        self.set(x, y, Rgba::opaque(r.to_channel(), g.to_channel(), b.to_channel()))
    }

    /// Set a pixel including alpha. Channels are clamped with
    /// [`Channel::to_channel`]; alpha is discarded on a canvas without alpha.
    pub fn set_pixel_rgba<C: Channel>(
        &mut self,
        x: u32,
        y: u32,
        r: C,
        g: C,
        b: C,
        a: C,
    ) -> Result<(), BitmapError> {
        self.set(x, y, Rgba::clamped(r, g, b, a))
    }

    /// Store `color` at (`x`, `y`), overwriting the previous value.
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) -> Result<(), BitmapError> {
        let idx = self.index(x, y)?;
        let color = self.normalize(color);
        self.pixels[idx] = color;
        Ok(())
    }

    /// Read the color at (`x`, `y`). Alpha is always 255 without an alpha channel.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Rgba, BitmapError> {
        Ok(self.pixels[self.index(x, y)?])
    }

    /// Paint every pixel with `color`.
    pub fn fill(&mut self, color: Rgba) {
        let color = self.normalize(color);
        self.pixels.fill(color);
    }

    /// Row-major pixel data, `width * height` long.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Number of distinct RGBA values currently on the canvas.
    ///
    /// This is the value written to the header's colors-used field.
    pub fn unique_color_count(&self) -> usize {
        bmp::unique_colors(&self.pixels)
    }

    /// Encode the canvas as a complete BMP file.
    ///
    /// The output is rebuilt from the current pixels on every call and is
    /// exactly [`BmpLayout::file_size`] bytes long.
    pub fn to_bytes(&self) -> Vec<u8> {
        bmp::encode(&self.pixels, &self.layout)
    }

    /// [`Canvas::to_bytes`] with cooperative cancellation.
    ///
    /// Returns [`BitmapError::Cancelled`] if `stop` fires before the last
    /// row is written.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        bmp::encode_stoppable(&self.pixels, &self.layout, &stop)
    }
}

#[cfg(feature = "imgref")]
impl Canvas {
    /// Build a canvas from a typed 2-D image.
    ///
    /// Any pixel type convertible to [`Rgba`] works (`RGB8`, `RGBA8`,
    /// `BGR8`, `BGRA8`); alpha is dropped when `has_alpha` is false.
    pub fn from_imgref<P>(img: imgref::ImgRef<'_, P>, has_alpha: bool) -> Result<Self, BitmapError>
    where
        P: Copy + Into<Rgba>,
    {
        let width = u32::try_from(img.width()).unwrap_or(u32::MAX);
        let height = u32::try_from(img.height()).unwrap_or(u32::MAX);
        let mut canvas = Self::new(width, height, has_alpha)?;
        let alpha = canvas.has_alpha();
        let w = img.width();
        for (dst, src) in canvas.pixels.chunks_exact_mut(w).zip(img.rows()) {
            for (d, &s) in dst.iter_mut().zip(src) {
                let mut c: Rgba = s.into();
                if !alpha {
                    c.a = 255;
                }
                *d = c;
            }
        }
        Ok(canvas)
    }

    /// Copy the pixels out as an `ImgVec<RGBA8>`.
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.pixels.iter().map(|&c| c.into()).collect(),
            self.width() as usize,
            self.height() as usize,
        )
    }
}
