use crate::bmp::BmpLayout;
use crate::error::BitmapError;

/// Caps on canvas geometry, checked by [`crate::Canvas::with_limits`]
/// before the pixel buffer is allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum encoded file size in bytes, compared against
    /// [`BmpLayout::file_size`]. This is also the size of the buffer each
    /// encode allocates.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a computed layout against every limit.
    pub(crate) fn check_layout(&self, layout: &BmpLayout) -> Result<(), BitmapError> {
        let (width, height) = (u64::from(layout.width()), u64::from(layout.height()));
        exceeds("width", width, self.max_width)?;
        exceeds("height", height, self.max_height)?;
        exceeds("pixel count", width * height, self.max_pixels)?;
        exceeds(
            "encoded size in bytes",
            layout.file_size() as u64,
            self.max_memory_bytes,
        )
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BitmapError> {
    match limit {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
