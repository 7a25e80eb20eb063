/// On-disk pixel layout of the encoded bitmap.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 3 bytes per pixel, stored B, G, R (24-bit, no alpha).
    Bgr8,
    /// 4 bytes per pixel, stored B, G, R, A (32-bit with channel masks).
    Bgra8,
}

impl PixelLayout {
    pub(crate) fn for_alpha(has_alpha: bool) -> Self {
        if has_alpha { Self::Bgra8 } else { Self::Bgr8 }
    }

    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Bgr8 => 3,
            Self::Bgra8 => 4,
        }
    }

    /// Value of the DIB header's bits-per-pixel field.
    pub fn bits_per_pixel(&self) -> u16 {
        match self {
            Self::Bgr8 => 24,
            Self::Bgra8 => 32,
        }
    }

    /// Whether the alpha channel is stored.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Bgra8)
    }
}

/// An 8-bit RGBA color as stored in a [`crate::Canvas`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Normalize arbitrary numeric channels with [`Channel::to_channel`].
    pub fn clamped<C: Channel>(r: C, g: C, b: C, a: C) -> Self {
        Self::new(r.to_channel(), g.to_channel(), b.to_channel(), a.to_channel())
    }

    /// Pack into one integer, R in the high byte and A in the low byte.
    ///
    /// Equal colors produce equal keys and distinct colors distinct keys.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for (u8, u8, u8, u8) {
    fn from(c: Rgba) -> Self {
        (c.r, c.g, c.b, c.a)
    }
}

/// A numeric value usable as a color channel.
///
/// `to_channel` is total: integers clamp to `0..=255`, floats truncate
/// toward zero and then clamp, and NaN maps to 0.
pub trait Channel: Copy {
    fn to_channel(self) -> u8;
}

impl Channel for u8 {
    #[inline]
    fn to_channel(self) -> u8 {
        self
    }
}

impl Channel for i8 {
    #[inline]
    fn to_channel(self) -> u8 {
        self.max(0) as u8
    }
}

macro_rules! unsigned_channel {
    ($($t:ty),*) => {$(
        impl Channel for $t {
            #[inline]
            fn to_channel(self) -> u8 {
                self.min(255) as u8
            }
        }
    )*};
}

macro_rules! signed_channel {
    ($($t:ty),*) => {$(
        impl Channel for $t {
            #[inline]
            fn to_channel(self) -> u8 {
                self.clamp(0, 255) as u8
            }
        }
    )*};
}

unsigned_channel!(u16, u32, u64, u128, usize);
signed_channel!(i16, i32, i64, i128, isize);

// Float-to-int `as` casts truncate toward zero, saturate at the target
// bounds and send NaN to 0.
impl Channel for f32 {
    #[inline]
    fn to_channel(self) -> u8 {
        self as u8
    }
}

impl Channel for f64 {
    #[inline]
    fn to_channel(self) -> u8 {
        self as u8
    }
}

#[cfg(feature = "rgb")]
mod rgb_interop {
    use super::Rgba;
    use rgb::alt::{BGR8, BGRA8};
    use rgb::{RGB8, RGBA8};

    impl From<RGBA8> for Rgba {
        fn from(p: RGBA8) -> Self {
            Rgba::new(p.r, p.g, p.b, p.a)
        }
    }

    impl From<RGB8> for Rgba {
        fn from(p: RGB8) -> Self {
            Rgba::opaque(p.r, p.g, p.b)
        }
    }

    impl From<BGRA8> for Rgba {
        fn from(p: BGRA8) -> Self {
            Rgba::new(p.r, p.g, p.b, p.a)
        }
    }

    impl From<BGR8> for Rgba {
        fn from(p: BGR8) -> Self {
            Rgba::opaque(p.r, p.g, p.b)
        }
    }

    impl From<Rgba> for RGBA8 {
        fn from(c: Rgba) -> Self {
            RGBA8::new(c.r, c.g, c.b, c.a)
        }
    }

    impl From<Rgba> for RGB8 {
        fn from(c: Rgba) -> Self {
            RGB8::new(c.r, c.g, c.b)
        }
    }

    impl From<Rgba> for BGRA8 {
        fn from(c: Rgba) -> Self {
            BGRA8 {
                b: c.b,
                g: c.g,
                r: c.r,
                a: c.a,
            }
        }
    }

    impl From<Rgba> for BGR8 {
        fn from(c: Rgba) -> Self {
            BGR8 {
                b: c.b,
                g: c.g,
                r: c.r,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_sizes() {
        assert_eq!(PixelLayout::for_alpha(false), PixelLayout::Bgr8);
        assert_eq!(PixelLayout::for_alpha(true), PixelLayout::Bgra8);
        assert_eq!(PixelLayout::Bgr8.bytes_per_pixel(), 3);
        assert_eq!(PixelLayout::Bgra8.bytes_per_pixel(), 4);
        assert_eq!(PixelLayout::Bgr8.bits_per_pixel(), 24);
        assert_eq!(PixelLayout::Bgra8.bits_per_pixel(), 32);
    }

    #[test]
    fn integer_channels_clamp() {
        assert_eq!((-5i32).to_channel(), 0);
        assert_eq!(300i32.to_channel(), 255);
        assert_eq!(9999i64.to_channel(), 255);
        assert_eq!(128u16.to_channel(), 128);
        assert_eq!(u128::MAX.to_channel(), 255);
        assert_eq!(i8::MIN.to_channel(), 0);
        assert_eq!(i8::MAX.to_channel(), 127);
        assert_eq!(isize::MIN.to_channel(), 0);
    }

    #[test]
    fn float_channels_truncate_then_clamp() {
        assert_eq!(128.9f64.to_channel(), 128);
        assert_eq!((-0.7f32).to_channel(), 0);
        assert_eq!((-300.0f64).to_channel(), 0);
        assert_eq!(255.99f32.to_channel(), 255);
        assert_eq!(1e9f64.to_channel(), 255);
        assert_eq!(f64::NAN.to_channel(), 0);
        assert_eq!(f32::INFINITY.to_channel(), 255);
        assert_eq!(f32::NEG_INFINITY.to_channel(), 0);
    }

    #[test]
    fn packed_key_is_rgba_order() {
        assert_eq!(Rgba::new(0x12, 0x34, 0x56, 0x78).to_u32(), 0x1234_5678);
        assert_ne!(
            Rgba::new(1, 0, 0, 0).to_u32(),
            Rgba::new(0, 0, 0, 1).to_u32()
        );
    }

    #[test]
    fn clamped_constructor() {
        assert_eq!(Rgba::clamped(-5, 300, 128, 9999), Rgba::new(0, 255, 128, 255));
        let t: (u8, u8, u8, u8) = Rgba::opaque(1, 2, 3).into();
        assert_eq!(t, (1, 2, 3, 255));
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb_crate_conversions() {
        let c: Rgba = rgb::RGB8::new(1, 2, 3).into();
        assert_eq!(c, Rgba::new(1, 2, 3, 255));
        let c: Rgba = rgb::alt::BGRA8 { b: 3, g: 2, r: 1, a: 9 }.into();
        assert_eq!(c, Rgba::new(1, 2, 3, 9));
        let back: rgb::RGBA8 = c.into();
        assert_eq!(back, rgb::RGBA8::new(1, 2, 3, 9));
        let c: Rgba = rgb::alt::BGR8 { b: 6, g: 5, r: 4 }.into();
        assert_eq!(c, Rgba::opaque(4, 5, 6));
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb_crate_conversions_from_rgba() {
        let c = Rgba::new(1, 2, 3, 4);
        let rgb8: rgb::RGB8 = c.into();
        assert_eq!(rgb8, rgb::RGB8::new(1, 2, 3));
        let bgra: rgb::alt::BGRA8 = c.into();
        assert_eq!((bgra.b, bgra.g, bgra.r, bgra.a), (3, 2, 1, 4));
        let bgr: rgb::alt::BGR8 = c.into();
        assert_eq!((bgr.b, bgr.g, bgr.r), (3, 2, 1));
        // Alpha is dropped going to RGB8 and comes back opaque.
        let again: Rgba = rgb8.into();
        assert_eq!(again, Rgba::opaque(1, 2, 3));
    }
}
