//! Source colour keys and reduced-precision hardware colours.

use std::fmt;

/// Multiplier that maps an even hardware channel (0..=14) back towards 0..=255.
pub const CHANNEL_SCALE: u8 = 18;

/// A 24-bit RGB value identifying one distinct source colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(u32);

impl ColorKey {
    /// Build a key from 8-bit channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The raw `0xRRGGBB` value.
    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Convert to an RGB triple.
    pub fn to_rgb(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Round down to the nearest even value.
pub const fn even_floor(value: u8) -> u8 {
    value & !1
}

/// Reduce an 8-bit channel to the even 4-bit value the hardware stores.
///
/// `floor(c / 16)` gives 4 bits, rounding down to even drops the last one:
/// the result is always one of 0, 2, ..., 14.
pub const fn quantize_channel(channel: u8) -> u8 {
    even_floor(channel >> 4)
}

/// A hardware colour: three even channel values in `0..=14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HardwareColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HardwareColor {
    /// Quantize an 8-bit RGB colour.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: quantize_channel(r),
            g: quantize_channel(g),
            b: quantize_channel(b),
        }
    }

    /// Quantize a source colour key.
    pub const fn from_key(key: ColorKey) -> Self {
        Self::from_rgb(key.r(), key.g(), key.b())
    }

    /// The 12-bit composite word loaded into a palette register:
    /// blue in bits 8..12, green in bits 4..8, red in bits 0..4.
    pub const fn packed(self) -> u16 {
        ((self.b as u16) << 8) | ((self.g as u16) << 4) | self.r as u16
    }

    /// Inverse of [`HardwareColor::packed`].
    pub const fn from_packed(word: u16) -> Self {
        Self {
            r: (word & 0x0F) as u8,
            g: ((word >> 4) & 0x0F) as u8,
            b: ((word >> 8) & 0x0F) as u8,
        }
    }

    /// Approximate 8-bit RGB of this colour as displayed by the hardware.
    pub const fn to_rgb(self) -> [u8; 3] {
        [
            self.r * CHANNEL_SCALE,
            self.g * CHANNEL_SCALE,
            self.b * CHANNEL_SCALE,
        ]
    }
}

impl fmt::Display for HardwareColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.packed())
    }
}
