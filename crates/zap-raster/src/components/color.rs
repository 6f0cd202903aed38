use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical RGBA color.
///
/// Buffers store colors packed as RGB565 (`rrrrrggg gggbbbbb`). Alpha never
/// reaches the packed form, so two colors are transparency-equal when their
/// packed values match even if their alpha differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    u8::MAX
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Conventional color key for sprite sheets.
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: u8::MAX,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Pack into 5-6-5 bits. Alpha is dropped.
    pub const fn to_rgb565(self) -> u16 {
        let r = (self.r as u16 >> 3) << 11;
        let g = (self.g as u16 >> 2) << 5;
        let b = self.b as u16 >> 3;
        r | g | b
    }

    /// Unpack a 5-6-5 value, replicating the high bits into the low ones so
    /// that full-intensity channels come back as 255.
    pub const fn from_rgb565(packed: u16) -> Self {
        let r5 = ((packed >> 11) & 0x1F) as u8;
        let g6 = ((packed >> 5) & 0x3F) as u8;
        let b5 = (packed & 0x1F) as u8;
        Self::rgb(
            (r5 << 3) | (r5 >> 2),
            (g6 << 2) | (g6 >> 4),
            (b5 << 3) | (b5 >> 2),
        )
    }

    /// Color-key comparison used for transparency.
    pub const fn transparency_eq(self, other: Color) -> bool {
        self.to_rgb565() == other.to_rgb565()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for u16 {
    fn from(color: Color) -> Self {
        color.to_rgb565()
    }
}

impl From<u16> for Color {
    fn from(packed: u16) -> Self {
        Self::from_rgb565(packed)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
