/// 24-bit display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex color.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let v = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8))
    }

    /// YIQ-weighted luminance, 0..=255.
    pub fn luminance(&self) -> u32 {
        (299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32) / 1000
    }
}

/// Foreground choice for text drawn over a colored background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Foreground {
    Dark,
    Light,
}

/// Flow-Free-style endpoint colors; path ids wrap around past 16, so
/// puzzles with more paths than this reuse colors.
pub const PALETTE: [Rgb; 16] = [
    Rgb::new(0xe7, 0x4c, 0x3c),
    Rgb::new(0x34, 0x98, 0xdb),
    Rgb::new(0x2e, 0xcc, 0x71),
    Rgb::new(0xf1, 0xc4, 0x0f),
    Rgb::new(0xe6, 0x7e, 0x22),
    Rgb::new(0x9b, 0x59, 0xb6),
    Rgb::new(0x1a, 0xbc, 0x9c),
    Rgb::new(0xe9, 0x1e, 0x63),
    Rgb::new(0x00, 0xbc, 0xd4),
    Rgb::new(0xcd, 0xdc, 0x39),
    Rgb::new(0x3f, 0x51, 0xb5),
    Rgb::new(0xff, 0xc1, 0x07),
    Rgb::new(0x79, 0x55, 0x48),
    Rgb::new(0x9e, 0x9e, 0x9e),
    Rgb::new(0xff, 0x57, 0x22),
    Rgb::new(0x60, 0x7d, 0x8b),
];

/// Display color for a path id. 0 (no path) has no color.
pub fn color_for(n: u16) -> Option<Rgb> {
    if n == 0 {
        return None;
    }
    Some(PALETTE[(n as usize - 1) % PALETTE.len()])
}

/// Readable foreground against `bg`. Dark iff luminance >= 128; no
/// background defaults to dark.
pub fn contrast(bg: Option<Rgb>) -> Foreground {
    match bg {
        Some(c) if c.luminance() < 128 => Foreground::Light,
        _ => Foreground::Dark,
    }
}
