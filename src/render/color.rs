// src/render/color.rs
//! RGBA colors with straight (non-premultiplied) alpha.

/// An 8-bit per channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::from_hex(0xffffff);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
            a: 0xff,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Replace the alpha channel with `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.with_alpha(a)
    }

    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    pub const fn opaque(self) -> Self {
        self.with_alpha(0xff)
    }

    /// Source-over composite of `self` on top of `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        let sa = self.opacity();
        let da = dst.opacity();
        let out_a = sa + da * (1.0 - sa);
        if out_a <= f32::EPSILON {
            return Rgba::rgba(0, 0, 0, 0);
        }
        let channel = |s: u8, d: u8| {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: (out_a * 255.0).round() as u8,
        }
    }
}
