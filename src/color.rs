//! Color attributes and palettes.
//!
//! Colors are pure styling attributes: charts carry them through to the
//! [`Canvas`](crate::render::Canvas) untouched. Palettes are indexed by the
//! heat map through [`scale`](crate::scale::scale).

use crate::error::Error;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t) as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f64,
    /// Saturation (0.0-1.0).
    pub s: f64,
    /// Lightness (0.0-1.0).
    pub l: f64,
    /// Alpha (0.0-1.0).
    pub a: f64,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h / 360.0;
        let (s, l) = (self.s, self.l);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;
            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::new(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

/// An ordered, non-empty list of colors indexed from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Rgba>", into = "Vec<Rgba>"))]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Wrap a list of colors; `None` when empty.
    #[must_use]
    pub fn new(colors: Vec<Rgba>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self { colors })
        }
    }

    /// `n` colors running from dark red through orange to pale yellow.
    ///
    /// `n == 0` is treated as 1.
    #[must_use]
    pub fn heat(n: usize, alpha: f64) -> Self {
        let n = n.max(1);
        let colors = (0..n)
            .map(|i| {
                let t = if n == 1 { 0.5 } else { i as f64 / (n - 1) as f64 };
                Hsla::new(60.0 * t, 1.0, 0.25 + 0.6 * t, alpha).to_rgba()
            })
            .collect();
        Self { colors }
    }

    /// `n` colors interpolated between `from` and `to`.
    #[must_use]
    pub fn gradient(from: Rgba, to: Rgba, n: usize) -> Self {
        let n = n.max(1);
        let colors = (0..n)
            .map(|i| {
                let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
                from.lerp(to, t)
            })
            .collect();
        Self { colors }
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; palettes hold at least one color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, saturating at the last entry.
    #[must_use]
    pub fn get(&self, index: usize) -> Rgba {
        self.colors[index.min(self.colors.len() - 1)]
    }

    /// All colors.
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

impl TryFrom<Vec<Rgba>> for Palette {
    type Error = Error;

    fn try_from(colors: Vec<Rgba>) -> Result<Self, Error> {
        Self::new(colors).ok_or_else(|| Error::config("a palette needs at least one color"))
    }
}

impl From<Palette> for Vec<Rgba> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}
