use serde::{Deserialize, Serialize};

/// Linear RGB colour with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB` packed colour.
    pub fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// HSL to RGB. Hue wraps, saturation and lightness are clamped to `[0, 1]`.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l);
        }

        let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let lo = 2.0 * l - hi;
        Self::new(
            hue_to_rgb(lo, hi, h + 1.0 / 3.0),
            hue_to_rgb(lo, hi, h),
            hue_to_rgb(lo, hi, h - 1.0 / 3.0),
        )
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn hue_to_rgb(lo: f32, hi: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::new(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color::new(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsl(2.0 / 3.0, 1.0, 0.5), Color::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert!(close(Color::from_hsl(1.25, 0.7, 0.5), Color::from_hsl(0.25, 0.7, 0.5)));
        assert!(close(Color::from_hsl(-0.75, 0.7, 0.5), Color::from_hsl(0.25, 0.7, 0.5)));
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        assert_eq!(Color::from_hsl(0.4, 0.0, 0.3), Color::new(0.3, 0.3, 0.3));
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0xff0000), Color::new(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hex(0x000000), Color::BLACK);
    }
}
