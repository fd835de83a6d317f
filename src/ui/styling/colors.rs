//! Color definitions, blending and interpolation
//!
//! Widgets work in 8-bit RGBA so that ripples and icon layers can be
//! composited with transparency. [`Rgba`] implements `PixelColor`, which lets
//! every embedded-graphics primitive and mono font draw straight into a
//! [`Surface`](crate::surface::Surface).
//!
//! # Blending
//!
//! - [`Rgba::over`]: source-over alpha compositing, used by blits
//! - [`Rgba::multiply`]: per-channel multiply, used to mask icon layers
//! - [`Rgba::mix`]: linear interpolation between two colors

use embedded_graphics::pixelcolor::raw::RawU32;
use embedded_graphics::pixelcolor::{PixelColor, Rgb888};

use crate::ui::{UiError, UiResult};

// ============================================================================
// Base Colors
// ============================================================================

/// Opaque black
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

/// Opaque white
pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

/// Default button ink color - light grey
pub const INK_GREY: Rgba = Rgba::rgb(192, 192, 192);

/// Fully transparent white, the cleared state of every layer
pub const TRANSPARENT: Rgba = Rgba::new(255, 255, 255, 0);

// ============================================================================
// Rgba
// ============================================================================

/// An 8-bit per channel color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PixelColor for Rgba {
    type Raw = RawU32;
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from red, green and blue.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with a different alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation towards `other`.
    ///
    /// `amount` outside [0, 1] extrapolates; the result is clamped back into
    /// channel range.
    pub fn mix(self, other: Rgba, amount: f32) -> Rgba {
        let lerp = |x: u8, y: u8| -> u8 {
            let v = x as f32 + (y as f32 - x as f32) * amount;
            v.round().clamp(0.0, 255.0) as u8
        };

        Rgba::new(
            lerp(self.r, other.r),
            lerp(self.g, other.g),
            lerp(self.b, other.b),
            lerp(self.a, other.a),
        )
    }

    /// Composite `self` on top of `dst`.
    pub fn over(self, dst: Rgba) -> Rgba {
        match self.a {
            0 => return dst,
            255 => return self,
            _ => {}
        }

        let sa = self.a as u32;
        let da = dst.a as u32 * (255 - sa) / 255;
        let out_a = sa + da;
        if out_a == 0 {
            return TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 { ((s as u32 * sa + d as u32 * da) / out_a) as u8 };

        Rgba::new(
            channel(self.r, dst.r),
            channel(self.g, dst.g),
            channel(self.b, dst.b),
            out_a as u8,
        )
    }

    /// Multiply every channel, alpha included, by the matching channel of
    /// `other`.
    pub fn multiply(self, other: Rgba) -> Rgba {
        let channel = |x: u8, y: u8| -> u8 { ((x as u32 * y as u32 + 127) / 255) as u8 };

        Rgba::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
            channel(self.a, other.a),
        )
    }
}

impl From<[u8; 3]> for Rgba {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgba::rgb(r, g, b)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Rgba::new(r, g, b, a)
    }
}

impl From<Rgba> for Rgb888 {
    /// Drops the alpha channel.
    fn from(color: Rgba) -> Self {
        Rgb888::new(color.r, color.g, color.b)
    }
}

// ============================================================================
// Channel mixing
// ============================================================================

/// Interpolate between two colors given as raw channel lists.
///
/// Each color must have between 2 and 4 channels. A 3-channel color is
/// treated as opaque. The result is `a + (b - a) * amount` per channel and is
/// left unclamped, so amounts outside [0, 1] produce
/// out-of-range channels that callers have to clamp themselves.
///
/// # Errors
///
/// [`UiError::InvalidChannelCount`] when either color has fewer than 2 or
/// more than 4 channels.
pub fn mix(a: &[u8], b: &[u8], amount: f32) -> UiResult<Vec<f32>> {
    for color in [a, b] {
        if !(2..=4).contains(&color.len()) {
            return Err(UiError::InvalidChannelCount { len: color.len() });
        }
    }

    let a = with_default_alpha(a);
    let b = with_default_alpha(b);

    Ok(a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| x + (y - x) * amount)
        .collect())
}

fn with_default_alpha(color: &[u8]) -> Vec<f32> {
    let mut channels: Vec<f32> = color.iter().map(|&c| c as f32).collect();
    if channels.len() == 3 {
        channels.push(255.0);
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_endpoints_extend_alpha() {
        let a = [10, 20, 30];
        let b = [200, 100, 0, 128];

        assert_eq!(mix(&a, &b, 0.0).unwrap(), [10.0, 20.0, 30.0, 255.0]);
        assert_eq!(mix(&a, &b, 1.0).unwrap(), [200.0, 100.0, 0.0, 128.0]);
    }

    #[test]
    fn test_mix_midpoint() {
        let mixed = mix(&[0, 0, 0, 0], &[255, 100, 50, 255], 0.5).unwrap();
        assert_eq!(mixed, [127.5, 50.0, 25.0, 127.5]);
    }

    #[test]
    fn test_mix_is_not_clamped() {
        let mixed = mix(&[0, 0, 0], &[100, 100, 100], 2.0).unwrap();
        assert_eq!(mixed, [200.0, 200.0, 200.0, 255.0]);

        let mixed = mix(&[0, 0, 0], &[100, 100, 100], -1.0).unwrap();
        assert_eq!(mixed[0], -100.0);
    }

    #[test]
    fn test_mix_rejects_bad_channel_counts() {
        assert!(matches!(
            mix(&[1], &[1, 2, 3], 0.5),
            Err(UiError::InvalidChannelCount { len: 1 })
        ));
        assert!(matches!(
            mix(&[1, 2, 3], &[1, 2, 3, 4, 5], 0.5),
            Err(UiError::InvalidChannelCount { len: 5 })
        ));
        assert!(mix(&[], &[], 0.0).is_err());
    }

    #[test]
    fn test_mix_two_channels_is_accepted() {
        let mixed = mix(&[0, 100], &[100, 200], 0.5).unwrap();
        assert_eq!(mixed, [50.0, 150.0]);
    }

    #[test]
    fn test_rgba_mix_clamps_and_rounds() {
        assert_eq!(WHITE.mix(BLACK, 0.4), Rgba::rgb(153, 153, 153));
        assert_eq!(BLACK.mix(WHITE, 1.5), WHITE);
        assert_eq!(BLACK.mix(WHITE, -0.5), BLACK);
    }

    #[test]
    fn test_over_opaque_and_transparent_sources() {
        let dst = Rgba::rgb(10, 20, 30);
        assert_eq!(Rgba::rgb(1, 2, 3).over(dst), Rgba::rgb(1, 2, 3));
        assert_eq!(TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn test_over_half_alpha_on_opaque() {
        let blended = Rgba::new(255, 0, 0, 128).over(BLACK);
        assert_eq!(blended.a, 255);
        assert!((blended.r as i32 - 128).abs() <= 1);
        assert_eq!(blended.g, 0);
    }

    #[test]
    fn test_over_onto_transparent_keeps_source() {
        let src = Rgba::new(40, 50, 60, 100);
        assert_eq!(src.over(TRANSPARENT.with_alpha(0)), src);
    }

    #[test]
    fn test_multiply_by_white_mask_scales_alpha() {
        let mask = WHITE.with_alpha(0);
        assert_eq!(Rgba::rgb(12, 34, 56).multiply(mask), Rgba::new(12, 34, 56, 0));
        assert_eq!(Rgba::rgb(12, 34, 56).multiply(WHITE), Rgba::rgb(12, 34, 56));
    }
}
