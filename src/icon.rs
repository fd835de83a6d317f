//! Icon masks: foreground opacity bitmaps used to shape checkbox icons.
//!
//! A mask stores one coverage value per pixel (0 = background,
//! 255 = foreground). Decoding image files is left to the caller; build masks
//! from raw coverage or from the alpha channel of a [`Surface`].

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Polyline, PrimitiveStyle, Rectangle};

use crate::surface::Surface;
use crate::ui::styling::{TRANSPARENT, WHITE};
use crate::ui::{UiError, UiResult};

/// Side length of the built-in check mark mask.
const CHECK_MARK_SIDE: u32 = 64;

/// Stroke width of the built-in check mark, at [`CHECK_MARK_SIDE`].
const CHECK_MARK_STROKE: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMask {
    size: Size,
    coverage: Vec<u8>,
}

impl IconMask {
    /// Wrap raw coverage values, row by row.
    ///
    /// # Errors
    ///
    /// [`UiError::MaskSizeMismatch`] when `coverage` does not hold exactly
    /// `width * height` values.
    pub fn from_coverage(size: Size, coverage: Vec<u8>) -> UiResult<Self> {
        let expected = size.width as usize * size.height as usize;
        if coverage.len() != expected {
            return Err(UiError::MaskSizeMismatch {
                expected,
                actual: coverage.len(),
            });
        }

        Ok(Self { size, coverage })
    }

    /// Take coverage from the alpha channel of `surface`.
    pub fn from_surface(surface: &Surface) -> Self {
        Self {
            size: surface.size(),
            coverage: surface.pixels().iter().map(|p| p.a).collect(),
        }
    }

    /// The default checkbox icon: a thick check mark.
    pub fn check_mark() -> Self {
        let mut canvas = Surface::filled(Size::new(CHECK_MARK_SIDE, CHECK_MARK_SIDE), TRANSPARENT);
        let points = [Point::new(14, 33), Point::new(27, 46), Point::new(50, 18)];

        let Ok(()) = Polyline::new(&points)
            .into_styled(PrimitiveStyle::with_stroke(WHITE, CHECK_MARK_STROKE))
            .draw(&mut canvas);

        Self::from_surface(&canvas)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Coverage at `point`, or `None` outside the mask.
    pub fn coverage(&self, point: Point) -> Option<u8> {
        if point.x < 0
            || point.y < 0
            || point.x as u32 >= self.size.width
            || point.y as u32 >= self.size.height
        {
            return None;
        }
        Some(self.coverage[point.y as usize * self.size.width as usize + point.x as usize])
    }

    /// Nearest-neighbour resample to `size`. Zero-sized inputs or outputs
    /// give an empty mask.
    pub fn scaled(&self, size: Size) -> IconMask {
        if self.size.width == 0 || self.size.height == 0 {
            return IconMask {
                size,
                coverage: vec![0; size.width as usize * size.height as usize],
            };
        }

        let mut coverage = Vec::with_capacity(size.width as usize * size.height as usize);
        for y in 0..size.height as u64 {
            let sy = (y * self.size.height as u64 / size.height as u64) as usize;
            for x in 0..size.width as u64 {
                let sx = (x * self.size.width as u64 / size.width as u64) as usize;
                coverage.push(self.coverage[sy * self.size.width as usize + sx]);
            }
        }

        IconMask { size, coverage }
    }

    /// White surface carrying this mask's coverage as alpha, ready for
    /// [`Surface::blit_multiply`].
    pub fn to_surface(&self) -> Surface {
        let mut surface = Surface::new(self.size);
        let pixels = self.coverage.iter().map(|&c| WHITE.with_alpha(c));

        let area = Rectangle::new(Point::zero(), self.size);
        let Ok(()) = surface.fill_contiguous(&area, pixels);
        surface
    }
}

impl Default for IconMask {
    fn default() -> Self {
        Self::check_mark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coverage_checks_length() {
        assert!(IconMask::from_coverage(Size::new(2, 2), vec![0; 4]).is_ok());
        assert!(matches!(
            IconMask::from_coverage(Size::new(2, 2), vec![0; 3]),
            Err(UiError::MaskSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_check_mark_has_foreground_and_background() {
        let mask = IconMask::check_mark();
        assert_eq!(mask.size(), Size::new(CHECK_MARK_SIDE, CHECK_MARK_SIDE));
        assert_eq!(mask.coverage(Point::new(38, 32)), Some(255));
        assert_eq!(mask.coverage(Point::new(0, 0)), Some(0));
        assert_eq!(mask.coverage(Point::new(63, 63)), Some(0));
    }

    #[test]
    fn test_scaled_nearest_neighbour() {
        let mask = IconMask::from_coverage(Size::new(2, 1), vec![10, 200]).unwrap();
        let scaled = mask.scaled(Size::new(4, 2));

        assert_eq!(scaled.coverage(Point::new(0, 0)), Some(10));
        assert_eq!(scaled.coverage(Point::new(1, 1)), Some(10));
        assert_eq!(scaled.coverage(Point::new(2, 0)), Some(200));
        assert_eq!(scaled.coverage(Point::new(3, 1)), Some(200));
    }

    #[test]
    fn test_scaled_degenerate_sizes() {
        let mask = IconMask::check_mark();
        assert_eq!(mask.scaled(Size::zero()).size(), Size::zero());

        let single = mask.scaled(Size::new(1, 1));
        assert_eq!(single.size(), Size::new(1, 1));
        assert!(single.coverage(Point::zero()).is_some());

        let empty = IconMask::from_coverage(Size::zero(), Vec::new()).unwrap();
        assert_eq!(empty.scaled(Size::new(3, 3)).coverage(Point::new(2, 2)), Some(0));
    }

    #[test]
    fn test_to_surface_is_white_with_coverage_alpha() {
        let mask = IconMask::from_coverage(Size::new(2, 1), vec![0, 128]).unwrap();
        let surface = mask.to_surface();

        assert_eq!(surface.pixel(Point::new(0, 0)), Some(WHITE.with_alpha(0)));
        assert_eq!(surface.pixel(Point::new(1, 0)), Some(WHITE.with_alpha(128)));
    }
}
