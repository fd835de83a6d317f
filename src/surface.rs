//! Owned RGBA pixel buffer used as every widget's render target.
//!
//! Primitives drawn through `DrawTarget` *replace* pixels, alpha included, so
//! a layer can be cleared to transparent and redrawn. Compositing layers on
//! top of each other goes through [`Surface::blit`] (source-over) and
//! [`Surface::blit_multiply`] (per-channel multiply, for icon masks).
//!
//! A finished frame is pushed to real hardware, or to the simulator window,
//! with [`Surface::flush`].

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::trace;

use crate::ui::styling::{Rgba, TRANSPARENT};

/// Clipped span of pixel coordinates, end-exclusive.
#[derive(Debug, Clone, Copy)]
struct Span {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Span {
    fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

/// Heap-allocated RGBA pixel buffer implementing `DrawTarget<Color = Rgba>`.
///
/// A zero-sized surface is valid: it holds no pixels and every operation on
/// it is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    size: Size,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Allocate a fully transparent surface.
    pub fn new(size: Size) -> Self {
        Self::filled(size, TRANSPARENT)
    }

    /// Allocate a surface with every pixel set to `color`.
    pub fn filled(size: Size, color: Rgba) -> Self {
        let count = size.width as usize * size.height as usize;
        Self {
            size,
            pixels: vec![color; count],
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Color at `point`, or `None` outside the surface.
    pub fn pixel(&self, point: Point) -> Option<Rgba> {
        self.index(point.x, point.y).map(|idx| self.pixels[idx])
    }

    /// Raw pixel rows, top to bottom.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Replace every pixel with `color`.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Replace the pixels of `area` (clipped to the surface) with `color`.
    pub fn fill_rect(&mut self, area: &Rectangle, color: Rgba) {
        let span = self.clip(area.top_left, area.size);
        if span.is_empty() {
            return;
        }

        let stride = self.size.width as usize;
        for y in span.y0..span.y1 {
            let row = y as usize * stride;
            self.pixels[row + span.x0 as usize..row + span.x1 as usize].fill(color);
        }
    }

    /// Composite `src` onto this surface with its top-left corner at `dest`.
    ///
    /// `area` selects a sub-rectangle of `src` to copy; `None` copies all of
    /// it. Both the source area and the destination are clipped.
    pub fn blit(&mut self, src: &Surface, dest: Point, area: Option<Rectangle>) {
        self.composite(src, dest, area, Rgba::over);
    }

    /// Multiply every overlapping pixel by the matching pixel of `src`.
    ///
    /// With a white mask this keeps colors and scales alpha by the mask's
    /// coverage. Pixels outside `src` are left untouched.
    pub fn blit_multiply(&mut self, src: &Surface, dest: Point) {
        self.composite(src, dest, None, |s, d| d.multiply(s));
    }

    /// Send the whole surface to `display`, dropping alpha.
    pub fn flush<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        if self.pixels.is_empty() {
            return Ok(());
        }

        trace!("Flushing {}x{} surface", self.size.width, self.size.height);

        let area = Rectangle::new(Point::zero(), self.size);
        display.fill_contiguous(&area, self.pixels.iter().map(|&c| Rgb888::from(c)))
    }

    fn composite<F>(&mut self, src: &Surface, dest: Point, area: Option<Rectangle>, blend: F)
    where
        F: Fn(Rgba, Rgba) -> Rgba,
    {
        let area = area.unwrap_or_else(|| Rectangle::new(Point::zero(), src.size));
        let src_span = src.clip(area.top_left, area.size);
        if src_span.is_empty() {
            return;
        }

        // Shift the destination by however much the source area was clipped
        let offset = Point::new(
            dest.x + (src_span.x0 - area.top_left.x),
            dest.y + (src_span.y0 - area.top_left.y),
        );
        let copy = Size::new(
            (src_span.x1 - src_span.x0) as u32,
            (src_span.y1 - src_span.y0) as u32,
        );
        let dst_span = self.clip(offset, copy);
        if dst_span.is_empty() {
            return;
        }

        let dx = src_span.x0 - offset.x;
        let dy = src_span.y0 - offset.y;
        let src_stride = src.size.width as usize;
        let dst_stride = self.size.width as usize;

        for y in dst_span.y0..dst_span.y1 {
            let src_row = (y + dy) as usize * src_stride;
            let dst_row = y as usize * dst_stride;
            for x in dst_span.x0..dst_span.x1 {
                let s = src.pixels[src_row + (x + dx) as usize];
                let d = &mut self.pixels[dst_row + x as usize];
                *d = blend(s, *d);
            }
        }
    }

    /// Intersect a rectangle with the surface bounds.
    fn clip(&self, top_left: Point, size: Size) -> Span {
        let w = self.size.width as i32;
        let h = self.size.height as i32;

        Span {
            x0: top_left.x.clamp(0, w),
            y0: top_left.y.clamp(0, h),
            x1: top_left.x.saturating_add(size.width as i32).clamp(0, w),
            y1: top_left.y.saturating_add(size.height as i32).clamp(0, h),
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u32) < self.size.width && (y as u32) < self.size.height {
            Some(y as usize * self.size.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Surface {
    type Color = Rgba;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = self.index(coord.x, coord.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let mut colors = colors.into_iter();
        for row in 0..area.size.height as i32 {
            for col in 0..area.size.width as i32 {
                let Some(color) = colors.next() else {
                    return Ok(());
                };
                if let Some(idx) = self.index(area.top_left.x + col, area.top_left.y + row) {
                    self.pixels[idx] = color;
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_rect(area, color);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}
