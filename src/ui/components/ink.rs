//! Ink ripple timing and rendering shared by clickable components.
//!
//! A ripple is an expanding disc that fades out over a fixed duration. Its
//! radius starts at half the component's ink radius and decelerates towards
//! the full radius (square-root curve); its alpha falls linearly from 255 to
//! 0. Expired ripples are dropped lazily, whenever the owner draws.

use core::time::Duration;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::surface::Surface;
use crate::ui::styling::{Rgba, TRANSPARENT};

/// A single ripple started at `started_ms`, centred on `origin` in the
/// owning widget's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ripple {
    pub origin: Point,
    pub started_ms: u64,
}

impl Ripple {
    pub fn new(origin: Point, started_ms: u64) -> Self {
        Self { origin, started_ms }
    }
}

/// Where a ripple is in its lifetime at a given time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum InkPhase {
    /// Older than the ink duration; remove it
    Expired,
    /// Stamped after the current time; keep it but skip this frame
    Pending,
    /// Draw with this radius and alpha
    Visible { radius: u32, alpha: u8 },
}

/// Evaluate a ripple of a component whose full ink radius is `ink_radius`.
pub(crate) fn phase(started_ms: u64, now_ms: u64, duration: Duration, ink_radius: f32) -> InkPhase {
    let Some(age) = now_ms.checked_sub(started_ms) else {
        return InkPhase::Pending;
    };

    let duration_ms = duration.as_millis() as u64;
    if age > duration_ms {
        return InkPhase::Expired;
    }

    let progress = if duration_ms == 0 {
        1.0
    } else {
        age as f32 / duration_ms as f32
    };

    let alpha = 255 - (255.0 * progress) as u8;
    let half = ink_radius / 2.0;
    let radius = (half + half * progress.sqrt()) as u32;

    InkPhase::Visible { radius, alpha }
}

/// Clear `scratch` and paint a ripple disc centred in it.
///
/// `scratch` is a square of side `2 * ink_radius`, so the disc centre sits at
/// `(ink_radius, ink_radius)`.
pub(crate) fn paint(scratch: &mut Surface, radius: u32, color: Rgba) {
    scratch.fill(TRANSPARENT);
    if radius == 0 {
        return;
    }

    let center = Point::new(scratch.width() as i32 / 2, scratch.height() as i32 / 2);
    let Ok(()) = Circle::with_center(center, radius * 2 + 1)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(scratch);
}

/// Square scratch surface for ripples of the given ink radius.
pub(crate) fn scratch_for(ink_radius: f32) -> Surface {
    let side = (ink_radius * 2.0) as u32;
    Surface::new(Size::new(side, side))
}
