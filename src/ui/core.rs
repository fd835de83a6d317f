// src/ui/core.rs
//! Core UI traits and types for the inkui widget system

use embedded_graphics::prelude::*;
use log::warn;

use crate::surface::Surface;

/// Frame rate assumed when no usable estimate is available.
pub const DEFAULT_FPS: f32 = 60.0;

/// Per-frame timing handed to every widget call.
///
/// Replaces any global clock: drivers build one per frame, tests build them
/// with fixed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Current frame rate estimate. Always positive and finite.
    pub fps: f32,
    /// Monotonic time in milliseconds.
    pub now_ms: u64,
}

impl FrameContext {
    /// Build a context, replacing a zero, negative or non-finite `fps` with
    /// [`DEFAULT_FPS`].
    pub fn new(fps: f32, now_ms: u64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            warn!("Unusable frame rate {fps}, falling back to {DEFAULT_FPS}");
            DEFAULT_FPS
        };

        Self { fps, now_ms }
    }

    /// Same frame rate, different time.
    pub fn at(self, now_ms: u64) -> Self {
        Self { now_ms, ..self }
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new(DEFAULT_FPS, 0)
    }
}

/// Input events routed through the widget tree.
///
/// The pointer position travels separately, in the coordinate space of
/// whichever widget receives the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A pointer button went down
    PointerPressed,
    /// A pointer button was released; the only event widgets act on
    PointerReleased,
    /// The pointer moved
    PointerMoved,
    /// A key was pressed
    KeyPressed,
    /// The application was asked to quit
    Quit,
}

/// Result from handling an input event
///
/// Purely informational: containers deliver every event to every child
/// whatever earlier children returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchResult {
    /// Event changed this element or one of its children
    Handled,
    /// Event had no effect
    NotHandled,
}

impl TouchResult {
    pub fn is_handled(self) -> bool {
        matches!(self, TouchResult::Handled)
    }

    /// `Handled` if either result is.
    pub fn or(self, other: TouchResult) -> TouchResult {
        if self.is_handled() || other.is_handled() {
            TouchResult::Handled
        } else {
            TouchResult::NotHandled
        }
    }
}

/// Contract shared by every visual element.
///
/// An invisible widget ignores input and draws nothing but is still
/// updated, so its animations keep running while hidden.
pub trait Widget {
    /// Advance per-frame state. Called every frame regardless of visibility.
    fn update(&mut self, frame: &FrameContext);

    /// Whether `point` (in the parent's coordinates) lies on this widget.
    fn collide(&self, point: Point) -> bool;

    /// Handle an input event with the pointer at `pointer` (in the parent's
    /// coordinates).
    fn handle_event(
        &mut self,
        event: InputEvent,
        pointer: Point,
        frame: &FrameContext,
    ) -> TouchResult;

    /// Render onto `target` at this widget's position.
    fn draw(&mut self, target: &mut Surface, frame: &FrameContext);

    /// Top-left corner in the parent's coordinates.
    fn position(&self) -> Point;

    fn set_position(&mut self, position: Point);

    /// Pixel size, or `None` for widgets without bounds.
    fn size(&self) -> Option<Size>;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);
}

/// Half-open bounds test shared by the bounded widgets.
pub(crate) fn contains(position: Point, size: Size, point: Point) -> bool {
    let local = point - position;
    local.x >= 0
        && local.y >= 0
        && (local.x as u32) < size.width
        && (local.y as u32) < size.height
}
