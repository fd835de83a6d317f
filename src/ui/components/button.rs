// src/ui/components/button.rs
//! Button component with a text label and multi-touch ink ripples

use core::mem;
use core::time::Duration;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_10X20};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use log::{debug, trace};

use super::ink::{self, InkPhase, Ripple};
use crate::surface::Surface;
use crate::ui::core::{FrameContext, InputEvent, TouchResult, Widget, contains};
use crate::ui::styling::{BLACK, INK_GREY, Rgba, TRANSPARENT, WHITE};
use crate::ui::{UiError, UiResult};

/// Maximum label length in bytes
pub const MAX_LABEL_LEN: usize = 32;

/// Called when the button is clicked.
///
/// The second argument is the click position relative to the button, or
/// `None` for programmatic clicks.
pub type ClickCallback = Box<dyn FnMut(&mut Button, Option<Point>)>;

/// Construction options for [`Button`]
#[derive(Clone)]
pub struct ButtonConfig {
    /// Width and height in pixels. Default 50x50.
    pub size: Size,
    /// Label font. Default 10x20 mono.
    pub font: &'static MonoFont<'static>,
    /// Label color. Default black.
    pub text_color: Rgba,
    /// Default white.
    pub background_color: Rgba,
    /// Default black.
    pub outline_color: Rgba,
    /// Default 2px.
    pub outline_width: u32,
    /// Show ink ripples on clicks. Default `true`.
    pub ink: bool,
    /// Default light grey.
    pub ink_color: Rgba,
    /// Lifetime of an ink ripple. Default 300ms.
    pub ink_duration: Duration,
    /// Default `true`.
    pub visible: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            size: Size::new(50, 50),
            font: &FONT_10X20,
            text_color: BLACK,
            background_color: WHITE,
            outline_color: BLACK,
            outline_width: 2,
            ink: true,
            ink_color: INK_GREY,
            ink_duration: Duration::from_millis(300),
            visible: true,
        }
    }
}

/// Clickable widget with a centred label
///
/// Every click leaves a ripple expanding from the point that was clicked;
/// several ripples can be in flight at once.
///
/// All visual setters rebuild the cached layers immediately, so prefer
/// configuring a button up front over changing it every frame.
///
/// # Layers
/// Drawn bottom to top:
/// 1. Outline and background
/// 2. Ripple overlay
/// 3. Label, so it stays legible over ripples
///
/// # Examples
/// ```ignore
/// let button = Button::new(
///     Point::new(20, 50),
///     "+1",
///     ButtonConfig {
///         size: Size::new(80, 40),
///         ..Default::default()
///     },
/// )?
/// .on_click(|_, _| counter.set(counter.get() + 1));
/// ```
pub struct Button {
    position: Point,
    size: Size,
    visible: bool,
    label: heapless::String<MAX_LABEL_LEN>,
    font: &'static MonoFont<'static>,
    text_color: Rgba,
    background_color: Rgba,
    outline_color: Rgba,
    outline_width: u32,
    ink: bool,
    ink_color: Rgba,
    ink_duration: Duration,
    ripples: Vec<Ripple>,
    on_click: Option<ClickCallback>,

    // Render caches
    body: Surface,
    ink_overlay: Surface,
    text_layer: Surface,
    radius: f32,
    ink_scratch: Surface,
}

impl Button {
    /// Create a button labelled `text`.
    ///
    /// # Errors
    ///
    /// [`UiError::LabelTooLong`] if `text` exceeds [`MAX_LABEL_LEN`] bytes.
    pub fn new(position: Point, text: &str, config: ButtonConfig) -> UiResult<Self> {
        let mut button = Self {
            position,
            size: config.size,
            visible: config.visible,
            label: to_label(text)?,
            font: config.font,
            text_color: config.text_color,
            background_color: config.background_color,
            outline_color: config.outline_color,
            outline_width: config.outline_width,
            ink: config.ink,
            ink_color: config.ink_color,
            ink_duration: config.ink_duration,
            ripples: Vec::new(),
            on_click: None,
            body: Surface::new(Size::zero()),
            ink_overlay: Surface::new(Size::zero()),
            text_layer: Surface::new(Size::zero()),
            radius: 0.0,
            ink_scratch: Surface::new(Size::zero()),
        };
        button.rebuild();
        Ok(button)
    }

    /// Attach the click callback.
    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Button, Option<Point>) + 'static,
    {
        self.on_click = Some(Box::new(callback));
        self
    }

    pub fn set_on_click(&mut self, callback: Option<ClickCallback>) {
        self.on_click = callback;
    }

    /// Simulate a click: fire the callback with no position and, if
    /// `generate_ink` is set, start a ripple from the centre.
    pub fn click(&mut self, generate_ink: bool, frame: &FrameContext) {
        self.notify(None);
        if generate_ink {
            self.create_ink(None, frame);
        }
    }

    /// Start a ripple at `origin` (local coordinates), or at the centre when
    /// `None`. Does nothing while ink is disabled.
    pub fn create_ink(&mut self, origin: Option<Point>, frame: &FrameContext) {
        if !self.ink {
            return;
        }

        let origin = origin.unwrap_or_else(|| {
            Point::new((self.size.width / 2) as i32, (self.size.height / 2) as i32)
        });
        self.ripples.push(Ripple::new(origin, frame.now_ms));
    }

    /// Ripples that have not been pruned yet.
    pub fn active_ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn text(&self) -> &str {
        &self.label
    }

    /// Change the label. Re-renders the text layer.
    ///
    /// # Errors
    ///
    /// [`UiError::LabelTooLong`] if `text` exceeds [`MAX_LABEL_LEN`] bytes;
    /// the label is left unchanged.
    pub fn set_text(&mut self, text: &str) -> UiResult<()> {
        self.label = to_label(text)?;
        self.render_text();
        Ok(())
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Change the label font. Re-renders the text layer.
    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
        self.render_text();
    }

    pub fn text_color(&self) -> Rgba {
        self.text_color
    }

    /// Change the label color. Re-renders the text layer.
    pub fn set_text_color(&mut self, color: Rgba) {
        self.text_color = color;
        self.render_text();
    }

    pub fn background_color(&self) -> Rgba {
        self.background_color
    }

    /// Change the background. Rebuilds every cached layer.
    pub fn set_background_color(&mut self, color: Rgba) {
        self.background_color = color;
        self.rebuild();
    }

    pub fn outline_color(&self) -> Rgba {
        self.outline_color
    }

    /// Change the outline color. Rebuilds every cached layer.
    pub fn set_outline_color(&mut self, color: Rgba) {
        self.outline_color = color;
        self.rebuild();
    }

    pub fn outline_width(&self) -> u32 {
        self.outline_width
    }

    /// Change the outline width. Rebuilds every cached layer.
    pub fn set_outline_width(&mut self, width: u32) {
        self.outline_width = width;
        self.rebuild();
    }

    /// Resize the button. Rebuilds every cached layer.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.rebuild();
    }

    pub fn ink_enabled(&self) -> bool {
        self.ink
    }

    pub fn set_ink(&mut self, ink: bool) {
        self.ink = ink;
    }

    pub fn ink_color(&self) -> Rgba {
        self.ink_color
    }

    pub fn set_ink_color(&mut self, color: Rgba) {
        self.ink_color = color;
    }

    pub fn set_ink_duration(&mut self, duration: Duration) {
        self.ink_duration = duration;
    }

    fn notify(&mut self, click: Option<Point>) {
        if let Some(mut callback) = self.on_click.take() {
            callback(self, click);
            // The callback may have installed a replacement
            if self.on_click.is_none() {
                self.on_click = Some(callback);
            }
        }
    }

    /// Reallocate all layers for the current size and repaint the static
    /// ones.
    fn rebuild(&mut self) {
        debug!(
            "Rebuilding button caches at {}x{}",
            self.size.width, self.size.height
        );

        let ow = self.outline_width;
        let inner = Rectangle::new(
            Point::new(ow as i32, ow as i32),
            Size::new(
                self.size.width.saturating_sub(2 * ow),
                self.size.height.saturating_sub(2 * ow),
            ),
        );

        self.body = Surface::filled(self.size, self.outline_color);
        self.body.fill_rect(&inner, self.background_color);

        self.radius = self.size.width.max(self.size.height) as f32 * 0.25;
        self.ink_scratch = ink::scratch_for(self.radius);
        self.ink_overlay = Surface::new(self.size);
        self.text_layer = Surface::new(self.size);
        self.render_text();
    }

    fn render_text(&mut self) {
        self.text_layer.fill(TRANSPARENT);
        if self.label.is_empty() {
            return;
        }

        let style = MonoTextStyle::new(self.font, self.text_color);
        let extent = style
            .measure_string(&self.label, Point::zero(), Baseline::Top)
            .bounding_box
            .size;

        let origin = Point::new(
            (self.size.width as i32 - extent.width as i32).div_euclid(2),
            (self.size.height as i32 - extent.height as i32).div_euclid(2),
        );

        let Ok(_) =
            Text::with_baseline(&self.label, origin, style, Baseline::Top).draw(&mut self.text_layer);
    }

    /// Repaint the ripple overlay and drop expired ripples.
    fn paint_ripples(&mut self, now_ms: u64) {
        let mut ripples = mem::take(&mut self.ripples);
        ripples.retain(|ripple| {
            match ink::phase(ripple.started_ms, now_ms, self.ink_duration, self.radius) {
                InkPhase::Expired => false,
                InkPhase::Pending => true,
                InkPhase::Visible { radius, alpha } => {
                    ink::paint(
                        &mut self.ink_scratch,
                        radius,
                        self.ink_color.with_alpha(alpha),
                    );
                    let corner = Point::new(
                        ripple.origin.x - self.radius as i32,
                        ripple.origin.y - self.radius as i32,
                    );
                    self.ink_overlay.blit(&self.ink_scratch, corner, None);
                    true
                }
            }
        });
        self.ripples = ripples;
    }
}

fn to_label(text: &str) -> UiResult<heapless::String<MAX_LABEL_LEN>> {
    let mut label = heapless::String::new();
    label
        .push_str(text)
        .map_err(|_| UiError::LabelTooLong { max: MAX_LABEL_LEN })?;
    Ok(label)
}

impl Widget for Button {
    /// Buttons have no per-frame state; ripples age against the clock and
    /// are pruned while drawing.
    fn update(&mut self, _frame: &FrameContext) {}

    fn collide(&self, point: Point) -> bool {
        self.visible && contains(self.position, self.size, point)
    }

    fn handle_event(
        &mut self,
        event: InputEvent,
        pointer: Point,
        frame: &FrameContext,
    ) -> TouchResult {
        if !self.visible || event != InputEvent::PointerReleased || !self.collide(pointer) {
            return TouchResult::NotHandled;
        }

        let relative = pointer - self.position;
        trace!("Button {:?} clicked at {:?}", self.label.as_str(), relative);

        self.notify(Some(relative));
        self.create_ink(Some(relative), frame);
        TouchResult::Handled
    }

    fn draw(&mut self, target: &mut Surface, frame: &FrameContext) {
        if !self.visible {
            return;
        }

        self.ink_overlay.fill(TRANSPARENT);
        if self.ink {
            self.paint_ripples(frame.now_ms);
        }

        target.blit(&self.body, self.position, None);
        target.blit(&self.ink_overlay, self.position, None);
        target.blit(&self.text_layer, self.position, None);
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Option<Size> {
        Some(self.size)
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
