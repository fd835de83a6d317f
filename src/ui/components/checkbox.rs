// src/ui/components/checkbox.rs
//! Checkbox component with animated fill and ink ripples

use core::mem;
use core::time::Duration;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use log::{debug, trace};

use super::ink::{self, InkPhase};
use crate::icon::IconMask;
use crate::surface::Surface;
use crate::ui::core::{FrameContext, InputEvent, TouchResult, Widget, contains};
use crate::ui::styling::{BLACK, Rgba, TRANSPARENT, WHITE};

/// Called when the checked state changes.
///
/// The second argument is the click position relative to the checkbox, or
/// `None` when the change was made programmatically.
pub type ChangeCallback = Box<dyn FnMut(&mut Checkbox, Option<Point>)>;

/// How the checked state is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// The background fades into the fill color and the icon is cut out of
    /// it in the background color
    #[default]
    Background,
    /// The background stays put and the icon fills with a growing disc
    Icon,
}

/// Construction options for [`Checkbox`]
#[derive(Debug, Clone)]
pub struct CheckboxConfig {
    /// Initial checked state. Default `false`.
    pub checked: bool,
    /// Width and height in pixels. Default 50x50.
    pub size: Size,
    /// Fill, icon and ripple color. Default black.
    pub fill_color: Rgba,
    /// Default white.
    pub background_color: Rgba,
    /// Default black.
    pub outline_color: Rgba,
    /// Default 2px.
    pub outline_width: u32,
    /// Default [`FillMode::Background`].
    pub fill_mode: FillMode,
    /// Show ink ripples on clicks. Default `true`.
    pub ink: bool,
    /// Icon coverage. Default is a check mark.
    pub icon: IconMask,
    /// Default `true`.
    pub visible: bool,
    /// Time for a full unchecked to checked transition. Default 150ms.
    pub anim_duration: Duration,
    /// Lifetime of an ink ripple. Default 150ms.
    pub ink_duration: Duration,
}

impl Default for CheckboxConfig {
    fn default() -> Self {
        Self {
            checked: false,
            size: Size::new(50, 50),
            fill_color: BLACK,
            background_color: WHITE,
            outline_color: BLACK,
            outline_width: 2,
            fill_mode: FillMode::Background,
            ink: true,
            icon: IconMask::check_mark(),
            visible: true,
            anim_duration: Duration::from_millis(150),
            ink_duration: Duration::from_millis(150),
        }
    }
}

/// Toggle widget with an animated fill and optional ink ripples
///
/// The visual state trails the checked flag: every [`update`](Widget::update)
/// moves the animation progress one frame's worth towards 0.0 (unchecked) or
/// 1.0 (checked). Updates keep running while the checkbox is hidden.
///
/// # Examples
/// ```ignore
/// let checkbox = Checkbox::new(
///     Point::new(10, 10),
///     CheckboxConfig {
///         fill_mode: FillMode::Icon,
///         ..Default::default()
///     },
/// )
/// .on_change(|checkbox, click| log::info!("now {}", checkbox.is_checked()));
/// ```
pub struct Checkbox {
    position: Point,
    size: Size,
    visible: bool,
    checked: bool,
    progress: f32,
    fill_color: Rgba,
    background_color: Rgba,
    outline_color: Rgba,
    outline_width: u32,
    fill_mode: FillMode,
    icon: IconMask,
    ink: bool,
    anim_duration: Duration,
    ink_duration: Duration,
    inks: Vec<u64>,
    on_change: Option<ChangeCallback>,

    // Render caches, rebuilt whenever the size or icon changes
    body: Surface,
    icon_layer: Surface,
    icon_mask: Surface,
    radius: f32,
    ink_scratch: Surface,
}

impl Checkbox {
    pub fn new(position: Point, config: CheckboxConfig) -> Self {
        let mut checkbox = Self {
            position,
            size: config.size,
            visible: config.visible,
            checked: config.checked,
            progress: if config.checked { 1.0 } else { 0.0 },
            fill_color: config.fill_color,
            background_color: config.background_color,
            outline_color: config.outline_color,
            outline_width: config.outline_width,
            fill_mode: config.fill_mode,
            icon: config.icon,
            ink: config.ink,
            anim_duration: config.anim_duration,
            ink_duration: config.ink_duration,
            inks: Vec::new(),
            on_change: None,
            body: Surface::new(Size::zero()),
            icon_layer: Surface::new(Size::zero()),
            icon_mask: Surface::new(Size::zero()),
            radius: 0.0,
            ink_scratch: Surface::new(Size::zero()),
        };
        checkbox.rebuild();
        checkbox
    }

    /// Attach the change callback.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut Checkbox, Option<Point>) + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn set_on_change(&mut self, callback: Option<ChangeCallback>) {
        self.on_change = callback;
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checked state programmatically.
    ///
    /// Fires the change callback (with no click position) only when the
    /// state actually changes. No ripple is created.
    pub fn set_checked(&mut self, checked: bool) {
        if checked != self.checked {
            self.checked = checked;
            self.notify(None);
        }
    }

    /// Flip the checked state, optionally with a ripple, and fire the change
    /// callback with no click position.
    pub fn toggle(&mut self, generate_ink: bool, frame: &FrameContext) {
        self.checked = !self.checked;
        if generate_ink {
            self.create_ink(frame);
        }
        self.notify(None);
    }

    /// Start a ripple now, if ink is enabled.
    pub fn create_ink(&mut self, frame: &FrameContext) {
        if self.ink {
            self.inks.push(frame.now_ms);
        }
    }

    /// Visual transition state in [0.0, 1.0].
    pub fn animation_progress(&self) -> f32 {
        self.progress
    }

    /// Start times of ripples that have not been pruned yet.
    pub fn active_ripples(&self) -> &[u64] {
        &self.inks
    }

    /// Resize the checkbox. Reallocates every render cache and rescales the
    /// icon mask.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.rebuild();
    }

    pub fn icon(&self) -> &IconMask {
        &self.icon
    }

    /// Replace the icon. Rescales the cached mask.
    pub fn set_icon(&mut self, icon: IconMask) {
        self.icon = icon;
        self.rebuild_mask();
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn set_fill_mode(&mut self, fill_mode: FillMode) {
        self.fill_mode = fill_mode;
    }

    pub fn fill_color(&self) -> Rgba {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    pub fn background_color(&self) -> Rgba {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Rgba) {
        self.background_color = color;
    }

    pub fn outline_color(&self) -> Rgba {
        self.outline_color
    }

    pub fn set_outline_color(&mut self, color: Rgba) {
        self.outline_color = color;
    }

    pub fn outline_width(&self) -> u32 {
        self.outline_width
    }

    pub fn set_outline_width(&mut self, width: u32) {
        self.outline_width = width;
    }

    pub fn ink_enabled(&self) -> bool {
        self.ink
    }

    pub fn set_ink(&mut self, ink: bool) {
        self.ink = ink;
    }

    pub fn set_anim_duration(&mut self, duration: Duration) {
        self.anim_duration = duration;
    }

    pub fn set_ink_duration(&mut self, duration: Duration) {
        self.ink_duration = duration;
    }

    fn notify(&mut self, click: Option<Point>) {
        if let Some(mut callback) = self.on_change.take() {
            callback(self, click);
            // The callback may have installed a replacement
            if self.on_change.is_none() {
                self.on_change = Some(callback);
            }
        }
    }

    fn rebuild(&mut self) {
        debug!(
            "Rebuilding checkbox caches at {}x{}",
            self.size.width, self.size.height
        );

        self.body = Surface::new(self.size);
        self.icon_layer = Surface::new(self.size);
        self.radius = self.size.width.min(self.size.height) as f32;
        self.ink_scratch = ink::scratch_for(self.radius);
        self.rebuild_mask();
    }

    fn rebuild_mask(&mut self) {
        let side = self.size.width.min(self.size.height);
        self.icon_mask = self.icon.scaled(Size::new(side, side)).to_surface();
    }

    /// Area inside the outline, in local coordinates.
    fn inner(&self) -> Rectangle {
        let ow = self.outline_width;
        Rectangle::new(
            Point::new(ow as i32, ow as i32),
            Size::new(
                self.size.width.saturating_sub(2 * ow),
                self.size.height.saturating_sub(2 * ow),
            ),
        )
    }

    /// Paint the icon layer for the current fill mode and progress.
    ///
    /// Returns `false` when there is nothing to show.
    fn paint_icon_layer(&mut self) -> bool {
        match self.fill_mode {
            FillMode::Background => {
                self.icon_layer.fill(self.background_color);
            }
            FillMode::Icon if self.progress >= 1.0 => {
                self.icon_layer.fill(self.fill_color);
            }
            FillMode::Icon if self.progress <= 0.0 => return false,
            FillMode::Icon => {
                self.icon_layer.fill(TRANSPARENT);

                let radius = (self.radius * self.progress) as u32;
                if radius > 0 {
                    let center = Point::new(
                        (self.size.width / 2) as i32,
                        (self.size.height / 2) as i32,
                    );
                    let Ok(()) = Circle::with_center(center, radius * 2 + 1)
                        .into_styled(PrimitiveStyle::with_fill(self.fill_color))
                        .draw(&mut self.icon_layer);
                }
            }
        }

        self.icon_layer.blit_multiply(&self.icon_mask, Point::zero());
        true
    }

    /// Draw live ripples beneath the checkbox and drop expired ones.
    fn draw_ink(&mut self, target: &mut Surface, now_ms: u64) {
        let offset = Point::new(
            self.position.x - self.radius as i32 + (self.size.width / 2) as i32,
            self.position.y - self.radius as i32 + (self.size.height / 2) as i32,
        );

        let mut inks = mem::take(&mut self.inks);
        inks.retain(
            |&started| match ink::phase(started, now_ms, self.ink_duration, self.radius) {
                InkPhase::Expired => false,
                InkPhase::Pending => true,
                InkPhase::Visible { radius, alpha } => {
                    ink::paint(
                        &mut self.ink_scratch,
                        radius,
                        self.fill_color.with_alpha(alpha),
                    );
                    target.blit(&self.ink_scratch, offset, None);
                    true
                }
            },
        );
        self.inks = inks;
    }
}

impl Widget for Checkbox {
    fn update(&mut self, frame: &FrameContext) {
        let direction = if self.checked { 1.0 } else { -1.0 };
        self.progress += direction / (frame.fps * self.anim_duration.as_secs_f32());
        self.progress = self.progress.clamp(0.0, 1.0);
    }

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

        trace!("Checkbox at {:?} clicked at {:?}", self.position, pointer);

        self.checked = !self.checked;
        self.create_ink(frame);
        self.notify(Some(pointer - self.position));
        TouchResult::Handled
    }

    fn draw(&mut self, target: &mut Surface, frame: &FrameContext) {
        if !self.visible {
            return;
        }

        let inner = self.inner();

        // Outline, then the inner plate
        self.body.fill(self.outline_color);
        let plate = match self.fill_mode {
            FillMode::Background => self.background_color.mix(self.fill_color, self.progress),
            FillMode::Icon => self.background_color,
        };
        self.body.fill_rect(&inner, plate);

        let show_icon = self.paint_icon_layer();

        if self.ink {
            self.draw_ink(target, frame.now_ms);
        }

        target.blit(&self.body, self.position, None);
        if show_icon {
            target.blit(&self.icon_layer, self.position + inner.top_left, Some(inner));
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn frame(fps: f32, now_ms: u64) -> FrameContext {
        FrameContext::new(fps, now_ms)
    }

    fn recorder(checkbox: Checkbox) -> (Checkbox, Rc<RefCell<Vec<Option<Point>>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let checkbox = checkbox.on_change(move |_, click| sink.borrow_mut().push(click));
        (checkbox, calls)
    }

    #[test]
    fn test_defaults() {
        let checkbox = Checkbox::new(Point::zero(), CheckboxConfig::default());
        assert!(!checkbox.is_checked());
        assert_eq!(checkbox.animation_progress(), 0.0);
        assert_eq!(Widget::size(&checkbox), Some(Size::new(50, 50)));
        assert_eq!(checkbox.fill_mode(), FillMode::Background);
        assert!(checkbox.ink_enabled());
        assert!(checkbox.is_visible());

        let checked = Checkbox::new(
            Point::zero(),
            CheckboxConfig {
                checked: true,
                ..Default::default()
            },
        );
        assert_eq!(checked.animation_progress(), 1.0);
    }

    #[test]
    fn test_animation_reaches_checked_in_fps_times_duration_updates() {
        let mut checkbox = Checkbox::new(Point::zero(), CheckboxConfig::default());
        let frame = frame(60.0, 0);
        let step = 1.0 / (60.0 * 0.15);

        checkbox.toggle(false, &frame);
        // 60 fps * 0.15 s
        for _ in 0..9 {
            checkbox.update(&frame);
        }

        let progress = checkbox.animation_progress();
        assert!(progress <= 1.0);
        assert!(1.0 - progress <= step + 1e-4);
    }

    #[test]
    fn test_animation_stays_in_range_under_rapid_toggling() {
        let mut checkbox = Checkbox::new(Point::zero(), CheckboxConfig::default());
        let frame = frame(7.0, 0);

        for i in 0..100 {
            if i % 3 == 0 {
                checkbox.toggle(false, &frame);
            }
            checkbox.update(&frame);
            let progress = checkbox.animation_progress();
            assert!((0.0..=1.0).contains(&progress));
        }

        for _ in 0..100 {
            checkbox.update(&frame);
        }
        let expected = if checkbox.is_checked() { 1.0 } else { 0.0 };
        assert_eq!(checkbox.animation_progress(), expected);
    }

    #[test]
    fn test_zero_fps_uses_default_rate() {
        let mut checkbox = Checkbox::new(Point::zero(), CheckboxConfig::default());
        checkbox.set_checked(true);
        checkbox.update(&frame(0.0, 0));

        let expected = 1.0 / (crate::ui::DEFAULT_FPS * 0.15);
        assert!((checkbox.animation_progress() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_hidden_checkbox_keeps_animating() {
        let mut checkbox = Checkbox::new(
            Point::zero(),
            CheckboxConfig {
                visible: false,
                anim_duration: Duration::from_millis(500),
                ..Default::default()
            },
        );
        let frame = frame(10.0, 0);

        checkbox.toggle(false, &frame);
        checkbox.update(&frame);
        checkbox.update(&frame);
        assert!((checkbox.animation_progress() - 0.4).abs() < 1e-5);

        // Nothing drawn while hidden
        let mut target = Surface::filled(Size::new(60, 60), WHITE);
        checkbox.draw(&mut target, &frame);
        assert!(target.pixels().iter().all(|&p| p == WHITE));

        checkbox.set_visible(true);
        checkbox.draw(&mut target, &frame);

        // Just inside the outline, clear of the check mark
        let plate = target.pixel(Point::new(3, 3)).unwrap();
        assert!((plate.r as i32 - 153).abs() <= 1);
        assert_eq!(target.pixel(Point::new(0, 0)), Some(BLACK));
    }

    #[test]
    fn test_click_toggles_and_reports_relative_position() {
        let (mut checkbox, calls) = recorder(Checkbox::new(
            Point::new(100, 50),
            CheckboxConfig::default(),
        ));
        let frame = frame(60.0, 42);

        let result =
            checkbox.handle_event(InputEvent::PointerReleased, Point::new(110, 65), &frame);

        assert_eq!(result, TouchResult::Handled);
        assert!(checkbox.is_checked());
        assert_eq!(*calls.borrow(), [Some(Point::new(10, 15))]);
        assert_eq!(checkbox.active_ripples(), [42]);
    }

    #[test]
    fn test_other_events_and_misses_are_ignored() {
        let (mut checkbox, calls) = recorder(Checkbox::new(
            Point::new(10, 10),
            CheckboxConfig::default(),
        ));
        let frame = frame(60.0, 0);

        checkbox.handle_event(InputEvent::PointerPressed, Point::new(20, 20), &frame);
        checkbox.handle_event(InputEvent::PointerMoved, Point::new(20, 20), &frame);
        checkbox.handle_event(InputEvent::PointerReleased, Point::new(60, 20), &frame);
        checkbox.handle_event(InputEvent::PointerReleased, Point::new(9, 20), &frame);

        assert!(!checkbox.is_checked());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_invisible_checkbox_ignores_clicks() {
        let (mut checkbox, calls) = recorder(Checkbox::new(
            Point::zero(),
            CheckboxConfig {
                visible: false,
                ..Default::default()
            },
        ));

        assert!(!checkbox.collide(Point::new(5, 5)));
        let result = checkbox.handle_event(
            InputEvent::PointerReleased,
            Point::new(5, 5),
            &frame(60.0, 0),
        );

        assert_eq!(result, TouchResult::NotHandled);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_toggle_respects_ink_flags() {
        let (mut checkbox, calls) =
            recorder(Checkbox::new(Point::zero(), CheckboxConfig::default()));
        let frame = frame(60.0, 5);

        checkbox.toggle(false, &frame);
        assert!(checkbox.active_ripples().is_empty());

        checkbox.toggle(true, &frame);
        assert_eq!(checkbox.active_ripples(), [5]);
        assert_eq!(*calls.borrow(), [None, None]);

        checkbox.set_ink(false);
        checkbox.toggle(true, &frame);
        assert_eq!(checkbox.active_ripples().len(), 1);
    }

    #[test]
    fn test_set_checked_fires_only_on_change() {
        let (mut checkbox, calls) =
            recorder(Checkbox::new(Point::zero(), CheckboxConfig::default()));

        checkbox.set_checked(false);
        assert!(calls.borrow().is_empty());

        checkbox.set_checked(true);
        assert!(checkbox.is_checked());
        assert_eq!(*calls.borrow(), [None]);
        assert!(checkbox.active_ripples().is_empty());
    }

    #[test]
    fn test_callback_can_read_new_state() {
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let mut checkbox = Checkbox::new(Point::zero(), CheckboxConfig::default())
            .on_change(move |checkbox, _| *sink.borrow_mut() = Some(checkbox.is_checked()));

        checkbox.toggle(false, &frame(60.0, 0));
        assert_eq!(*seen.borrow(), Some(true));

        // Callback survives being invoked
        checkbox.toggle(false, &frame(60.0, 0));
        assert_eq!(*seen.borrow(), Some(false));
    }

    #[test]
    fn test_expired_ripples_are_pruned_on_draw() {
        let mut checkbox = Checkbox::new(Point::new(20, 20), CheckboxConfig::default());
        checkbox.create_ink(&frame(60.0, 1000));
        checkbox.create_ink(&frame(60.0, 1100));

        let mut target = Surface::filled(Size::new(100, 100), WHITE);
        checkbox.draw(&mut target, &frame(60.0, 1200));

        // First ripple is 200ms old (> 150ms), second exactly 100ms
        assert_eq!(checkbox.active_ripples(), [1100]);

        let mut target = Surface::filled(Size::new(100, 100), WHITE);
        checkbox.draw(&mut target, &frame(60.0, 1300));
        assert!(checkbox.active_ripples().is_empty());

        // Only the checkbox itself was drawn
        assert_eq!(target.pixel(Point::new(10, 45)), Some(WHITE));
        assert_eq!(target.pixel(Point::new(20, 20)), Some(BLACK));
    }

    #[test]
    fn test_live_ripple_spills_outside_the_box() {
        let mut checkbox = Checkbox::new(
            Point::new(25, 25),
            CheckboxConfig {
                ink_duration: Duration::from_millis(100),
                ..Default::default()
            },
        );
        checkbox.create_ink(&frame(60.0, 0));

        let mut target = Surface::filled(Size::new(100, 100), WHITE);
        checkbox.draw(&mut target, &frame(60.0, 25));

        // A quarter through: radius 37 around the centre (50, 50), alpha 192
        let below = target.pixel(Point::new(50, 80)).unwrap();
        assert!((below.r as i32 - 63).abs() <= 1);
        assert_eq!(below.a, 255);
        // Beyond the disc
        assert_eq!(target.pixel(Point::new(5, 5)), Some(WHITE));
    }

    #[test]
    fn test_future_ripple_is_kept_but_not_drawn() {
        let mut checkbox = Checkbox::new(Point::zero(), CheckboxConfig::default());
        checkbox.create_ink(&frame(60.0, 500));

        let mut target = Surface::filled(Size::new(60, 60), WHITE);
        checkbox.draw(&mut target, &frame(60.0, 400));
        assert_eq!(checkbox.active_ripples(), [500]);
    }

    #[test]
    fn test_icon_mode_endpoints() {
        let config = CheckboxConfig {
            fill_mode: FillMode::Icon,
            fill_color: Rgba::rgb(200, 0, 0),
            ink: false,
            ..Default::default()
        };

        // Unchecked: plain background, no icon
        let mut checkbox = Checkbox::new(Point::zero(), config.clone());
        let mut target = Surface::filled(Size::new(50, 50), BLACK);
        checkbox.draw(&mut target, &frame(60.0, 0));
        assert_eq!(target.pixel(Point::new(29, 25)), Some(WHITE));

        // Checked: the check mark is painted in the fill color
        let mut checkbox = Checkbox::new(
            Point::zero(),
            CheckboxConfig {
                checked: true,
                ..config
            },
        );
        let mut target = Surface::filled(Size::new(50, 50), BLACK);
        checkbox.draw(&mut target, &frame(60.0, 0));
        assert_eq!(target.pixel(Point::new(29, 25)), Some(Rgba::rgb(200, 0, 0)));
        assert_eq!(target.pixel(Point::new(5, 5)), Some(WHITE));
    }

    #[test]
    fn test_degenerate_sizes_do_not_panic() {
        let frame = frame(60.0, 0);
        for size in [Size::zero(), Size::new(1, 1), Size::new(1, 30), Size::new(3, 3)] {
            let mut checkbox = Checkbox::new(
                Point::zero(),
                CheckboxConfig {
                    size,
                    ..Default::default()
                },
            );
            checkbox.toggle(true, &frame);
            checkbox.update(&frame);
            let mut target = Surface::filled(Size::new(10, 10), WHITE);
            checkbox.draw(&mut target, &frame);

            checkbox.set_fill_mode(FillMode::Icon);
            checkbox.update(&frame);
            checkbox.draw(&mut target, &frame);
        }
    }

    #[test]
    fn test_set_size_changes_bounds() {
        let mut checkbox = Checkbox::new(Point::new(5, 5), CheckboxConfig::default());
        checkbox.set_size(Size::new(20, 10));

        assert_eq!(Widget::size(&checkbox), Some(Size::new(20, 10)));
        assert!(checkbox.collide(Point::new(24, 14)));
        assert!(!checkbox.collide(Point::new(25, 14)));
    }
}
