// src/ui/layouts/container.rs
//! Containers grouping child widgets under a shared origin

use embedded_graphics::prelude::*;
use log::{debug, trace};

use crate::surface::Surface;
use crate::ui::core::{FrameContext, InputEvent, TouchResult, Widget, contains};
use crate::ui::elements::Element;
use crate::ui::styling::{Rgba, WHITE};

/// Margin used by [`Container::autosize`] callers that have no preference.
pub const DEFAULT_AUTOSIZE_MARGIN: u32 = 5;

/// Construction options for [`Container`]
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Default 300x300.
    pub size: Size,
    /// Fill painted under the children every frame. Default opaque white.
    pub background: Rgba,
    /// Default `true`.
    pub visible: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            size: Size::new(300, 300),
            background: WHITE,
            visible: true,
        }
    }
}

/// Construction options for [`UnboundedContainer`]
#[derive(Debug, Clone)]
pub struct UnboundedContainerConfig {
    /// Default `true`.
    pub visible: bool,
}

impl Default for UnboundedContainerConfig {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Largest `position + size` over the sized children, or the origin when
/// there are none.
fn children_extent(children: &[Element]) -> Point {
    children
        .iter()
        .filter_map(|child| child.size().map(|size| child.position() + size))
        .fold(Point::zero(), |acc, corner| {
            Point::new(acc.x.max(corner.x), acc.y.max(corner.y))
        })
}

// ============================================================================
// Container
// ============================================================================

/// Bounded group of children composited onto a private surface
///
/// Children are positioned relative to the container's top-left corner and
/// drawn in insertion order, so later children paint over earlier ones.
/// Anything a child draws outside the container is clipped.
///
/// Input only reaches the children when the pointer is inside the container.
/// Every child then sees the event; overlapping children all react.
///
/// # Examples
/// ```ignore
/// let mut grid = Container::new(Point::new(10, 10), ContainerConfig::default());
/// grid.push(Checkbox::new(Point::new(5, 5), CheckboxConfig::default()));
/// grid.autosize(DEFAULT_AUTOSIZE_MARGIN, false);
/// ```
pub struct Container {
    position: Point,
    visible: bool,
    background: Rgba,
    surface: Surface,
    children: Vec<Element>,
}

impl Container {
    pub fn new(position: Point, config: ContainerConfig) -> Self {
        Self {
            position,
            visible: config.visible,
            background: config.background,
            surface: Surface::new(config.size),
            children: Vec::new(),
        }
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Append a child on top of the existing ones. Returns its index.
    pub fn push(&mut self, child: impl Into<Element>) -> usize {
        self.children.push(child.into());
        self.children.len() - 1
    }

    /// Remove and return the child at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Element> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn set_background(&mut self, background: Rgba) {
        self.background = background;
    }

    /// Resize the container, reallocating its compositing surface.
    pub fn set_size(&mut self, size: Size) {
        debug!("Resizing container to {}x{}", size.width, size.height);
        self.surface = Surface::new(size);
    }

    /// Shrink or grow to fit the children plus `margin` on the right and
    /// bottom. With `recurse`, child containers are autosized first.
    ///
    /// Children without a size do not contribute.
    pub fn autosize(&mut self, margin: u32, recurse: bool) {
        if recurse {
            for child in &mut self.children {
                child.autosize(margin, recurse);
            }
        }

        let extent = children_extent(&self.children);
        self.set_size(Size::new(
            extent.x.max(0) as u32 + margin,
            extent.y.max(0) as u32 + margin,
        ));
    }
}

impl Widget for Container {
    fn update(&mut self, frame: &FrameContext) {
        for child in &mut self.children {
            child.update(frame);
        }
    }

    fn collide(&self, point: Point) -> bool {
        self.visible && contains(self.position, self.surface.size(), point)
    }

    fn handle_event(
        &mut self,
        event: InputEvent,
        pointer: Point,
        frame: &FrameContext,
    ) -> TouchResult {
        if !self.collide(pointer) {
            return TouchResult::NotHandled;
        }

        let local = pointer - self.position;
        trace!("Container routing {:?} at {:?}", event, local);

        self.children
            .iter_mut()
            .fold(TouchResult::NotHandled, |result, child| {
                result.or(child.handle_event(event, local, frame))
            })
    }

    fn draw(&mut self, target: &mut Surface, frame: &FrameContext) {
        if !self.visible {
            return;
        }

        self.surface.fill(self.background);
        for child in &mut self.children {
            child.draw(&mut self.surface, frame);
        }

        target.blit(&self.surface, self.position, None);
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Option<Size> {
        Some(self.surface.size())
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

// ============================================================================
// UnboundedContainer
// ============================================================================

/// Sizeless group drawing its children straight onto the target
///
/// Useful as the root of a window or to toggle the visibility of several
/// widgets at once. It has no background and never rejects input; its
/// origin is always (0, 0).
pub struct UnboundedContainer {
    visible: bool,
    children: Vec<Element>,
}

impl UnboundedContainer {
    pub fn new(config: UnboundedContainerConfig) -> Self {
        Self {
            visible: config.visible,
            children: Vec::new(),
        }
    }

    /// Replace the children.
    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    /// Append a child on top of the existing ones. Returns its index.
    pub fn push(&mut self, child: impl Into<Element>) -> usize {
        self.children.push(child.into());
        self.children.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Option<Element> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.children.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Unbounded containers have no size of their own, so this only
    /// autosizes child containers (when `recurse` is set).
    pub fn autosize(&mut self, margin: u32, recurse: bool) {
        if recurse {
            for child in &mut self.children {
                child.autosize(margin, recurse);
            }
        }
    }
}

impl Default for UnboundedContainer {
    fn default() -> Self {
        Self::new(UnboundedContainerConfig::default())
    }
}

impl Widget for UnboundedContainer {
    fn update(&mut self, frame: &FrameContext) {
        for child in &mut self.children {
            child.update(frame);
        }
    }

    fn collide(&self, _point: Point) -> bool {
        self.visible
    }

    fn handle_event(
        &mut self,
        event: InputEvent,
        pointer: Point,
        frame: &FrameContext,
    ) -> TouchResult {
        if !self.visible {
            return TouchResult::NotHandled;
        }

        self.children
            .iter_mut()
            .fold(TouchResult::NotHandled, |result, child| {
                result.or(child.handle_event(event, pointer, frame))
            })
    }

    fn draw(&mut self, target: &mut Surface, frame: &FrameContext) {
        if !self.visible {
            return;
        }

        for child in &mut self.children {
            child.draw(target, frame);
        }
    }

    fn position(&self) -> Point {
        Point::zero()
    }

    /// Always anchored at the origin.
    fn set_position(&mut self, _position: Point) {}

    fn size(&self) -> Option<Size> {
        None
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
