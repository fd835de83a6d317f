//! Concrete UI element enum.
//!
//! Containers need to own heterogeneous children and hand them mutably to
//! callers (`child_mut(..).as_button_mut()`). A closed enum keeps that
//! ergonomic without boxing or `Any` downcasts, and can grow as new widgets
//! are added.

use embedded_graphics::prelude::*;

use crate::surface::Surface;
use crate::ui::components::{Button, Checkbox};
use crate::ui::core::{FrameContext, InputEvent, TouchResult, Widget};
use crate::ui::layouts::{Container, UnboundedContainer};

/// A widget that can live inside a container.
pub enum Element {
    Checkbox(Checkbox),
    Button(Button),
    Container(Container),
    Unbounded(UnboundedContainer),
}

impl Element {
    /// Autosize container elements; leaf widgets are left alone.
    pub fn autosize(&mut self, margin: u32, recurse: bool) {
        match self {
            Element::Container(c) => c.autosize(margin, recurse),
            Element::Unbounded(c) => c.autosize(margin, recurse),
            Element::Checkbox(_) | Element::Button(_) => {}
        }
    }

    pub fn as_checkbox(&self) -> Option<&Checkbox> {
        match self {
            Element::Checkbox(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_checkbox_mut(&mut self) -> Option<&mut Checkbox> {
        match self {
            Element::Checkbox(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Element::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Element::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Element::Container(c) => Some(c),
            _ => None,
        }
    }

    fn widget(&self) -> &dyn Widget {
        match self {
            Element::Checkbox(c) => c,
            Element::Button(b) => b,
            Element::Container(c) => c,
            Element::Unbounded(c) => c,
        }
    }

    fn widget_mut(&mut self) -> &mut dyn Widget {
        match self {
            Element::Checkbox(c) => c,
            Element::Button(b) => b,
            Element::Container(c) => c,
            Element::Unbounded(c) => c,
        }
    }
}

impl From<Checkbox> for Element {
    fn from(checkbox: Checkbox) -> Self {
        Element::Checkbox(checkbox)
    }
}

impl From<Button> for Element {
    fn from(button: Button) -> Self {
        Element::Button(button)
    }
}

impl From<Container> for Element {
    fn from(container: Container) -> Self {
        Element::Container(container)
    }
}

impl From<UnboundedContainer> for Element {
    fn from(container: UnboundedContainer) -> Self {
        Element::Unbounded(container)
    }
}

impl Widget for Element {
    fn update(&mut self, frame: &FrameContext) {
        self.widget_mut().update(frame);
    }

    fn collide(&self, point: Point) -> bool {
        self.widget().collide(point)
    }

    fn handle_event(
        &mut self,
        event: InputEvent,
        pointer: Point,
        frame: &FrameContext,
    ) -> TouchResult {
        self.widget_mut().handle_event(event, pointer, frame)
    }

    fn draw(&mut self, target: &mut Surface, frame: &FrameContext) {
        self.widget_mut().draw(target, frame);
    }

    fn position(&self) -> Point {
        self.widget().position()
    }

    fn set_position(&mut self, position: Point) {
        self.widget_mut().set_position(position);
    }

    fn size(&self) -> Option<Size> {
        self.widget().size()
    }

    fn is_visible(&self) -> bool {
        self.widget().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.widget_mut().set_visible(visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::{ButtonConfig, CheckboxConfig};
    use crate::ui::layouts::ContainerConfig;

    #[test]
    fn test_element_delegates_to_widget() {
        let mut element = Element::from(Checkbox::new(Point::new(3, 4), CheckboxConfig::default()));
        assert_eq!(element.position(), Point::new(3, 4));
        assert_eq!(element.size(), Some(Size::new(50, 50)));

        element.set_position(Point::new(7, 8));
        element.set_visible(false);
        assert!(!element.is_visible());
        assert_eq!(
            element.as_checkbox().map(|c| c.position()),
            Some(Point::new(7, 8))
        );
    }

    #[test]
    fn test_accessors_match_variant() {
        let button = Element::from(Button::new(Point::zero(), "x", ButtonConfig::default()).unwrap());
        assert!(button.as_button().is_some());
        assert!(button.as_checkbox().is_none());
        assert!(button.as_container().is_none());

        let container = Element::from(Container::new(Point::zero(), ContainerConfig::default()));
        assert!(container.as_container().is_some());
        assert!(Element::from(UnboundedContainer::default()).size().is_none());
    }

    #[test]
    fn test_autosize_ignores_leaves() {
        let mut element = Element::from(Checkbox::new(Point::zero(), CheckboxConfig::default()));
        element.autosize(5, true);
        assert_eq!(element.size(), Some(Size::new(50, 50)));
    }
}
