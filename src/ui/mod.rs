// src/ui/mod.rs
//! inkui widget system - a small retained-mode toolkit over embedded-graphics
//!
//! This module provides:
//! - The [`Widget`] contract every element implements
//! - Interactive components (animated [`Checkbox`], ink-ripple [`Button`])
//! - Compositing containers ([`Container`], [`UnboundedContainer`])
//! - RGBA colors and channel mixing
//!
//! # Frame protocol
//!
//! A driver runs the same steps every frame:
//!
//! 1. Dispatch every pending [`InputEvent`] into the root widget
//! 2. Call [`Widget::update`] once on the root
//! 3. Clear the target [`Surface`](crate::surface::Surface)
//! 4. Call [`Widget::draw`] once on the root
//! 5. Present the surface and wait for the next tick
//!
//! Time and frame rate reach widgets through [`FrameContext`], never through
//! globals.

pub mod components;
pub mod core;
pub mod elements;
pub mod error;
pub mod layouts;
pub mod styling;

// Re-export commonly used items
pub use components::{
    Button, ButtonConfig, ChangeCallback, Checkbox, CheckboxConfig, ClickCallback, FillMode,
    MAX_LABEL_LEN, Ripple,
};
pub use self::core::{DEFAULT_FPS, FrameContext, InputEvent, TouchResult, Widget};
pub use elements::Element;
pub use error::{UiError, UiResult};
pub use layouts::{
    Container, ContainerConfig, DEFAULT_AUTOSIZE_MARGIN, UnboundedContainer,
    UnboundedContainerConfig,
};
pub use styling::{BLACK, INK_GREY, Rgba, TRANSPARENT, WHITE, mix};
