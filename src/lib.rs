//! inkui: a retained-mode widget toolkit rendering through embedded-graphics.
//!
//! Widgets draw into an RGBA [`Surface`](surface::Surface) that drivers flush
//! to any `DrawTarget<Color = Rgb888>`. See [`ui`] for the frame protocol.

pub mod icon;
pub mod surface;
pub mod time;
pub mod ui;
