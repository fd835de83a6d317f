//! Color system for widgets
//!
//! Only colors live here: every widget takes its colors from its own config
//! struct rather than from a shared theme.

pub mod colors;

pub use colors::{BLACK, INK_GREY, Rgba, TRANSPARENT, WHITE, mix};
