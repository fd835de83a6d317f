// src/ui/components/mod.rs
//! UI components library

pub mod button;
pub mod checkbox;
pub mod ink;

pub use button::{Button, ButtonConfig, ClickCallback, MAX_LABEL_LEN};
pub use checkbox::{ChangeCallback, Checkbox, CheckboxConfig, FillMode};
pub use ink::Ripple;
