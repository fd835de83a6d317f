// src/ui/layouts/mod.rs
//! Containers for grouping UI elements

pub mod container;

pub use container::{
    Container, ContainerConfig, DEFAULT_AUTOSIZE_MARGIN, UnboundedContainer,
    UnboundedContainerConfig,
};
