//! Langton's Ant window: an empty root container at 500x500, 60 FPS.
//!
//! The widget tree is empty; the window only exercises the frame loop.

use embedded_graphics::prelude::*;
use log::info;

use inkui::ui::UnboundedContainer;
use inkui_simulator::{WindowConfig, run};

const WINDOW_SIZE: Size = Size::new(500, 500);
const FPS: f32 = 60.0;

fn main() {
    env_logger::init();
    info!("Starting Langton's Ant");

    let mut root = UnboundedContainer::default();
    run(
        &WindowConfig {
            title: "Langton's Ant",
            size: WINDOW_SIZE,
            fps: FPS,
            ..Default::default()
        },
        &mut root,
    );
}
