//! SDL2 driver shared by the inkui demos.
//!
//! Runs the frame protocol against an `embedded-graphics-simulator` window:
//! input events are dispatched into the root widget, the root is updated and
//! drawn into an RGBA surface, and the surface is flushed to the display.
//!
//! Escape or closing the window quits. Mouse buttons map to pointer
//! press/release at the last known pointer position.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, info};

use inkui::surface::Surface;
use inkui::time::FrameClock;
use inkui::ui::{InputEvent, Rgba, WHITE, Widget};

/// Window options for a demo.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: &'static str,
    /// Logical size in pixels.
    pub size: Size,
    /// Pixel scale factor for the SDL window.
    pub scale: u32,
    /// Frame rate cap.
    pub fps: f32,
    /// Fill applied to the frame before the root draws.
    pub background: Rgba,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "inkui",
            size: Size::new(500, 500),
            scale: 1,
            fps: 60.0,
            background: WHITE,
        }
    }
}

/// Translate an SDL event, tracking the pointer position in `pointer`.
///
/// Returns `None` for events widgets never see.
pub fn map_event(event: SimulatorEvent, pointer: &mut Point) -> Option<InputEvent> {
    match event {
        SimulatorEvent::Quit => Some(InputEvent::Quit),
        SimulatorEvent::KeyDown { keycode, .. } if keycode == Keycode::Escape => {
            Some(InputEvent::Quit)
        }
        SimulatorEvent::KeyDown { .. } => Some(InputEvent::KeyPressed),
        SimulatorEvent::MouseButtonDown { point, .. } => {
            *pointer = point;
            Some(InputEvent::PointerPressed)
        }
        SimulatorEvent::MouseButtonUp { point, .. } => {
            *pointer = point;
            Some(InputEvent::PointerReleased)
        }
        SimulatorEvent::MouseMove { point } => {
            *pointer = point;
            Some(InputEvent::PointerMoved)
        }
        _ => None,
    }
}

/// Run `root` in a window until the user quits.
pub fn run<W: Widget>(config: &WindowConfig, root: &mut W) {
    info!(
        "Opening {:?}: {}x{} (scale {}x) at {} FPS",
        config.title, config.size.width, config.size.height, config.scale, config.fps
    );

    let mut display = SimulatorDisplay::<Rgb888>::new(config.size);
    let output_settings = OutputSettingsBuilder::new().scale(config.scale).build();
    let mut window = Window::new(config.title, &output_settings);

    let mut frame_buffer = Surface::filled(config.size, config.background);
    let mut clock = FrameClock::new(config.fps);
    let mut pointer = Point::zero();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(&display);

    'running: loop {
        let frame = clock.context();

        // --- Input ----------------------------------------------------------
        for event in window.events() {
            let Some(input) = map_event(event, &mut pointer) else {
                continue;
            };
            if input == InputEvent::Quit {
                break 'running;
            }

            debug!("{:?} at {:?}", input, pointer);
            root.handle_event(input, pointer, &frame);
        }

        // --- Update and render ----------------------------------------------
        root.update(&frame);

        frame_buffer.fill(config.background);
        root.draw(&mut frame_buffer, &frame);

        let Ok(()) = frame_buffer.flush(&mut display);
        window.update(&display);

        // --- Frame pacing ---------------------------------------------------
        clock.tick();
    }

    info!("Closing {:?}", config.title);
}
