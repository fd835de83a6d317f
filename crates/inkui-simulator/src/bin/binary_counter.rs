//! Eight-bit binary counter.
//!
//! A row of icon-fill checkboxes shows the bits of a shared counter, most
//! significant bit on the left. "+1" increments the counter (wrapping),
//! "Reset" zeroes it, and toggling a checkbox flips the matching bit.

use std::cell::Cell;
use std::rc::Rc;

use embedded_graphics::prelude::*;
use log::info;

use inkui::surface::Surface;
use inkui::ui::{
    Button, ButtonConfig, Checkbox, CheckboxConfig, FillMode, FrameContext, InputEvent,
    TouchResult, UiResult, UnboundedContainer, Widget,
};
use inkui_simulator::{WindowConfig, run};

const BITS: usize = 8;
const BIT_SIZE: u32 = 40;
const SPACING: u32 = 5;
const MARGIN: u32 = 10;

const BUTTON_SIZE: Size = Size::new(80, 40);

const WINDOW_SIZE: Size = Size::new(
    2 * MARGIN + BITS as u32 * (BIT_SIZE + SPACING) - SPACING,
    3 * MARGIN + BIT_SIZE + 40,
);
const WINDOW_SCALE: u32 = 2;
const FPS: f32 = 60.0;

/// Root widget keeping the bit checkboxes in step with the counter.
///
/// Children `0..BITS` are the bit checkboxes (MSB first), followed by the
/// two buttons.
struct Counter {
    root: UnboundedContainer,
    value: Rc<Cell<u8>>,
}

impl Counter {
    fn new() -> UiResult<Self> {
        let value = Rc::new(Cell::new(0u8));
        let mut root = UnboundedContainer::default();

        for index in 0..BITS {
            let mask = 1u8 << (BITS - 1 - index);
            let shared = value.clone();
            let position = Point::new(
                (MARGIN + index as u32 * (BIT_SIZE + SPACING)) as i32,
                MARGIN as i32,
            );

            root.push(
                Checkbox::new(
                    position,
                    CheckboxConfig {
                        size: Size::new(BIT_SIZE, BIT_SIZE),
                        fill_mode: FillMode::Icon,
                        ..Default::default()
                    },
                )
                .on_change(move |checkbox, _| {
                    let bits = if checkbox.is_checked() {
                        shared.get() | mask
                    } else {
                        shared.get() & !mask
                    };
                    shared.set(bits);
                }),
            );
        }

        let buttons_y = (2 * MARGIN + BIT_SIZE) as i32;

        let shared = value.clone();
        root.push(
            Button::new(
                Point::new(MARGIN as i32, buttons_y),
                "+1",
                ButtonConfig {
                    size: BUTTON_SIZE,
                    ..Default::default()
                },
            )?
            .on_click(move |_, _| {
                shared.set(shared.get().wrapping_add(1));
                info!("Counter: {}", shared.get());
            }),
        );

        let shared = value.clone();
        root.push(
            Button::new(
                Point::new((2 * MARGIN + BUTTON_SIZE.width) as i32, buttons_y),
                "Reset",
                ButtonConfig {
                    size: BUTTON_SIZE,
                    ..Default::default()
                },
            )?
            .on_click(move |_, _| {
                shared.set(0);
                info!("Counter reset");
            }),
        );

        Ok(Self { root, value })
    }

    /// Push the counter value into the bit checkboxes.
    fn sync(&mut self) {
        let value = self.value.get();
        for index in 0..BITS {
            let checked = value & (1 << (BITS - 1 - index)) != 0;
            if let Some(bit) = self.root.child_mut(index).and_then(|c| c.as_checkbox_mut()) {
                bit.set_checked(checked);
            }
        }
    }
}

impl Widget for Counter {
    fn update(&mut self, frame: &FrameContext) {
        self.sync();
        self.root.update(frame);
    }

    fn collide(&self, point: Point) -> bool {
        self.root.collide(point)
    }

    fn handle_event(
        &mut self,
        event: InputEvent,
        pointer: Point,
        frame: &FrameContext,
    ) -> TouchResult {
        self.root.handle_event(event, pointer, frame)
    }

    fn draw(&mut self, target: &mut Surface, frame: &FrameContext) {
        self.root.draw(target, frame);
    }

    fn position(&self) -> Point {
        self.root.position()
    }

    fn set_position(&mut self, position: Point) {
        self.root.set_position(position);
    }

    fn size(&self) -> Option<Size> {
        self.root.size()
    }

    fn is_visible(&self) -> bool {
        self.root.is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.root.set_visible(visible);
    }
}

fn main() -> UiResult<()> {
    env_logger::init();
    info!("Starting binary counter");

    let mut counter = Counter::new()?;
    run(
        &WindowConfig {
            title: "Binary counter",
            size: WINDOW_SIZE,
            scale: WINDOW_SCALE,
            fps: FPS,
            ..Default::default()
        },
        &mut counter,
    );

    Ok(())
}
