//! Grid of checkboxes in both fill modes inside an autosized container.
//!
//! The left columns use the background fill, the right columns the masked
//! icon fill. Every change is logged with its click position.

use embedded_graphics::prelude::*;
use log::info;

use inkui::ui::{
    Checkbox, CheckboxConfig, Container, ContainerConfig, DEFAULT_AUTOSIZE_MARGIN, FillMode, Rgba,
    UnboundedContainer,
};
use inkui_simulator::{WindowConfig, run};

const WINDOW_SIZE: Size = Size::new(400, 300);
const FPS: f32 = 60.0;

const COLUMNS: u32 = 6;
const ROWS: u32 = 4;
const CELL: u32 = 40;
const GAP: u32 = 10;

/// Accent colors, one per row.
const ROW_COLORS: [Rgba; ROWS as usize] = [
    Rgba::rgb(0, 0, 0),
    Rgba::rgb(33, 150, 243),
    Rgba::rgb(76, 175, 80),
    Rgba::rgb(233, 30, 99),
];

fn cell(column: u32, row: u32) -> Checkbox {
    let fill_mode = if column < COLUMNS / 2 {
        FillMode::Background
    } else {
        FillMode::Icon
    };

    let position = Point::new(
        (GAP + column * (CELL + GAP)) as i32,
        (GAP + row * (CELL + GAP)) as i32,
    );

    Checkbox::new(
        position,
        CheckboxConfig {
            size: Size::new(CELL, CELL),
            fill_color: ROW_COLORS[row as usize],
            outline_color: ROW_COLORS[row as usize],
            fill_mode,
            checked: (column + row) % 3 == 0,
            ..Default::default()
        },
    )
    .on_change(move |checkbox, click| {
        info!(
            "Checkbox ({column}, {row}) -> {} (click {:?})",
            checkbox.is_checked(),
            click
        );
    })
}

fn main() {
    env_logger::init();
    info!("Starting checkbox grid");

    let mut grid = Container::new(
        Point::new(20, 20),
        ContainerConfig {
            background: Rgba::rgb(245, 245, 245),
            ..Default::default()
        },
    );
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            grid.push(cell(column, row));
        }
    }
    grid.autosize(DEFAULT_AUTOSIZE_MARGIN + GAP, false);

    let mut root = UnboundedContainer::default();
    root.push(grid);

    run(
        &WindowConfig {
            title: "Checkbox grid",
            size: WINDOW_SIZE,
            fps: FPS,
            ..Default::default()
        },
        &mut root,
    );
}
