use crate::config::{BOARD_ORIGIN, CELL_SIZE};
use crate::state::State;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton},
};

/// Maps a pointer position to grid coordinates by flooring the offset from the
/// board origin divided by the cell size.
///
/// The result is not bounds-checked: positions left of or above the origin
/// give negative coordinates, positions past the board give coordinates
/// beyond the grid.
pub fn pointer_to_cell(
    pointer_x: f64,
    pointer_y: f64,
    board_origin_x: f64,
    board_origin_y: f64,
    cell_size: f64,
) -> (i64, i64) {
    let x = ((pointer_x - board_origin_x) / cell_size).floor() as i64;
    let y = ((pointer_y - board_origin_y) / cell_size).floor() as i64;
    (x, y)
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if button != MouseButton::Left || element_state != ElementState::Pressed {
        return;
    }
    let Some(cursor) = state.cursor_pos else {
        return;
    };

    // winit reports physical pixels; the board is laid out in logical ones.
    let logical = cursor.to_logical::<f64>(state.window.scale_factor());
    let (x, y) = pointer_to_cell(
        logical.x,
        logical.y,
        BOARD_ORIGIN[0],
        BOARD_ORIGIN[1],
        CELL_SIZE as f64,
    );
    log::debug!("Clicked at: {x} {y}");

    if state.controller.toggle(x, y) {
        state.window.request_redraw();
    }
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);
}

pub fn handle_cursor_left(state: &mut State) {
    state.cursor_pos = None;
}
