//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view
//! model computation and delegation to the screen components. The flow is:
//!
//! ```text
//! AppState → compute_viewmodel → FrameViewModel → components → ANSI output
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::{compute_viewmodel, FrameViewModel, ScreenViewModel};
use crate::ui::theme::Theme;

/// Renders the application UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// component for the active screen. Prints ANSI-styled output using `print!`;
/// the caller is responsible for clearing the screen and flushing.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = compute_viewmodel(state, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a pre-computed frame.
///
/// Layout: header row, nav row (when signed in), a border, the screen body,
/// then a border, optional status line, and the footer pinned to the bottom.
fn render_viewmodel(vm: &FrameViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = components::render_header(1, &vm.header, theme, cols);
    if !vm.nav.is_empty() {
        current_row = components::render_nav(current_row, &vm.nav, theme, cols);
    }
    current_row = components::render_border(current_row, &theme.colors.border, cols);

    // Reserve the bottom rows for the status line and footer.
    let footer_row = rows.saturating_sub(1);
    let status_row = footer_row.saturating_sub(1);
    let body_rows = status_row.saturating_sub(current_row + 1);

    match &vm.screen {
        ScreenViewModel::Auth(auth) => {
            components::render_auth(current_row, auth, theme, cols);
        }
        ScreenViewModel::Dashboard { welcome } => {
            components::render_dashboard(current_row, welcome, theme, cols);
        }
        ScreenViewModel::Library(library) => {
            components::render_library(current_row, library, theme, cols, body_rows);
        }
        ScreenViewModel::Chat(chat) => {
            components::render_chat(current_row, chat, theme, cols, body_rows);
        }
        ScreenViewModel::Reader(reader) => {
            components::render_reader(current_row, reader, theme, cols, body_rows);
        }
        ScreenViewModel::Teacher(teacher) => {
            components::render_teacher(current_row, teacher, theme, cols, body_rows);
        }
        ScreenViewModel::Profile(profile) => {
            components::render_profile(current_row, profile, theme, cols);
        }
    }

    components::render_border(status_row.saturating_sub(1), &theme.colors.border, cols);
    if let Some(status) = &vm.status {
        components::render_status(status_row, status, theme, cols);
    }
    components::render_footer(footer_row, &vm.footer, theme, cols);
}
