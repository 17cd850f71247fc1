//! Composable UI component renderers.
//!
//! One renderer per screen plus the shared chrome (header, nav bar, borders,
//! status line, footer). Each renderer takes a starting row, prints its
//! section with `print!`, and returns the next free row where that matters.

mod auth;
mod chat;
mod library;
mod profile;
mod reader;
mod teacher;

pub use auth::render_auth;
pub use chat::render_chat;
pub use library::render_library;
pub use profile::{render_dashboard, render_profile};
pub use reader::render_reader;
pub use teacher::render_teacher;

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, HeaderInfo, NavItem};

/// Renders a horizontal border line at the specified row.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the title bar: application name on the left, the signed-in user
/// on the right.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    let title = &header.title;
    let user = header.user_line.as_deref().unwrap_or("");
    let gap = cols.saturating_sub(title.chars().count() + user.chars().count() + 2);
    print!(" {title}{}{user} ", " ".repeat(gap));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the navigation bar, marking the active view.
pub fn render_nav(row: usize, items: &[NavItem], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;
    for item in items {
        let cell = format!(" {} ", item.label);
        used += cell.chars().count() + 1;
        if used > cols {
            break;
        }
        if item.is_active {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{cell}");
        print!("{} ", Theme::reset());
    }
    row + 1
}

/// Renders the transient status line above the footer.
pub fn render_status(row: usize, status: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.success_fg));
    print!(" {}", truncate(status, cols.saturating_sub(2)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the footer help bar with centered keybinding hints.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = &footer.keybindings;

    let text_len = help_text.chars().count().min(cols);
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{}", truncate(help_text, cols));
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a labeled form field row, with focus styling and an inline error
/// on the following row when present.
///
/// Shared by the auth screens and the teacher's add-book form. Returns the
/// next free row.
pub(crate) fn render_field(
    row: usize,
    field: &crate::ui::viewmodel::FieldViewModel,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(row, 3);
    if field.is_focused {
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("> ");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  ");
    }
    let line = format!("{:<18} {}", field.label, field.value);
    print!("{}", truncate(&line, cols.saturating_sub(6)));
    print!("{}", Theme::reset());

    let mut next = row + 1;
    if let Some(error) = &field.error {
        position_cursor(next, 5);
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print!("{}", truncate(error, cols.saturating_sub(6)));
        print!("{}", Theme::reset());
        next += 1;
    }
    next
}
