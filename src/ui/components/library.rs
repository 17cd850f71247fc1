//! Library screen renderer: search bar, category filter, and the book list.

use crate::ui::helpers::{position_cursor, render_highlighted_text, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LibraryViewModel;

/// Renders the library screen starting at `row`, using at most `body_rows`
/// rows.
///
/// Each book occupies two rows (title line, metadata line) plus a spacer.
/// Rows beyond the window are simply not drawn; the cursor wrap-around in
/// the state layer keeps the selection reachable.
pub fn render_library(
    row: usize,
    library: &LibraryViewModel,
    theme: &Theme,
    cols: usize,
    body_rows: usize,
) -> usize {
    let mut current_row = row;

    position_cursor(current_row, 2);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("Search: ");
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("{}", truncate(&library.query, cols.saturating_sub(30)));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("   Category: {}", library.category_label);
    print!("{}", Theme::reset());
    current_row += 2;

    if library.loading {
        position_cursor(current_row, 2);
        print!("{}", Theme::dim());
        print!("Loading books...");
        print!("{}", Theme::reset());
        return current_row + 1;
    }

    if library.items.is_empty() {
        position_cursor(current_row, 2);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("No books match.");
        print!("{}", Theme::reset());
        return current_row + 1;
    }

    let last_row = row + body_rows;
    for item in &library.items {
        if current_row + 2 > last_row {
            break;
        }

        position_cursor(current_row, 2);
        if item.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
            print!("> ");
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
            print!("  ");
        }
        print!("{}", Theme::bold());
        render_highlighted_text(
            &truncate(&item.title, cols.saturating_sub(6)),
            &item.highlight,
            theme,
            item.is_selected,
        );
        print!("{}", Theme::reset());

        position_cursor(current_row + 1, 4);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let line = format!("{} | {}", item.author, item.meta);
        print!("{}", truncate(&line, cols.saturating_sub(6)));
        print!("{}", Theme::reset());

        current_row += 3;
    }

    current_row
}
