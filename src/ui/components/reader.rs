//! Reader screen renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ReaderViewModel;

/// Renders the reader: book and page titles, the page body (already wrapped
/// for the zoom level), and the page/zoom indicators.
pub fn render_reader(
    row: usize,
    reader: &ReaderViewModel,
    theme: &Theme,
    cols: usize,
    body_rows: usize,
) -> usize {
    let mut current_row = row;
    let last_row = row + body_rows;

    position_cursor(current_row, 2);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", truncate(&reader.book_title, cols.saturating_sub(24)));
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    let indicator = format!("{}  {}", reader.page_indicator, reader.zoom_label);
    position_cursor(current_row, cols.saturating_sub(indicator.chars().count() + 1));
    print!("{indicator}");
    print!("{}", Theme::reset());
    current_row += 2;

    if reader.loading {
        position_cursor(current_row, 4);
        print!("{}", Theme::dim());
        print!("Loading page...");
        print!("{}", Theme::reset());
        return current_row + 1;
    }

    if !reader.page_title.is_empty() {
        position_cursor(current_row, 4);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("{}", truncate(&reader.page_title, cols.saturating_sub(6)));
        print!("{}", Theme::reset());
        current_row += 2;
    }

    for line in reader.body.lines() {
        if current_row >= last_row.saturating_sub(2) {
            break;
        }
        position_cursor(current_row, 4);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate(line, cols.saturating_sub(6)));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if reader.finished {
        position_cursor(last_row.saturating_sub(1), 4);
        print!("{}", Theme::fg(&theme.colors.success_fg));
        print!("You finished this book! Press a to read it again.");
        print!("{}", Theme::reset());
    }

    last_row
}
