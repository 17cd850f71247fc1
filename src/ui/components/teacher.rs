//! Teacher dashboard renderer: stat cards, the managed book table, and the
//! add-book form.

use crate::ui::components::render_field;
use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TeacherViewModel;

pub fn render_teacher(
    row: usize,
    teacher: &TeacherViewModel,
    theme: &Theme,
    cols: usize,
    body_rows: usize,
) -> usize {
    let mut current_row = row;
    let last_row = row + body_rows;

    position_cursor(current_row, 2);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    let stats = &teacher.stats;
    let line = format!(
        "Books: {}   Students: {}   Chats: {}   Avg rating: {:.1}",
        stats.total_books, stats.total_students, stats.total_chats, stats.avg_rating
    );
    print!("{}", truncate(&line, cols.saturating_sub(4)));
    print!("{}", Theme::reset());
    current_row += 2;

    if let Some(fields) = &teacher.draft {
        position_cursor(current_row, 2);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print!("Add a book");
        print!("{}", Theme::reset());
        current_row += 1;

        for field in fields {
            current_row = render_field(current_row, field, theme, cols);
        }

        position_cursor(current_row + 1, 3);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("enter: create | c: cycle category | n: cancel");
        print!("{}", Theme::reset());
        return current_row + 2;
    }

    if teacher.loading {
        position_cursor(current_row, 2);
        print!("{}", Theme::dim());
        print!("Loading your books...");
        print!("{}", Theme::reset());
        return current_row + 1;
    }

    for book in &teacher.books {
        if current_row + 1 >= last_row {
            break;
        }
        position_cursor(current_row, 2);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", truncate(&book.title, cols.saturating_sub(14)));
        print!("{}", Theme::reset());
        if book.is_draft {
            print!("{}", Theme::fg(&theme.colors.error_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.success_fg));
        }
        print!("  [{}]", book.status_label);
        print!("{}", Theme::reset());

        position_cursor(current_row + 1, 4);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let line = format!("{} | {}", book.author, book.meta);
        print!("{}", truncate(&line, cols.saturating_sub(6)));
        print!("{}", Theme::reset());

        current_row += 3;
    }

    current_row
}
