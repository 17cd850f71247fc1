//! Profile and overview screen renderers.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ProfileViewModel;

/// Renders the profile card.
pub fn render_profile(row: usize, profile: &ProfileViewModel, theme: &Theme, _cols: usize) -> usize {
    let mut current_row = row + 1;

    position_cursor(current_row, 3);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("Profile");
    print!("{}", Theme::reset());
    current_row += 2;

    for (label, value) in [
        ("Name", profile.name.as_str()),
        ("Email", profile.email.as_str()),
        ("Role", profile.role_label.as_str()),
    ] {
        position_cursor(current_row, 3);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{label:<8}");
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{value}");
        print!("{}", Theme::reset());
        current_row += 1;
    }

    current_row
}

/// Renders the plain overview screen.
pub fn render_dashboard(row: usize, welcome: &str, theme: &Theme, _cols: usize) -> usize {
    position_cursor(row + 1, 3);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{welcome}");
    print!("{}", Theme::reset());
    row + 2
}
