//! Login and register screen renderer.

use crate::ui::components::render_field;
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{AuthKind, AuthViewModel};

/// Renders the auth form: heading, failure banner, fields, role toggle, and
/// the submit hint.
pub fn render_auth(row: usize, auth: &AuthViewModel, theme: &Theme, _cols: usize) -> usize {
    let mut current_row = row + 1;

    position_cursor(current_row, 3);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    match auth.kind {
        AuthKind::Login => print!("Sign in to LearnBooks"),
        AuthKind::Register => print!("Create your account"),
    }
    print!("{}", Theme::reset());
    current_row += 2;

    if let Some(banner) = &auth.banner {
        position_cursor(current_row, 3);
        print!("{}", Theme::fg(&theme.colors.error_fg));
        print!("{banner}");
        print!("{}", Theme::reset());
        current_row += 2;
    }

    for field in &auth.fields {
        current_row = render_field(current_row, field, theme, _cols);
    }
    current_row += 1;

    position_cursor(current_row, 3);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("  Role: ");
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("{}", auth.role_label);
    print!("{}", Theme::reset());
    current_row += 2;

    position_cursor(current_row, 3);
    if auth.busy {
        print!("{}", Theme::dim());
        match auth.kind {
            AuthKind::Login => print!("Signing in..."),
            AuthKind::Register => print!("Creating account..."),
        }
        print!("{}", Theme::reset());
    } else {
        print!("{}", Theme::fg(&theme.colors.text_dim));
        match auth.kind {
            AuthKind::Login => print!("No account yet? Press r to register."),
            AuthKind::Register => print!("Already registered? Press l to sign in."),
        }
        print!("{}", Theme::reset());
    }
    current_row + 1
}
