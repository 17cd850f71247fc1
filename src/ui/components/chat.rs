//! Assistant chat screen renderer.

use crate::ui::helpers::{position_cursor, truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChatViewModel;

/// Renders the chat screen: context line, the tail of the transcript that
/// fits, the typing indicator, quick actions, and the composer.
pub fn render_chat(
    row: usize,
    chat: &ChatViewModel,
    theme: &Theme,
    cols: usize,
    body_rows: usize,
) -> usize {
    let text_width = cols.saturating_sub(6).max(20);
    let last_row = row + body_rows;

    // Bottom chrome: composer, quick actions, optional typing indicator.
    let composer_row = last_row.saturating_sub(1);
    let actions_row = composer_row.saturating_sub(1);
    let typing_row = actions_row.saturating_sub(1);

    let mut current_row = row;
    if let Some(context) = &chat.context_line {
        position_cursor(current_row, 2);
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("{}", truncate(context, cols.saturating_sub(4)));
        print!("{}", Theme::reset());
        current_row += 2;
    }

    // Pre-wrap messages, then keep only the tail that fits above the chrome.
    let transcript_rows = typing_row.saturating_sub(current_row + 1);
    let mut lines: Vec<(bool, String)> = Vec::new();
    for message in &chat.messages {
        lines.push((
            message.is_user,
            format!("{} [{}]", message.sender_label, message.time_label),
        ));
        for line in wrap_text(&message.text, text_width).lines() {
            lines.push((message.is_user, format!("  {line}")));
        }
        lines.push((message.is_user, String::new()));
    }
    let skip = lines.len().saturating_sub(transcript_rows);

    for (is_user, line) in lines.into_iter().skip(skip) {
        position_cursor(current_row, 2);
        if is_user {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{}", Theme::fg(&theme.colors.assistant_fg));
        }
        print!("{}", truncate(&line, cols.saturating_sub(4)));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    if chat.is_typing {
        position_cursor(typing_row, 2);
        print!("{}", Theme::dim());
        print!("Assistant is typing...");
        print!("{}", Theme::reset());
    }

    if !chat.quick_actions.is_empty() {
        position_cursor(actions_row, 2);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let joined = chat.quick_actions.join("  |  ");
        print!("{}", truncate(&joined, cols.saturating_sub(4)));
        print!("{}", Theme::reset());
    }

    position_cursor(composer_row, 2);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("> ");
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("{}", truncate(&chat.input, cols.saturating_sub(6)));
    print!("{}", Theme::reset());

    last_row
}
