//! Shared rendering utilities.
//!
//! Low-level helpers used across the UI components: cursor positioning,
//! fuzzy match highlighting, width-safe truncation, and paragraph wrapping
//! for the reader and chat transcripts. Everything operates on character
//! indices, not byte indices.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Uses ANSI escape sequence `\u{1b}[{row};{col}H`. Coordinates are
/// 1-indexed.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Renders text with individual characters highlighted for fuzzy matches.
///
/// `indices` are character positions (not bytes) matched by the query.
/// Highlighting is suppressed on selected rows so it does not fight the
/// selection background.
pub fn render_highlighted_text(text: &str, indices: &[usize], theme: &Theme, is_selected: bool) {
    if indices.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (i, c) in text.chars().enumerate() {
        if indices.contains(&i) {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{c}");
            print!("{}", Theme::reset());
        } else {
            print!("{c}");
        }
    }
}

/// Truncates `text` to at most `width` characters, appending an ellipsis
/// when something was cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Wraps text to `width` characters per line, preserving existing line
/// breaks.
///
/// Words longer than the width are placed on their own line rather than
/// split mid-word.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut out = String::new();
    for (i, paragraph) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if line_len > 0 && line_len + 1 + word_len > width {
                out.push('\n');
                line_len = 0;
            } else if line_len > 0 {
                out.push(' ');
                line_len += 1;
            }
            out.push_str(word);
            line_len += word_len;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("a longer string", 8), "a longe…");
    }

    #[test]
    fn wrap_respects_width() {
        let wrapped = wrap_text("one two three four five", 9);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 9, "line too long: {line:?}");
        }
        assert_eq!(wrapped, "one two\nthree\nfour five");
    }

    #[test]
    fn wrap_preserves_paragraph_breaks() {
        let wrapped = wrap_text("first paragraph\n\nsecond", 40);
        assert_eq!(wrapped, "first paragraph\n\nsecond");
    }
}
