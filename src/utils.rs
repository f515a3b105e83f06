use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

pub fn scroll_by(pos: &mut usize, delta: isize, max: usize) {
    if delta < 0 {
        *pos = pos.saturating_sub(delta.unsigned_abs());
    } else if max > 0 {
        *pos = (*pos + delta as usize).min(max.saturating_sub(1));
    }
}

/// Multi-line editor with the cursor hidden until editing starts
pub fn text_editor(initial: &str, placeholder: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(initial.lines().map(str::to_string).collect());
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_text(placeholder);
    show_cursor(&mut textarea, false);
    textarea
}

pub fn show_cursor(textarea: &mut TextArea<'_>, visible: bool) {
    let style = if visible {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    textarea.set_cursor_style(style);
}

pub fn textarea_text(textarea: &TextArea<'_>) -> String {
    textarea.lines().join("\n")
}
