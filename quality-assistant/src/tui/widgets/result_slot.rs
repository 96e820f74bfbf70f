// Result slot widget: one category's answer with its "ask more" control.
//
// Title: category label. Body: result text with word wrap, or "-" when the
// slot is empty. The elaborate hint is only drawn when the slot holds text.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::focused_border_style;
use crate::panel::Category;
use crate::tui::ViewState;

/// Shown in place of an absent result.
pub const EMPTY_PLACEHOLDER: &str = "-";

/// Text of the elaborate control.
pub const ELABORATE_HINT: &str = "[Ctrl+O 深入询问 +]";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, category: Category) {
    let panel = &state.snapshot.panel;
    let selected = state.selected == category;

    let mut lines = match panel.result_text(category) {
        Some(text) => text.lines().map(|l| Line::from(l.to_string())).collect(),
        None => vec![Line::from(Span::styled(
            EMPTY_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))],
    };

    if panel.can_elaborate(category) {
        let hint_style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(ELABORATE_HINT, hint_style)));
    }

    let marker = if selected { "▶ " } else { "" };
    let title = Line::from(vec![Span::styled(
        format!(" {}{} ", marker, category.label()),
        Style::default().add_modifier(Modifier::BOLD),
    )]);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focused_border_style(selected, Style::default())),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
