// Question input widget: single-line text box with placeholder and cursor.

use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub const PLACEHOLDER: &str = "输入要查询的问题";

/// Render the question box. Places the terminal cursor at the end of the
/// text when the box has keyboard focus.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let question = &state.snapshot.panel.question;
    let focused = !state.chat_open() && !state.confirm_quit;

    let line = if question.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(question.as_str())
    };

    let inner_width = area.width.saturating_sub(2);
    let text_width = Line::from(question.as_str()).width() as u16;
    // Keep the end of long questions visible.
    let scroll_x = text_width.saturating_sub(inner_width.saturating_sub(1));

    let border_style = if state.snapshot.panel.loading {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 问题 ")
                .border_style(border_style),
        )
        .scroll((0, scroll_x));
    frame.render_widget(paragraph, area);

    if focused && area.width > 2 && area.height > 2 {
        let cursor_x = area.x + 1 + (text_width - scroll_x).min(inner_width.saturating_sub(1));
        frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(state: &ViewState, width: u16) -> ratatui::Terminal<ratatui::backend::TestBackend> {
        let backend = ratatui::backend::TestBackend::new(width, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        terminal
    }

    #[test]
    fn empty_question_renders_placeholder() {
        let terminal = draw(&ViewState::default(), 40);
        let text = super::super::buffer_text(terminal.backend().buffer());
        // Wide characters occupy two cells; match the first one only.
        assert!(text.contains('输'));
    }

    #[test]
    fn typed_question_replaces_placeholder() {
        let mut state = ViewState::default();
        state.snapshot.panel.question = "perf tips".into();
        let terminal = draw(&state, 40);
        let text = super::super::buffer_text(terminal.backend().buffer());
        assert!(text.contains("perf tips"));
        assert!(!text.contains('输'));
    }

    #[test]
    fn long_question_does_not_panic() {
        let mut state = ViewState::default();
        state.snapshot.panel.question = "如何".repeat(100);
        draw(&state, 20);
    }

    #[test]
    fn narrow_area_does_not_panic() {
        let mut state = ViewState::default();
        state.snapshot.panel.question = "abc".into();
        draw(&state, 2);
    }
}
