// Chat popup overlay: follow-up conversation for one result category.
//
// Drawn over the panel while a chat session is open. Top: transcript,
// pinned to the newest message unless scrolled back. Bottom: the follow-up
// input with the terminal cursor.

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect_percent;
use crate::chat::{ChatRole, ChatSession};
use crate::tui::ViewState;

const WIDTH_PCT: u16 = 80;
const HEIGHT_PCT: u16 = 75;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(chat) = &state.snapshot.chat else {
        return;
    };

    let popup = centered_rect_percent(WIDTH_PCT, HEIGHT_PCT, area);
    frame.render_widget(Clear, popup);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(Span::styled(
            format!(" 深入询问 · {} ", chat.category.label()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = outer.inner(popup);
    frame.render_widget(outer, popup);

    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

    render_transcript(frame, transcript_area, chat, state.chat_scroll_back);
    render_input(frame, input_area, chat, state.confirm_quit);
}

/// Build the transcript as display lines.
pub fn transcript_lines(chat: &ChatSession) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in &chat.messages {
        let (who, color) = match message.role {
            ChatRole::Assistant => ("助手", Color::Green),
            ChatRole::User => ("我", Color::Cyan),
        };
        lines.push(Line::from(vec![
            Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" {}", message.sent_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for text_line in message.text.lines() {
            lines.push(Line::from(format!("  {text_line}")));
        }
        lines.push(Line::default());
    }
    if chat.pending {
        lines.push(Line::from(Span::styled(
            "助手正在回复...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines
}

/// Top row to show so the newest content is visible, minus `scroll_back`.
///
/// `total_rows` counts rows after wrapping, not logical lines.
pub fn transcript_scroll(total_rows: usize, visible: usize, scroll_back: usize) -> u16 {
    let max_scroll = total_rows.saturating_sub(visible);
    max_scroll.saturating_sub(scroll_back).min(u16::MAX as usize) as u16
}

/// The wrapped transcript paragraph and the scroll offset that pins it to
/// the bottom of `area`.
fn transcript_paragraph(
    chat: &ChatSession,
    area: Rect,
    scroll_back: usize,
) -> (Paragraph<'static>, u16) {
    let paragraph = Paragraph::new(transcript_lines(chat)).wrap(Wrap { trim: false });
    let rows = paragraph.line_count(area.width);
    let scroll = transcript_scroll(rows, area.height as usize, scroll_back);
    (paragraph.scroll((scroll, 0)), scroll)
}

fn render_transcript(frame: &mut Frame, area: Rect, chat: &ChatSession, scroll_back: usize) {
    let (paragraph, _) = transcript_paragraph(chat, area, scroll_back);
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, area: Rect, chat: &ChatSession, confirm_quit: bool) {
    let border_color = if chat.pending {
        Color::Yellow
    } else {
        Color::Blue
    };
    let paragraph = Paragraph::new(chat.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 追问 (Enter 发送) ")
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(paragraph, area);

    if !confirm_quit && area.width > 2 && area.height > 2 {
        let text_width = Line::from(chat.input.as_str()).width() as u16;
        let cursor_x = area.x + 1 + text_width.min(area.width - 3);
        frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::{Category, TextEdit};

    fn open_state(seed: &str) -> ViewState {
        let mut state = ViewState::default();
        state.snapshot.chat = Some(ChatSession::open(Category::Industry, seed));
        state
    }

    fn draw(state: &ViewState, width: u16, height: u16) -> String {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        super::super::buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn transcript_starts_with_initial_message() {
        let chat = ChatSession::open(Category::Enterprise, "seed text");
        let lines = transcript_lines(&chat);
        // header, body, spacer
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string(), "  seed text");
    }

    #[test]
    fn pending_reply_adds_indicator() {
        let mut chat = ChatSession::open(Category::Enterprise, "seed");
        chat.apply_edit(TextEdit::Insert('q'));
        chat.begin_follow_up(1).unwrap();
        let lines = transcript_lines(&chat);
        assert_eq!(lines.last().unwrap().to_string(), "助手正在回复...");
    }

    #[test]
    fn multiline_messages_keep_line_breaks() {
        let chat = ChatSession::open(Category::Enterprise, "one\ntwo");
        let lines = transcript_lines(&chat);
        assert_eq!(lines[1].to_string(), "  one");
        assert_eq!(lines[2].to_string(), "  two");
    }

    #[test]
    fn scroll_pins_to_bottom() {
        assert_eq!(transcript_scroll(50, 10, 0), 40);
        assert_eq!(transcript_scroll(50, 10, 5), 35);
        assert_eq!(transcript_scroll(50, 10, 100), 0);
        assert_eq!(transcript_scroll(5, 10, 0), 0);
    }

    #[test]
    fn wrapped_message_still_scrolls_to_newest_row() {
        // One logical line that wraps to several rows in a narrow area
        let long = "长".repeat(60);
        let mut chat = ChatSession::open(Category::Enterprise, long);
        chat.apply_edit(TextEdit::Insert('q'));
        chat.begin_follow_up(1).unwrap();
        let area = Rect::new(0, 0, 20, 4);

        let logical = transcript_lines(&chat).len();
        let (_, scroll) = transcript_paragraph(&chat, area, 0);
        assert!(scroll as usize > logical.saturating_sub(4));

        let backend = ratatui::backend::TestBackend::new(20, 4);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_transcript(frame, frame.area(), &chat, 0))
            .unwrap();
        let text = super::super::buffer_text(terminal.backend().buffer());
        assert!(text.contains("助手正在回复..."));
    }

    #[test]
    fn render_shows_seed_and_input() {
        let mut state = open_state("seed text");
        if let Some(chat) = state.snapshot.chat.as_mut() {
            chat.input = "follow up".into();
        }
        let text = draw(&state, 100, 30);
        assert!(text.contains("seed text"));
        assert!(text.contains("follow up"));
    }

    #[test]
    fn render_without_chat_draws_nothing() {
        let text = draw(&ViewState::default(), 40, 10);
        assert!(text.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn render_small_terminal_does_not_panic() {
        draw(&open_state("x"), 6, 4);
    }
}
