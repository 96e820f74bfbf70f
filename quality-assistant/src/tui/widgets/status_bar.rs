// Status bar widget: application title and submission status.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::panel::PanelState;
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [title] | [status indicator] [result count]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let panel = &state.snapshot.panel;
    let (status, status_color) = status_indicator(panel);

    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.snapshot.title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
        Span::styled("● ", Style::default().fg(status_color)),
        Span::styled(status, Style::default().fg(Color::White)),
    ];

    if let Some(results) = &panel.results {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("{}/3 results", results.populated()),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Status text and dot colour for the panel.
pub fn status_indicator(panel: &PanelState) -> (&'static str, Color) {
    if panel.loading {
        ("查询中...", Color::Yellow)
    } else if panel.results.is_some() {
        ("完成", Color::Green)
    } else {
        ("就绪", Color::DarkGray)
    }
}
