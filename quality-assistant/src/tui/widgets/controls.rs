// Controls row: the submit button followed by example-question shortcuts.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::panel::PanelState;
use crate::tui::ViewState;

/// Label on the submit button.
pub fn submit_label(panel: &PanelState) -> &'static str {
    if panel.loading {
        "查询中..."
    } else {
        "查询 ⏎"
    }
}

fn submit_style(panel: &PanelState) -> Style {
    if panel.can_submit() {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Gray)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }
}

/// Shortcut label for the example at `index`: "Alt+1 示例 1".
pub fn example_label(index: usize) -> String {
    format!("Alt+{n} 示例 {n}", n = index + 1)
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let panel = &state.snapshot.panel;

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(format!(" {} ", submit_label(panel)), submit_style(panel)),
        Span::raw("   "),
    ];

    for index in 0..state.snapshot.examples.len() {
        spans.push(Span::styled(
            format!("[{}]", example_label(index)),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_label_tracks_loading() {
        let mut panel = PanelState::default();
        assert_eq!(submit_label(&panel), "查询 ⏎");
        panel.loading = true;
        assert_eq!(submit_label(&panel), "查询中...");
    }

    #[test]
    fn submit_style_dims_when_disabled() {
        let mut panel = PanelState::default();
        assert!(submit_style(&panel).add_modifier.contains(Modifier::DIM));
        panel.question = "q".into();
        assert!(!submit_style(&panel).add_modifier.contains(Modifier::DIM));
        panel.loading = true;
        assert!(submit_style(&panel).add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn example_labels_are_one_based() {
        assert_eq!(example_label(0), "Alt+1 示例 1");
        assert_eq!(example_label(2), "Alt+3 示例 3");
    }

    #[test]
    fn render_lists_every_example() {
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.snapshot.examples = vec!["a".into(), "b".into(), "c".into()];
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = super::super::buffer_text(terminal.backend().buffer());
        assert!(text.contains("[Alt+1"));
        assert!(text.contains("[Alt+2"));
        assert!(text.contains("[Alt+3"));
        assert!(!text.contains("[Alt+4"));
    }
}
