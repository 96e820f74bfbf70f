// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): title, submission status      |
// +--------------------------------------------------+
// | Question Input (3 rows)                           |
// +--------------------------------------------------+
// | Controls (1 row): submit, example shortcuts       |
// +--------------------------------------------------+
// | 企业标准 (1/3)                                     |
// | 行业标准 (1/3)                                     |
// | 国际标准 (1/3)                                     |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub question: Rect,
    pub controls: Rect,
    /// One area per category, in display order.
    pub results: [Rect; 3],
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(3), // question input
            Constraint::Length(1), // controls
            Constraint::Min(9),    // result slots
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let results_area = vertical[3];
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(results_area);

    AppLayout {
        status_bar: vertical[0],
        question: vertical[1],
        controls: vertical[2],
        results: [slots[0], slots[1], slots[2]],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
