// TUI widget modules for each screen zone, plus shared helpers.

pub mod chat_popup;
pub mod controls;
pub mod question_input;
pub mod quit_confirm;
pub mod result_slot;
pub mod status_bar;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};

/// Border style for a panel, highlighted when it holds the selection.
pub fn focused_border_style(focused: bool, base: Style) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the rectangle is clamped to the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

/// Centered rectangle sized as a percentage of `area`.
pub fn centered_rect_percent(width_pct: u16, height_pct: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * width_pct.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * height_pct.min(100) as u32 / 100) as u16;
    centered_rect(width, height, area)
}

/// Concatenate every cell symbol of a rendered buffer, row by row.
///
/// Cells hidden behind a wide grapheme are skipped, so CJK text reads back
/// without padding.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut x = area.left();
        while x < area.right() {
            let symbol = buffer.cell((x, y)).map_or(" ", |cell| cell.symbol());
            out.push_str(symbol);
            let width = ratatui::text::Span::raw(symbol).width().max(1);
            x = x.saturating_add(width as u16);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let result = centered_rect(28, 5, area);
        assert_eq!(result.width, 28);
        assert_eq!(result.height, 5);
        let result_center_x = result.x + result.width / 2;
        let result_center_y = result.y + result.height / 2;
        assert!((result_center_x as i32 - 40).unsigned_abs() <= 1);
        assert!((result_center_y as i32 - 12).unsigned_abs() <= 1);
    }

    #[test]
    fn centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 10, 3);
        let result = centered_rect(28, 5, area);
        assert!(result.width <= area.width);
        assert!(result.height <= area.height);
    }

    #[test]
    fn centered_rect_percent_scales() {
        let area = Rect::new(0, 0, 100, 40);
        let result = centered_rect_percent(80, 50, area);
        assert_eq!(result.width, 80);
        assert_eq!(result.height, 20);
    }

    #[test]
    fn buffer_text_skips_cells_behind_wide_glyphs() {
        let mut buffer = ratatui::buffer::Buffer::empty(Rect::new(0, 0, 8, 1));
        buffer.set_string(0, 0, "助手ab", Style::default());
        assert_eq!(buffer_text(&buffer), "助手ab  \n");
    }

    #[test]
    fn focused_border_overrides_base() {
        let base = Style::default().fg(Color::Yellow);
        assert_eq!(focused_border_style(false, base), base);
        assert_ne!(focused_border_style(true, base), base);
    }
}
