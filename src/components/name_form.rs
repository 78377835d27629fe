use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme;

/// Centered text field for naming a new calendar.
pub struct NameForm;

impl NameForm {
    pub fn render(frame: &mut Frame, area: Rect, placeholder: &str, value: &str) {
        let theme = theme::current();
        let popup_area = centered(area, 44, 6);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", placeholder))
            .title_style(theme.accent)
            .borders(Borders::ALL)
            .border_style(theme.accent);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // input
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        let input = Line::from(vec![
            Span::styled("> ", theme.dim),
            Span::styled(format!("{}_", value), Style::default().fg(ratatui::style::Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(input), rows[0]);

        let help = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Add ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[2]);
    }
}

/// A `w` by `h` box in the middle of `area`, shrunk to fit.
pub fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_box_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered(area, 44, 6), Rect::new(18, 9, 44, 6));

        let small = Rect::new(2, 1, 20, 4);
        let popup = centered(small, 44, 6);
        assert_eq!(popup, Rect::new(2, 1, 20, 4));
    }
}
