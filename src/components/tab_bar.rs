use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::theme;

/// One tab per calendar, in file order.
pub struct TabBar;

impl TabBar {
    pub fn render(frame: &mut Frame, area: Rect, tabs: &[String], active: usize) {
        let theme = theme::current();
        let titles: Vec<Line> = tabs.iter().map(|t| Line::from(t.as_str())).collect();

        let tabs = Tabs::new(titles)
            .select(active)
            .style(theme.dim)
            .highlight_style(theme.active_tab)
            .divider("│")
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(theme.border),
            );
        frame.render_widget(tabs, area);
    }
}
