use std::fmt::Display;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::calendar::view::{CalendarViewModel, Selector};
use crate::theme;

/// Year and month pickers plus the add/delete affordances.
pub struct SelectorBar;

impl SelectorBar {
    pub fn render(frame: &mut Frame, area: Rect, view: &CalendarViewModel) {
        let theme = theme::current();
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let mut year_line = vec![Span::styled("{/} 年 ", theme.dim)];
        year_line.extend(option_spans(&view.years));
        year_line.push(Span::raw("   "));
        year_line.push(Span::styled("a", theme.accent));
        year_line.push(Span::raw(format!(":{}  ", view.add_label)));
        year_line.push(Span::styled("d", theme.accent));
        year_line.push(Span::raw(format!(":{}", view.delete_label)));

        let mut month_line = vec![Span::styled("[/] 月 ", theme.dim)];
        month_line.extend(option_spans(&view.months));

        frame.render_widget(Paragraph::new(Line::from(year_line)), rows[0]);
        frame.render_widget(Paragraph::new(Line::from(month_line)), rows[1]);
    }
}

fn option_spans<T: Display + PartialEq>(selector: &Selector<T>) -> Vec<Span<'static>> {
    let theme = theme::current();
    selector
        .options
        .iter()
        .map(|option| {
            let style = if *option == selector.current {
                theme.cursor
            } else {
                Style::default()
            };
            Span::styled(format!(" {} ", option), style)
        })
        .collect()
}
