use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::view::{CalendarViewModel, DayCell, CHECK_MARK};
use crate::theme;

/// Columns per day cell.
const CELL_W: usize = 5;

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        view: &CalendarViewModel,
        cursor_day: u32,
        today: NaiveDate,
    ) {
        let theme = theme::current();
        let checked = view.checked_count();
        let count_str = format!(" {} / {} {} ", checked, view.grid.days_in_month, CHECK_MARK);

        let block = Block::default()
            .title(format!(" {} ", view.header))
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(count_str, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Labels are double width, so pad by hand rather than with `{:^5}`
        let header_cells: Vec<Span> = view
            .weekday_labels
            .iter()
            .map(|d| Span::styled(format!("  {} ", d), theme.header))
            .collect();
        let header = Line::from(header_cells);

        let weeks: Vec<Line> = view
            .rows
            .iter()
            .map(|week| {
                let cells: Vec<Span> = week
                    .iter()
                    .map(|slot| match slot {
                        Some(cell) => day_span(cell, cursor_day, today),
                        None => Span::raw(" ".repeat(CELL_W)),
                    })
                    .collect();
                Line::from(cells)
            })
            .collect();

        // Layout: header + weeks
        let mut constraints = vec![Constraint::Length(1)]; // header
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0)); // fill remaining

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}

fn day_span(cell: &DayCell, cursor_day: u32, today: NaiveDate) -> Span<'static> {
    let theme = theme::current();
    let mark = if cell.checked { CHECK_MARK } else { " " };
    let text = format!(" {:>2}{} ", cell.day, mark);

    let style = if cell.day == cursor_day {
        theme.cursor
    } else if cell.checked {
        theme.checked
    } else if cell.date == today {
        theme.today
    } else {
        Style::default()
    };
    let style = if cell.date == today {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    };

    Span::styled(text, style)
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::calendar::collection::CalendarCollection;
    use crate::calendar::session::Selection;
    use crate::calendar::view::render_calendar_view;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_header_days_and_marks() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let mut calendars = CalendarCollection::new();
        calendars.insert_empty("Gym");
        calendars.toggle("Gym", NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let selection = Selection {
            calendar: "Gym".into(),
            year: 2024,
            month: 2,
        };
        let view = render_calendar_view("u", &selection, &calendars, today).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|frame| MonthView::render(frame, frame.area(), &view, 1, today))
            .unwrap();

        // wide glyphs leave a blank cell behind them, so compare without spaces
        let text = buffer_text(&terminal).replace(' ', "");
        assert!(text.contains("2024年2月Gym記録"));
        assert!(text.contains("月火水木金土日"));
        assert!(text.contains(&format!("29{}", CHECK_MARK)));
        assert!(text.contains("1/29"));
    }
}
