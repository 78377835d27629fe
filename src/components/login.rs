use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::name_form::centered;
use crate::theme;

pub const LOGIN_PROMPT: &str = "カレンダーを使う前に，ユーザー名を入力してください";

/// First screen: asks for the name whose calendars to open.
pub struct Login;

impl Login {
    pub fn render(frame: &mut Frame, area: Rect, input: &str, error: Option<&str>) {
        let theme = theme::current();
        let popup_area = centered(area, 60, 8);

        let block = Block::default()
            .title(" Habit Calendar ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // prompt
            Constraint::Length(1), // spacer
            Constraint::Length(1), // input
            Constraint::Length(1), // spacer
            Constraint::Length(1), // error or hint
            Constraint::Min(0),
        ])
        .split(inner);

        frame.render_widget(Paragraph::new(LOGIN_PROMPT).style(theme.header), rows[0]);

        let field = Line::from(vec![
            Span::styled("ユーザー名: ", theme.dim),
            Span::styled(format!("{}_", input), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(field), rows[2]);

        let footer = match error {
            Some(msg) => Paragraph::new(msg.to_string()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new("Enter:開始  Esc:Quit").style(theme.dim),
        };
        frame.render_widget(footer, rows[4]);
    }
}
