use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::name_form::centered;
use crate::calendar::ConfirmDeleteViewModel;
use crate::theme;

pub struct ConfirmDelete;

impl ConfirmDelete {
    pub fn render(frame: &mut Frame, area: Rect, confirm: &ConfirmDeleteViewModel) {
        let theme = theme::current();
        let popup_area = centered(area, 52, 7);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" 削除の確認 ")
            .title_style(theme.accent)
            .borders(Borders::ALL)
            .border_style(theme.accent);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let rows = Layout::vertical([
            Constraint::Length(2), // prompt
            Constraint::Length(1), // spacer
            Constraint::Length(1), // buttons
            Constraint::Min(0),
        ])
        .split(inner);

        let prompt = Paragraph::new(confirm.prompt.as_str())
            .style(theme.header)
            .wrap(Wrap { trim: true });
        frame.render_widget(prompt, rows[0]);

        let key_style = theme.accent.add_modifier(Modifier::BOLD);
        let buttons = Line::from(vec![
            Span::styled("[y] ", key_style),
            Span::raw(confirm.confirm_label),
            Span::raw("    "),
            Span::styled("[n] ", key_style),
            Span::raw(confirm.cancel_label),
        ]);
        frame.render_widget(Paragraph::new(buttons), rows[2]);
    }
}
