use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::InputMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    /// `message` replaces the key hints when set.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        username: &str,
        mode: InputMode,
        message: Option<&str>,
    ) {
        let style = theme::current().status;
        let w = area.width as usize;

        let mode_str = match mode {
            InputMode::Normal => "",
            InputMode::AddCalendar => " [New Calendar]",
        };

        let right_text = match message {
            Some(msg) => format!(" {} ", msg),
            None if w >= 90 => {
                " hjkl:Move Sp:Toggle Tab:Calendar [/]:Month {/}:Year t:Today ?:Help q:Quit "
                    .to_string()
            }
            None if w >= 50 => " Sp:Toggle Tab:Cal [/]:Mon ?:Help q:Quit ".to_string(),
            None => " ?:Help q:Quit ".to_string(),
        };

        let left = format!(" {}{} ", username, mode_str);
        let used = Line::from(left.as_str()).width() + Line::from(right_text.as_str()).width();
        let padding = " ".repeat(w.saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right_text, style),
        ]);

        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
