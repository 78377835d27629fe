mod app;
mod calendar;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::path::PathBuf;
use std::time::Duration;

use app::{App, DataLocation, InputMode, Screen};
use clap::Parser;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::info;

/// Habit tracker: tick off the days you kept each habit.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Open this user's calendars without asking
    #[arg(short, long)]
    user: Option<String>,

    /// Directory holding user_calendars_<user>.json files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep every calendar in this single file instead of one per user
    #[arg(long, value_name = "PATH", conflicts_with = "data_dir")]
    file: Option<PathBuf>,

    /// Config file (default: ~/.config/habit-calendar/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = config::Config::load(cli.config.as_deref())?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    logging::init(&data_dir)?;

    let location = match cli.file {
        Some(path) => DataLocation::Shared(path),
        None => DataLocation::PerUser(data_dir),
    };
    info!(?location, "starting");

    let user = cli.user.or(config.user);
    theme::init(config.theme.into_theme());
    let mut app = App::new(location, user.as_deref());

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            match app.screen {
                Screen::Login => {
                    components::Login::render(
                        frame,
                        area,
                        &app.login_input,
                        app.status_message.as_deref(),
                    );
                    return;
                }
                Screen::Calendar | Screen::ConfirmDelete(_) => {}
            }

            // Main layout: content + status bar
            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

            render_calendar_layout(frame, layout[0], app);

            if app.input_mode == InputMode::AddCalendar {
                let placeholder = app.view.as_ref().map_or("", |v| v.add_placeholder);
                components::NameForm::render(frame, area, placeholder, &app.name_input);
            }

            if let Screen::ConfirmDelete(ref confirm) = app.screen {
                components::ConfirmDelete::render(frame, area, confirm);
            }

            if app.show_help {
                render_help(frame, area);
            }

            components::StatusBar::render(
                frame,
                layout[1],
                &app.username,
                app.input_mode,
                app.status_message.as_deref(),
            );
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(250))? {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.running = false;
                continue;
            }

            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.screen {
                Screen::Login => handle_login_input(app, key.code),
                Screen::ConfirmDelete(_) => handle_confirm_input(app, key.code),
                Screen::Calendar => match app.input_mode {
                    InputMode::AddCalendar => handle_name_input(app, key.code),
                    InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                },
            }
        }
    }

    Ok(())
}

fn handle_login_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.running = false,
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => app.login_backspace(),
        KeyCode::Char(c) => app.login_input_char(c),
        _ => {}
    }
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) => app.running = false,
        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => app.toggle_cursor_day(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.move_cursor(-1),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.move_cursor(1),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.move_cursor(-7),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.move_cursor(7),
        (KeyCode::Tab, _) => app.next_tab(),
        (KeyCode::BackTab, _) => app.prev_tab(),
        (KeyCode::Char(c @ '1'..='9'), _) => app.select_tab(c as usize - '1' as usize),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('{'), _) | (KeyCode::Char('-'), _) => app.prev_year(),
        (KeyCode::Char('}'), _) | (KeyCode::Char('+'), _) => app.next_year(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('a'), _) => app.open_add_calendar(),
        (KeyCode::Char('d'), _) => app.request_delete(),
        (KeyCode::Char('r'), _) => app.reload(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_name_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_add_calendar(),
        KeyCode::Enter => app.submit_add_calendar(),
        KeyCode::Backspace => app.name_backspace(),
        KeyCode::Char(c) => app.name_input_char(c),
        _ => {}
    }
}

fn handle_confirm_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn render_calendar_layout(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    use ratatui::widgets::Paragraph;

    let Some(view) = app.view.as_ref() else {
        frame.render_widget(
            Paragraph::new("No calendar loaded").style(theme::current().dim),
            area,
        );
        return;
    };

    let rows = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Length(2), // tabs
        Constraint::Length(2), // year / month selectors
        Constraint::Length(1), // spacer
        Constraint::Min(8),    // month grid
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(view.title.as_str()).style(theme::current().header),
        rows[0],
    );
    components::TabBar::render(frame, rows[1], &view.tabs, view.active_tab);
    components::SelectorBar::render(frame, rows[2], view);

    let grid_w = 37.min(rows[4].width);
    let grid_area = Rect::new(rows[4].x, rows[4].y, grid_w, rows[4].height.min(9));
    components::MonthView::render(frame, grid_area, view, app.cursor_day, app.today);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let theme = theme::current();
    let popup_area = components::name_form::centered(area, 52, 22);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.accent)
        .borders(Borders::ALL)
        .border_style(theme.accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(ratatui::style::Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Days", section_style)),
        entry("h/j/k/l", "Move the cursor (arrows work too)"),
        entry("Space", "Mark / unmark the day"),
        Line::from(""),
        Line::from(Span::styled("Navigation", section_style)),
        entry("[ / ]", "Previous / next month"),
        entry("{ / }", "Previous / next year"),
        entry("t", "Jump to today"),
        entry("Tab", "Next calendar (Shift-Tab: previous)"),
        entry("1-9", "Jump to calendar tab"),
        Line::from(""),
        Line::from(Span::styled("Calendars", section_style)),
        entry("a", "Add a calendar"),
        entry("d", "Delete this calendar"),
        entry("r", "Reload from disk"),
        Line::from(""),
        entry("q", "Quit"),
        entry("Esc", "Close this help or a popup"),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
