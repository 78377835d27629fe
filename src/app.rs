use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{error, info};

use crate::calendar::grid::days_in_month;
use crate::calendar::view::{self, CalendarViewModel, ConfirmDeleteViewModel};
use crate::calendar::{Outcome, Session, Store, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    Calendar,
    ConfirmDelete(ConfirmDeleteViewModel),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    AddCalendar,
}

/// Where calendar files live.
#[derive(Debug, Clone)]
pub enum DataLocation {
    /// One `user_calendars_<user>.json` per user in this directory.
    PerUser(PathBuf),
    /// Every user shares this one file.
    Shared(PathBuf),
}

impl DataLocation {
    pub fn store_for(&self, user_key: &str) -> Store {
        match self {
            DataLocation::PerUser(dir) => Store::for_user(dir, user_key),
            DataLocation::Shared(path) => Store::new(path),
        }
    }
}

/// Turns a typed display name into something safe inside a file name.
pub fn user_file_key(display_name: &str) -> String {
    let key = sanitize_filename::sanitize(display_name.trim());
    if key.is_empty() {
        "default".to_string()
    } else {
        key
    }
}

pub struct App {
    pub running: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub today: NaiveDate,
    pub username: String,
    pub login_input: String,
    pub name_input: String,
    /// Day of the selected month the cursor sits on.
    pub cursor_day: u32,
    pub view: Option<CalendarViewModel>,
    pub status_message: Option<String>,
    pub show_help: bool,
    location: DataLocation,
    session: Option<Session>,
    clock: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    pub fn new(location: DataLocation, user: Option<&str>) -> Self {
        Self::with_clock(location, user, local_today)
    }

    /// Like [`App::new`], reading the current date from `clock`.
    pub fn with_clock(
        location: DataLocation,
        user: Option<&str>,
        clock: fn() -> NaiveDate,
    ) -> Self {
        let today = clock();
        let mut app = Self {
            running: true,
            screen: Screen::Login,
            input_mode: InputMode::Normal,
            today,
            username: String::new(),
            login_input: String::new(),
            name_input: String::new(),
            cursor_day: today.day(),
            view: None,
            status_message: None,
            show_help: false,
            location,
            session: None,
            clock,
        };
        if let Some(user) = user {
            app.login(user);
        }
        app
    }

    // ── Login ──

    pub fn login_input_char(&mut self, c: char) {
        self.login_input.push(c);
    }

    pub fn login_backspace(&mut self) {
        self.login_input.pop();
    }

    pub fn submit_login(&mut self) {
        let name = std::mem::take(&mut self.login_input);
        self.login(&name);
    }

    /// Opens the calendars of `name`, or "default" when blank.
    pub fn login(&mut self, name: &str) {
        let display_name = match name.trim() {
            "" => "default",
            trimmed => trimmed,
        };
        let store = self.location.store_for(&user_file_key(display_name));

        match Session::start(store, self.today) {
            Ok(session) => {
                info!(user = %display_name, path = %session.store().path().display(), "opened calendars");
                self.username = display_name.to_string();
                self.session = Some(session);
                self.screen = Screen::Calendar;
                self.cursor_day = self.today.day();
                self.refresh();
            }
            Err(e) => self.report_error(&e),
        }
    }

    // ── Rendering ──

    /// Re-reads the data file and rebuilds the month view. On failure the
    /// previous view stays on screen and `false` is returned.
    pub fn refresh(&mut self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        let calendars = match session.load() {
            Ok(calendars) => calendars,
            Err(e) => {
                self.report_error(&e);
                return false;
            }
        };
        let selection = session.selection();
        if let Some(days) = days_in_month(selection.year, selection.month) {
            self.cursor_day = self.cursor_day.clamp(1, days);
        }
        self.view =
            view::render_calendar_view(&self.username, selection, &calendars, self.today);
        true
    }

    /// Explicit reload from disk. Only reports success when the file loaded.
    pub fn reload(&mut self) {
        self.today = (self.clock)();
        if self.refresh() {
            self.status_message = Some("Reloaded".to_string());
        }
    }

    fn apply(&mut self, result: Result<Outcome, StoreError>) {
        match result {
            Ok(_) => {
                self.refresh();
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, e: &StoreError) {
        error!(error = %e, "calendar operation failed");
        self.status_message = Some(e.to_string());
    }

    // ── Month grid ──

    /// Toggles the cell under the cursor, if the rendered month has one.
    pub fn toggle_cursor_day(&mut self) {
        let Some(day) = self
            .view
            .as_ref()
            .and_then(|v| v.cell(self.cursor_day))
            .map(|cell| cell.day)
        else {
            return;
        };
        self.toggle_day(day);
    }

    pub fn toggle_day(&mut self, day: u32) {
        if let Some(session) = self.session.as_mut() {
            let result = session.toggle_day(day);
            self.apply(result);
        }
    }

    /// Moves the cursor by `delta` days, staying inside the month.
    pub fn move_cursor(&mut self, delta: i32) {
        let Some(view) = &self.view else {
            return;
        };
        let target = self.cursor_day as i64 + delta as i64;
        if target >= 1 && target <= view.grid.days_in_month as i64 {
            self.cursor_day = target as u32;
        }
    }

    pub fn next_month(&mut self) {
        self.navigate(Session::next_month);
    }

    pub fn prev_month(&mut self) {
        self.navigate(Session::prev_month);
    }

    pub fn next_year(&mut self) {
        self.navigate(|s| {
            let year = s.selection().year + 1;
            s.change_year(year);
        });
    }

    pub fn prev_year(&mut self) {
        self.navigate(|s| {
            let year = s.selection().year - 1;
            s.change_year(year);
        });
    }

    pub fn go_to_today(&mut self) {
        self.today = (self.clock)();
        let today = self.today;
        self.cursor_day = today.day();
        self.navigate(|s| s.go_to_today(today));
    }

    fn navigate(&mut self, f: impl FnOnce(&mut Session)) {
        if let Some(session) = self.session.as_mut() {
            f(session);
            self.refresh();
        }
    }

    // ── Tabs ──

    pub fn next_tab(&mut self) {
        self.cycle_tab(1);
    }

    pub fn prev_tab(&mut self) {
        self.cycle_tab(-1);
    }

    fn cycle_tab(&mut self, offset: isize) {
        if let Some(session) = self.session.as_mut() {
            let result = session.cycle_calendar(offset);
            self.apply(result);
        }
    }

    pub fn select_tab(&mut self, index: usize) {
        let Some(name) = self.view.as_ref().and_then(|v| v.tabs.get(index)).cloned() else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            let result = session.select_calendar(&name);
            self.apply(result);
        }
    }

    // ── Add calendar ──

    pub fn open_add_calendar(&mut self) {
        self.name_input.clear();
        self.input_mode = InputMode::AddCalendar;
    }

    pub fn close_add_calendar(&mut self) {
        self.name_input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn name_input_char(&mut self, c: char) {
        self.name_input.push(c);
    }

    pub fn name_backspace(&mut self) {
        self.name_input.pop();
    }

    pub fn submit_add_calendar(&mut self) {
        let name = std::mem::take(&mut self.name_input);
        self.input_mode = InputMode::Normal;
        self.today = (self.clock)();
        let today = self.today;
        if let Some(session) = self.session.as_mut() {
            let result = session.add_calendar(&name, today);
            if result.as_ref().is_ok_and(Outcome::is_applied) {
                self.cursor_day = today.day();
            }
            self.apply(result);
        }
    }

    // ── Delete calendar ──

    pub fn request_delete(&mut self) {
        if let Some(view) = &self.view {
            self.screen = Screen::ConfirmDelete(view::render_confirm_delete(&view.calendar));
        }
    }

    pub fn confirm_delete(&mut self) {
        let Screen::ConfirmDelete(confirm) = std::mem::replace(&mut self.screen, Screen::Calendar)
        else {
            return;
        };
        self.today = (self.clock)();
        let today = self.today;
        if let Some(session) = self.session.as_mut() {
            let result = session.delete_calendar(&confirm.calendar, today);
            if result.as_ref().is_ok_and(Outcome::is_applied) {
                self.cursor_day = today.day();
            }
            self.apply(result);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.screen = Screen::Calendar;
        self.refresh();
    }
}
