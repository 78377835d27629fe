use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::{debug, info};

use super::collection::{CalendarCollection, DEFAULT_CALENDAR};
use super::grid::{shift_month, MonthGrid};
use super::store::{Store, StoreError};

/// The calendar and month currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub calendar: String,
    pub year: i32,
    pub month: u32,
}

/// Requests that are dropped without touching the data file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidOperation {
    #[error("calendar name is blank")]
    BlankName,
    #[error("calendar '{0}' already exists")]
    DuplicateName(String),
    #[error("no calendar named '{0}'")]
    UnknownCalendar(String),
    #[error("{year}-{month:02} has no day {day}")]
    DayOutOfRange { year: i32, month: u32, day: u32 },
    #[error("month {0} is not in 1..=12")]
    MonthOutOfRange(u32),
    #[error("year {0} is outside the supported range")]
    YearOutOfRange(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(InvalidOperation),
}

impl Outcome {
    fn ignored(reason: InvalidOperation) -> Self {
        debug!(%reason, "operation ignored");
        Self::Ignored(reason)
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A store plus the current selection.
///
/// Every operation reads the collection fresh from the store, mutates it,
/// writes it back in full and only then updates the selection, so a failed
/// save leaves the session as it was.
#[derive(Debug)]
pub struct Session {
    store: Store,
    selection: Selection,
}

impl Session {
    /// Opens the store, creating the default calendar if there is none, and
    /// selects the first calendar at today's month.
    pub fn start(store: Store, today: NaiveDate) -> Result<Self, StoreError> {
        let mut calendars = store.load()?;
        if calendars.ensure_default() {
            info!(path = %store.path().display(), "created default calendar");
            store.save(&calendars)?;
        }
        let calendar = calendars.first_name().unwrap_or(DEFAULT_CALENDAR).to_string();

        Ok(Self {
            store,
            selection: Selection {
                calendar,
                year: today.year(),
                month: today.month(),
            },
        })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Fresh copy of the collection for rendering.
    pub fn load(&self) -> Result<CalendarCollection, StoreError> {
        self.store.load()
    }

    pub fn select_calendar(&mut self, name: &str) -> Result<Outcome, StoreError> {
        let calendars = self.store.load()?;
        if !calendars.contains(name) {
            return Ok(Outcome::ignored(InvalidOperation::UnknownCalendar(
                name.to_string(),
            )));
        }
        self.selection.calendar = name.to_string();
        Ok(Outcome::Applied)
    }

    /// Selects the calendar `offset` tabs away, wrapping around. If the
    /// selected calendar is gone, stepping starts from just outside the ends.
    pub fn cycle_calendar(&mut self, offset: isize) -> Result<Outcome, StoreError> {
        let calendars = self.store.load()?;
        let len = calendars.len() as isize;
        if len == 0 {
            return Ok(Outcome::ignored(InvalidOperation::UnknownCalendar(
                self.selection.calendar.clone(),
            )));
        }
        let current = match calendars.position(&self.selection.calendar) {
            Some(index) => index as isize,
            None if offset >= 0 => -1,
            None => len,
        };
        let next = (current + offset).rem_euclid(len) as usize;
        if let Some(name) = calendars.names().nth(next) {
            self.selection.calendar = name.to_string();
        }
        Ok(Outcome::Applied)
    }

    pub fn change_year(&mut self, year: i32) -> Outcome {
        if MonthGrid::new(year, self.selection.month).is_none() {
            return Outcome::ignored(InvalidOperation::YearOutOfRange(year));
        }
        self.selection.year = year;
        Outcome::Applied
    }

    pub fn change_month(&mut self, month: u32) -> Outcome {
        if !(1..=12).contains(&month) {
            return Outcome::ignored(InvalidOperation::MonthOutOfRange(month));
        }
        self.selection.month = month;
        Outcome::Applied
    }

    pub fn next_month(&mut self) {
        self.step_month(1);
    }

    pub fn prev_month(&mut self) {
        self.step_month(-1);
    }

    fn step_month(&mut self, delta: i32) {
        let (year, month) = shift_month(self.selection.year, self.selection.month, delta);
        self.selection.year = year;
        self.selection.month = month;
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.selection.year = today.year();
        self.selection.month = today.month();
    }

    /// Flips `day` of the selected month in the selected calendar.
    pub fn toggle_day(&mut self, day: u32) -> Result<Outcome, StoreError> {
        let Selection {
            ref calendar,
            year,
            month,
        } = self.selection;
        let Some(date) = MonthGrid::new(year, month).and_then(|grid| grid.date(day)) else {
            return Ok(Outcome::ignored(InvalidOperation::DayOutOfRange {
                year,
                month,
                day,
            }));
        };

        let mut calendars = self.store.load()?;
        let checked = calendars.toggle(calendar, date);
        self.store.save(&calendars)?;

        info!(calendar = %calendar, %date, checked, "toggled day");
        Ok(Outcome::Applied)
    }

    /// Adds an empty calendar under the trimmed `name` and selects it.
    pub fn add_calendar(&mut self, name: &str, today: NaiveDate) -> Result<Outcome, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Outcome::ignored(InvalidOperation::BlankName));
        }

        let mut calendars = self.store.load()?;
        if !calendars.insert_empty(name) {
            return Ok(Outcome::ignored(InvalidOperation::DuplicateName(
                name.to_string(),
            )));
        }
        self.store.save(&calendars)?;

        info!(calendar = %name, "added calendar");
        self.selection = Selection {
            calendar: name.to_string(),
            year: today.year(),
            month: today.month(),
        };
        Ok(Outcome::Applied)
    }

    /// Removes `name`. If nothing is left the default calendar is recreated.
    /// The first remaining calendar is selected at today's month.
    pub fn delete_calendar(&mut self, name: &str, today: NaiveDate) -> Result<Outcome, StoreError> {
        let mut calendars = self.store.load()?;
        if !calendars.remove(name) {
            return Ok(Outcome::ignored(InvalidOperation::UnknownCalendar(
                name.to_string(),
            )));
        }
        calendars.ensure_default();
        self.store.save(&calendars)?;

        info!(calendar = %name, "deleted calendar");
        let first = calendars.first_name().unwrap_or(DEFAULT_CALENDAR).to_string();
        self.selection = Selection {
            calendar: first,
            year: today.year(),
            month: today.month(),
        };
        Ok(Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn start(today: NaiveDate) -> (TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::for_user(dir.path(), "tester");
        let session = Session::start(store, today).unwrap();
        (dir, session)
    }

    fn file_json(session: &Session) -> serde_json::Value {
        let text = fs::read_to_string(session.store().path()).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    /// Makes every later save fail while loads keep working.
    fn block_saves(session: &Session) {
        fs::create_dir(session.store().staging_path()).unwrap();
    }

    #[test]
    fn empty_store_bootstraps_training_then_toggles() {
        let (_dir, mut session) = start(d(2024, 3, 10));
        assert_eq!(file_json(&session), serde_json::json!({ "Training": [] }));
        assert_eq!(
            session.selection(),
            &Selection {
                calendar: "Training".into(),
                year: 2024,
                month: 3,
            }
        );

        assert!(session.toggle_day(15).unwrap().is_applied());
        assert_eq!(
            file_json(&session),
            serde_json::json!({ "Training": ["2024-03-15"] })
        );
    }

    #[test]
    fn existing_store_selects_first_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::for_user(dir.path(), "tester");
        fs::write(store.path(), r#"{"Reading": [], "Gym": ["2024-01-01"]}"#).unwrap();

        let session = Session::start(store, d(2024, 5, 1)).unwrap();
        assert_eq!(session.selection().calendar, "Reading");
        assert_eq!(session.load().unwrap().len(), 2);
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let (_dir, mut session) = start(d(2024, 2, 1));
        session.toggle_day(3).unwrap();
        let before = session.load().unwrap();

        session.toggle_day(29).unwrap();
        assert!(session.load().unwrap().is_checked("Training", d(2024, 2, 29)));
        session.toggle_day(29).unwrap();
        assert_eq!(session.load().unwrap(), before);
    }

    #[test]
    fn toggle_outside_month_is_ignored() {
        let (_dir, mut session) = start(d(2023, 2, 1));
        let outcome = session.toggle_day(29).unwrap();
        assert_eq!(
            outcome,
            Outcome::Ignored(InvalidOperation::DayOutOfRange {
                year: 2023,
                month: 2,
                day: 29,
            })
        );
        assert!(!session.toggle_day(0).unwrap().is_applied());
    }

    #[test]
    fn add_selects_new_calendar_at_today() {
        let today = d(2024, 6, 1);
        let (_dir, mut session) = start(today);
        session.change_year(2020);

        assert!(session.add_calendar("  Reading ", today).unwrap().is_applied());
        assert_eq!(
            session.selection(),
            &Selection {
                calendar: "Reading".into(),
                year: 2024,
                month: 6,
            }
        );
        let names: Vec<String> = session.load().unwrap().names().map(String::from).collect();
        assert_eq!(names, vec!["Training", "Reading"]);
    }

    #[test]
    fn add_blank_or_duplicate_does_not_write() {
        let today = d(2024, 6, 1);
        let (_dir, mut session) = start(today);
        let before = session.load().unwrap();
        // any save attempt would now fail with an Io error
        block_saves(&session);

        assert_eq!(
            session.add_calendar("Training", today).unwrap(),
            Outcome::Ignored(InvalidOperation::DuplicateName("Training".into()))
        );
        assert_eq!(
            session.add_calendar("   ", today).unwrap(),
            Outcome::Ignored(InvalidOperation::BlankName)
        );
        assert_eq!(session.load().unwrap(), before);
        assert_eq!(session.selection().calendar, "Training");
    }

    #[test]
    fn deleting_last_calendar_recreates_training() {
        let today = d(2024, 6, 1);
        let (_dir, mut session) = start(today);
        session.toggle_day(5).unwrap();

        assert!(session.delete_calendar("Training", today).unwrap().is_applied());
        assert_eq!(file_json(&session), serde_json::json!({ "Training": [] }));
        assert_eq!(session.selection().calendar, "Training");
    }

    #[test]
    fn delete_selects_first_remaining() {
        let today = d(2024, 6, 1);
        let (_dir, mut session) = start(today);
        session.add_calendar("Gym", today).unwrap();
        session.add_calendar("Piano", today).unwrap();
        session.next_month();

        session.delete_calendar("Training", today).unwrap();
        assert_eq!(
            session.selection(),
            &Selection {
                calendar: "Gym".into(),
                year: 2024,
                month: 6,
            }
        );

        assert_eq!(
            session.delete_calendar("Nope", today).unwrap(),
            Outcome::Ignored(InvalidOperation::UnknownCalendar("Nope".into()))
        );
    }

    #[test]
    fn tab_switch_keeps_year_and_month() {
        let today = d(2024, 6, 1);
        let (_dir, mut session) = start(today);
        session.add_calendar("Gym", today).unwrap();
        session.change_year(2022);
        session.change_month(11);

        assert!(session.select_calendar("Training").unwrap().is_applied());
        assert_eq!(
            session.selection(),
            &Selection {
                calendar: "Training".into(),
                year: 2022,
                month: 11,
            }
        );

        session.cycle_calendar(1).unwrap();
        assert_eq!(session.selection().calendar, "Gym");
        session.cycle_calendar(1).unwrap();
        assert_eq!(session.selection().calendar, "Training");
        session.cycle_calendar(-1).unwrap();
        assert_eq!(session.selection().calendar, "Gym");
        assert_eq!(session.selection().month, 11);

        assert!(!session.select_calendar("Missing").unwrap().is_applied());
        assert_eq!(session.selection().calendar, "Gym");
    }

    #[test]
    fn cycle_from_vanished_calendar_starts_at_the_ends() {
        let today = d(2024, 6, 1);
        let (_dir, mut session) = start(today);
        session.add_calendar("B", today).unwrap();
        session.add_calendar("C", today).unwrap();
        fs::write(session.store().path(), r#"{"Training": [], "B": []}"#).unwrap();

        session.cycle_calendar(1).unwrap();
        assert_eq!(session.selection().calendar, "Training");

        fs::write(session.store().path(), r#"{"A": [], "B": []}"#).unwrap();
        session.cycle_calendar(-1).unwrap();
        assert_eq!(session.selection().calendar, "B");
    }

    #[test]
    fn year_outside_chrono_range_is_ignored() {
        let (_dir, mut session) = start(d(2024, 6, 1));
        assert_eq!(
            session.change_year(i32::MAX),
            Outcome::Ignored(InvalidOperation::YearOutOfRange(i32::MAX))
        );
        assert_eq!(session.selection().year, 2024);
    }

    #[test]
    fn month_navigation() {
        let (_dir, mut session) = start(d(2024, 12, 31));
        session.next_month();
        assert_eq!((session.selection().year, session.selection().month), (2025, 1));
        session.prev_month();
        session.prev_month();
        assert_eq!((session.selection().year, session.selection().month), (2024, 11));

        assert!(!session.change_month(13).is_applied());
        assert!(!session.change_month(0).is_applied());
        assert_eq!(session.selection().month, 11);

        session.go_to_today(d(2030, 4, 2));
        assert_eq!((session.selection().year, session.selection().month), (2030, 4));
    }

    #[test]
    fn failed_save_reports_error_and_keeps_state() {
        let today = d(2024, 6, 1);
        let (_dir, mut session) = start(today);
        let before = session.load().unwrap();
        let selection = session.selection().clone();
        block_saves(&session);

        assert!(matches!(
            session.add_calendar("Gym", today),
            Err(StoreError::Io { .. })
        ));
        assert!(matches!(session.toggle_day(1), Err(StoreError::Io { .. })));
        assert_eq!(session.selection(), &selection);
        assert_eq!(session.load().unwrap(), before);
    }

    #[test]
    fn corrupt_file_fails_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::for_user(dir.path(), "tester");
        fs::write(store.path(), "[1, 2").unwrap();

        let err = Session::start(store, d(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }
}
