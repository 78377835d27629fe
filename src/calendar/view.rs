//! Screen descriptions handed to the terminal shell.
//!
//! These are plain data: the shell draws them and routes key presses back
//! to [`Session`](super::Session) using the values carried in each cell.

use chrono::{Datelike, NaiveDate};

use super::collection::CalendarCollection;
use super::grid::MonthGrid;
use super::session::Selection;

/// Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];
pub const CHECK_MARK: &str = "✓";

/// Years offered on either side of the current one.
pub const YEAR_WINDOW: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector<T> {
    pub options: Vec<T>,
    pub current: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarViewModel {
    pub title: String,
    pub header: String,
    pub calendar: String,
    pub weekday_labels: [&'static str; 7],
    pub grid: MonthGrid,
    pub rows: Vec<Vec<Option<DayCell>>>,
    pub years: Selector<i32>,
    pub months: Selector<u32>,
    pub tabs: Vec<String>,
    pub active_tab: usize,
    pub add_label: &'static str,
    pub add_placeholder: &'static str,
    pub delete_label: &'static str,
}

impl CalendarViewModel {
    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        let (row, col) = self.grid.position(day)?;
        self.rows.get(row)?.get(col)?.as_ref()
    }

    pub fn checked_count(&self) -> usize {
        self.rows.iter().flatten().flatten().filter(|c| c.checked).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDeleteViewModel {
    pub calendar: String,
    pub prompt: String,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

/// Builds the month screen for `selection`. Returns `None` only for a
/// selection chrono cannot place on a calendar.
pub fn render_calendar_view(
    username: &str,
    selection: &Selection,
    calendars: &CalendarCollection,
    today: NaiveDate,
) -> Option<CalendarViewModel> {
    let grid = MonthGrid::new(selection.year, selection.month)?;
    let name = selection.calendar.as_str();

    let rows: Vec<Vec<Option<DayCell>>> = grid
        .rows()
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|slot| {
                    let day = slot?;
                    let date = grid.date(day)?;
                    Some(DayCell {
                        day,
                        date,
                        checked: calendars.is_checked(name, date),
                    })
                })
                .collect()
        })
        .collect();

    let tabs: Vec<String> = calendars.names().map(str::to_string).collect();
    let active_tab = calendars.position(name).unwrap_or(0);

    Some(CalendarViewModel {
        title: format!("{username} さんのカレンダー"),
        header: format!("{}年{}月 {} 記録", selection.year, selection.month, name),
        calendar: name.to_string(),
        weekday_labels: WEEKDAY_LABELS,
        grid,
        rows,
        years: year_selector(selection.year, today),
        months: Selector {
            options: (1..=12).collect(),
            current: selection.month,
        },
        tabs,
        active_tab,
        add_label: "追加",
        add_placeholder: "新しいカレンダー名を追加",
        delete_label: "削除",
    })
}

pub fn render_confirm_delete(name: &str) -> ConfirmDeleteViewModel {
    ConfirmDeleteViewModel {
        calendar: name.to_string(),
        prompt: format!("「{name}」カレンダーを本当に削除しますか？"),
        confirm_label: "はい（削除）",
        cancel_label: "いいえ（戻る）",
    }
}

fn year_selector(current: i32, today: NaiveDate) -> Selector<i32> {
    let this_year = today.year();
    let mut options: Vec<i32> = (this_year - YEAR_WINDOW..=this_year + YEAR_WINDOW).collect();
    if !options.contains(&current) {
        options.push(current);
        options.sort_unstable();
    }
    Selector { options, current }
}
