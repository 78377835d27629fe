use std::collections::BTreeSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the calendar created when a collection would otherwise be empty.
pub const DEFAULT_CALENDAR: &str = "Training";

/// Dates marked done for one calendar. Serialized as `YYYY-MM-DD` strings.
pub type CompletionSet = BTreeSet<NaiveDate>;

/// Calendar name to completed dates, in insertion order.
///
/// Insertion order decides tab order and which calendar counts as "first"
/// after a delete, so this is an `IndexMap` rather than a sorted map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarCollection {
    calendars: IndexMap<String, CompletionSet>,
}

impl CalendarCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calendars.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.calendars.keys().map(String::as_str)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.calendars.keys().next().map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.calendars.get_index_of(name)
    }

    pub fn is_checked(&self, name: &str, date: NaiveDate) -> bool {
        self.calendars
            .get(name)
            .is_some_and(|days| days.contains(&date))
    }

    /// Adds an empty calendar. Returns `false` if the name is already taken.
    pub fn insert_empty(&mut self, name: &str) -> bool {
        if self.calendars.contains_key(name) {
            return false;
        }
        self.calendars.insert(name.to_string(), CompletionSet::new());
        true
    }

    /// Removes a calendar, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> bool {
        self.calendars.shift_remove(name).is_some()
    }

    /// Flips `date` in the calendar's set and returns whether it is now
    /// checked. A missing calendar is created on the way.
    pub fn toggle(&mut self, name: &str, date: NaiveDate) -> bool {
        let days = self.calendars.entry(name.to_string()).or_default();
        if days.remove(&date) {
            false
        } else {
            days.insert(date);
            true
        }
    }

    /// Inserts [`DEFAULT_CALENDAR`] if the collection is empty.
    pub fn ensure_default(&mut self) -> bool {
        if self.is_empty() {
            self.insert_empty(DEFAULT_CALENDAR)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn toggle_twice_restores_set() {
        let mut calendars = CalendarCollection::new();
        calendars.insert_empty("Gym");
        calendars.toggle("Gym", d(2024, 3, 1));
        let before = calendars.clone();

        assert!(calendars.toggle("Gym", d(2024, 3, 15)));
        assert!(calendars.is_checked("Gym", d(2024, 3, 15)));
        assert!(!calendars.toggle("Gym", d(2024, 3, 15)));
        assert_eq!(calendars, before);
    }

    #[test]
    fn insert_refuses_existing_name() {
        let mut calendars = CalendarCollection::new();
        assert!(calendars.insert_empty("Reading"));
        calendars.toggle("Reading", d(2024, 1, 2));
        assert!(!calendars.insert_empty("Reading"));
        assert!(calendars.is_checked("Reading", d(2024, 1, 2)));
    }

    #[test]
    fn remove_keeps_insertion_order() {
        let mut calendars = CalendarCollection::new();
        for name in ["Gym", "Reading", "Piano"] {
            calendars.insert_empty(name);
        }
        assert!(calendars.remove("Gym"));
        assert!(!calendars.remove("Gym"));
        let names: Vec<&str> = calendars.names().collect();
        assert_eq!(names, vec!["Reading", "Piano"]);
        assert_eq!(calendars.first_name(), Some("Reading"));
    }

    #[test]
    fn default_only_added_when_empty() {
        let mut calendars = CalendarCollection::new();
        assert!(calendars.ensure_default());
        assert!(!calendars.ensure_default());
        assert_eq!(calendars.len(), 1);
        assert_eq!(calendars.first_name(), Some(DEFAULT_CALENDAR));
    }

    #[test]
    fn json_shape_is_name_to_date_strings() {
        let mut calendars = CalendarCollection::new();
        calendars.insert_empty("筋トレ");
        calendars.toggle("筋トレ", d(2024, 3, 15));
        calendars.toggle("筋トレ", d(2024, 3, 2));

        let json = serde_json::to_value(&calendars).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "筋トレ": ["2024-03-02", "2024-03-15"] })
        );
    }
}
