use chrono::{Datelike, NaiveDate};

/// Layout of one month: leading blanks, then one cell per day, seven per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Weekday of day 1, Monday = 0 .. Sunday = 6.
    pub first_weekday: u32,
    pub days_in_month: u32,
}

impl MonthGrid {
    /// `None` for a month outside 1..=12 or a year chrono cannot represent.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self {
            year,
            month,
            first_weekday: first.weekday().num_days_from_monday(),
            days_in_month: days_in_month(year, month)?,
        })
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Cells in reading order: `None` for a leading blank, `Some(day)` otherwise.
    pub fn cells(&self) -> impl Iterator<Item = Option<u32>> {
        let blanks = std::iter::repeat(None).take(self.first_weekday as usize);
        blanks.chain((1..=self.days_in_month).map(Some))
    }

    /// Cells grouped into weeks. The last week is not padded.
    pub fn rows(&self) -> Vec<Vec<Option<u32>>> {
        let cells: Vec<Option<u32>> = self.cells().collect();
        cells.chunks(7).map(<[Option<u32>]>::to_vec).collect()
    }

    /// Row and column of `day` in [`MonthGrid::rows`].
    pub fn position(&self, day: u32) -> Option<(usize, usize)> {
        self.date(day)?;
        let index = (self.first_weekday + day - 1) as usize;
        Some((index / 7, index % 7))
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// The month after (`delta = 1`) or before (`delta = -1`) the given one.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_lengths() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn day_cell_count_matches_month_length() {
        let expected = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (i, len) in expected.iter().enumerate() {
            let grid = MonthGrid::new(2024, i as u32 + 1).unwrap();
            let days = grid.cells().flatten().count();
            assert_eq!(days, *len, "month {}", i + 1);
        }
        let feb_2023 = MonthGrid::new(2023, 2).unwrap();
        assert_eq!(feb_2023.cells().flatten().count(), 28);
    }

    #[test]
    fn march_2024_starts_on_friday() {
        let grid = MonthGrid::new(2024, 3).unwrap();
        assert_eq!(grid.first_weekday, 4);

        let rows = grid.rows();
        assert_eq!(&rows[0][..5], &[None, None, None, None, Some(1)]);
        assert_eq!(rows[0].len(), 7);
        // 4 blanks + 31 days = 35 cells, exactly five weeks
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].last(), Some(&Some(31)));
    }

    #[test]
    fn last_row_is_not_padded() {
        // 2024-02-01 is a Thursday: 3 blanks + 29 days = 32 cells
        let rows = MonthGrid::new(2024, 2).unwrap().rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4], vec![Some(26), Some(27), Some(28), Some(29)]);
    }

    #[test]
    fn day_positions() {
        let grid = MonthGrid::new(2024, 3).unwrap();
        assert_eq!(grid.position(1), Some((0, 4)));
        assert_eq!(grid.position(4), Some((1, 0)));
        assert_eq!(grid.position(32), None);
        assert_eq!(grid.position(31), Some((4, 6)));
    }

    #[test]
    fn shifting_months_rolls_the_year() {
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 6, 1), (2024, 7));
    }
}
