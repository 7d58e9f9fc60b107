//! Month-view calendar grid.
//!
//! A grid always renders as whole weeks starting on Sunday: 35 cells when the
//! month fits in five weeks, 42 otherwise.

use chrono::{Datelike, Local, NaiveDate};

use crate::journal_entry::JournalEntry;

pub const SHORT_GRID: usize = 35;
pub const LONG_GRID: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_active: bool,
    pub is_today: bool,
    pub entries: Vec<JournalEntry>,
}

impl DayCell {
    fn inactive(date: NaiveDate) -> Self {
        DayCell {
            day: date.day(),
            date,
            is_active: false,
            is_today: false,
            entries: Vec::new(),
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => panic!("month must be in 1..=12, got {month}"),
    }
}

/// Builds the grid for `month` (1..=12) of `year`, highlighting the local
/// current day when it falls in that month.
///
/// Panics when `month` is out of range or when `year` lies outside the
/// range chrono can represent (roughly ±262,000).
pub fn build_grid(month: u32, year: i32) -> Vec<DayCell> {
    build_grid_with_today(month, year, Local::now().date_naive())
}

pub fn build_grid_with_today(month: u32, year: i32, today: NaiveDate) -> Vec<DayCell> {
    let total_days = days_in_month(year, month);
    let first = date(year, month, 1);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let grid_size = if leading + total_days as usize <= SHORT_GRID {
        SHORT_GRID
    } else {
        LONG_GRID
    };
    let mut cells = Vec::with_capacity(grid_size);

    let (prev_year, prev_month) = MonthCursor::new(month, year).prev().parts();
    let prev_last = days_in_month(prev_year, prev_month);
    for offset in (1..=leading as u32).rev() {
        let day = prev_last - offset + 1;
        cells.push(DayCell::inactive(date(prev_year, prev_month, day)));
    }

    for day in 1..=total_days {
        let cell_date = date(year, month, day);
        cells.push(DayCell {
            day,
            date: cell_date,
            is_active: true,
            is_today: cell_date == today,
            entries: Vec::new(),
        });
    }

    let (next_year, next_month) = MonthCursor::new(month, year).next().parts();
    let trailing = grid_size - cells.len();
    for day in 1..=trailing as u32 {
        cells.push(DayCell::inactive(date(next_year, next_month, day)));
    }

    cells
}

/// Attaches each entry to the active cell of its local day. Entries outside
/// the displayed month are left out.
pub fn assign_entries(cells: &mut [DayCell], entries: &[JournalEntry]) {
    for entry in entries {
        let day = entry.local_day();
        if let Some(cell) = cells.iter_mut().find(|c| c.is_active && c.date == day) {
            cell.entries.push(entry.clone());
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("year {year} is outside the supported calendar range"))
}

/// The month shown by the calendar view, paged with wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    month: u32,
    year: i32,
}

impl MonthCursor {
    pub fn new(month: u32, year: i32) -> Self {
        assert!((1..=12).contains(&month), "month must be in 1..=12, got {month}");
        MonthCursor { month, year }
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(day: NaiveDate) -> Self {
        MonthCursor::new(day.month(), day.year())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    fn parts(self) -> (i32, u32) {
        (self.year, self.month)
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            MonthCursor::new(1, self.year + 1)
        } else {
            MonthCursor::new(self.month + 1, self.year)
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            MonthCursor::new(12, self.year - 1)
        } else {
            MonthCursor::new(self.month - 1, self.year)
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day.month() == self.month && day.year() == self.year
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn grid(&self) -> Vec<DayCell> {
        build_grid(self.month, self.year)
    }

    /// "October 2026"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize - 1], self.year)
    }
}
