use crate::dates::{date_key, weekday_index, DateRange};
use crate::goal::is_target_date;
use crate::models::{Completions, Goal};
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_GRID_DAYS: usize = 84;
const DAYS_PER_COLUMN: usize = 7;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayCell {
    #[serde(skip)]
    pub date: NaiveDate,
    pub key: String,
    pub weekday: u8,
    pub done: bool,
    pub is_target: bool,
    pub is_today: bool,
}

/// Week columns of contiguous 7-day slices, oldest first. Only the last
/// column may be shorter than seven days.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct Grid {
    pub columns: Vec<Vec<DayCell>>,
}

impl Grid {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.columns.iter().flatten()
    }
}

pub fn build_grid(
    goal: &Goal,
    completions: &Completions,
    today: NaiveDate,
    window_size: usize,
) -> Grid {
    let cells: Vec<DayCell> = DateRange::ending_at(today, window_size)
        .iter()
        .map(|date| DayCell {
            date,
            key: date_key(date),
            weekday: weekday_index(date),
            done: completions.is_done(date),
            is_target: is_target_date(date, goal),
            is_today: date == today,
        })
        .collect();

    Grid {
        columns: cells
            .chunks(DAYS_PER_COLUMN)
            .map(|column| column.to_vec())
            .collect(),
    }
}
