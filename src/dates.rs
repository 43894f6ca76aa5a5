use chrono::{Datelike, Days, Duration, NaiveDate};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Inclusive span of calendar days. Empty when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` consecutive days ending at `end`, inclusive. Ranges that
    /// would start before the earliest representable date begin there instead.
    pub fn ending_at(end: NaiveDate, days: usize) -> Self {
        if days == 0 {
            return Self::empty();
        }
        let start = end
            .checked_sub_days(Days::new(days as u64 - 1))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self {
            start: NaiveDate::MAX,
            end: NaiveDate::MIN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let start = self.start;
        (0..self.len()).map(move |offset| start + Duration::days(offset as i64))
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

/// Most recent Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Weekday index with 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn weekday_label(index: u8) -> &'static str {
    WEEKDAY_LABELS.get(index as usize).copied().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_ending_at_counts_back_inclusive() {
        let range = DateRange::ending_at(day(2024, 3, 2), 3);
        let days: Vec<_> = range.iter().collect();
        assert_eq!(days, vec![day(2024, 2, 29), day(2024, 3, 1), day(2024, 3, 2)]);
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn zero_length_range_is_empty() {
        let range = DateRange::ending_at(day(2024, 3, 2), 0);
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
        assert!(!range.contains(day(2024, 3, 2)));
    }

    #[test]
    fn oversized_range_clamps_to_earliest_date() {
        let end = day(2024, 1, 10);
        let range = DateRange::ending_at(end, usize::MAX);
        assert_eq!(range.start, NaiveDate::MIN);
        assert_eq!(range.end, end);
        assert!(range.contains(day(1, 1, 1)));
    }

    #[test]
    fn single_day_range_contains_only_that_day() {
        let today = day(2024, 1, 7);
        let range = DateRange::new(week_start(today), today);
        assert_eq!(range.len(), 1);
        assert!(range.contains(today));
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-01-10 is a Wednesday.
        assert_eq!(week_start(day(2024, 1, 10)), day(2024, 1, 7));
        assert_eq!(week_start(day(2024, 1, 7)), day(2024, 1, 7));
        assert_eq!(week_start(day(2024, 1, 6)), day(2023, 12, 31));
    }

    #[test]
    fn month_start_handles_first_and_last_day() {
        assert_eq!(month_start(day(2024, 2, 29)), day(2024, 2, 1));
        assert_eq!(month_start(day(2024, 2, 1)), day(2024, 2, 1));
    }

    #[test]
    fn date_key_round_trips() {
        let date = day(2024, 1, 2);
        assert_eq!(date_key(date), "2024-01-02");
        assert_eq!(parse_date_key("2024-01-02"), Some(date));
        assert_eq!(parse_date_key("2024-13-02"), None);
        assert_eq!(parse_date_key("yesterday"), None);
    }

    #[test]
    fn weekday_labels_follow_sunday_index() {
        assert_eq!(weekday_index(day(2024, 1, 7)), 0);
        assert_eq!(weekday_index(day(2024, 1, 13)), 6);
        assert_eq!(weekday_label(1), "Mon");
        assert_eq!(weekday_label(9), "?");
    }
}
