use crate::dates::{month_start, week_start, weekday_index, weekday_label, DateRange};
use crate::models::{Completions, Fraction, Goal, Habit, Progress, TodayStatus};
use chrono::NaiveDate;

pub fn is_target_date(date: NaiveDate, goal: &Goal) -> bool {
    match goal {
        Goal::Custom { days } => days.contains(&weekday_index(date)),
        _ => true,
    }
}

pub fn describe_goal(goal: &Goal) -> String {
    match goal {
        Goal::Daily => "Daily goal: check in every day.".to_string(),
        Goal::Weekly { target } => format!("Weekly goal: {target} days per week."),
        Goal::Monthly { target } => format!("Monthly goal: {target} days per month."),
        Goal::Custom { days } => {
            let labels: Vec<&str> = days.iter().map(|&day| weekday_label(day)).collect();
            format!("Specific days: {}.", labels.join(", "))
        }
    }
}

/// Today's status plus done/total for the goal's current period. Every
/// window ends at `today` and always contains it.
pub fn calculate_progress(goal: &Goal, completions: &Completions, today: NaiveDate) -> Progress {
    let today_done = completions.is_done(today);
    let status = if today_done {
        TodayStatus::Done
    } else {
        TodayStatus::Pending
    };

    let fraction = match goal {
        Goal::Daily => Fraction {
            done: u32::from(today_done),
            total: 1,
        },
        Goal::Weekly { target } => Fraction {
            done: count_done(DateRange::new(week_start(today), today), completions, goal),
            total: *target,
        },
        Goal::Monthly { target } => Fraction {
            done: count_done(DateRange::new(month_start(today), today), completions, goal),
            total: *target,
        },
        Goal::Custom { .. } => {
            let window = DateRange::new(week_start(today), today);
            Fraction {
                done: count_done(window, completions, goal),
                total: window.iter().filter(|date| is_target_date(*date, goal)).count() as u32,
            }
        }
    };

    Progress {
        today: status,
        fraction,
    }
}

fn count_done(window: DateRange, completions: &Completions, goal: &Goal) -> u32 {
    window
        .iter()
        .filter(|date| is_target_date(*date, goal) && completions.is_done(*date))
        .count() as u32
}

/// Flips `date` for the habit when it is a target day and returns the new
/// flag. Non-target days are left untouched and yield `None`; callers must
/// not persist in that case.
pub fn toggle_completion(habit: &mut Habit, date: NaiveDate) -> Option<bool> {
    if !is_target_date(date, &habit.settings.goal()) {
        return None;
    }
    Some(habit.completions.flip(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::date_key;
    use crate::models::{GoalKind, HabitSettings};
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn done_on(dates: &[NaiveDate]) -> Completions {
        let mut completions = Completions::default();
        for date in dates {
            completions.0.insert(date_key(*date), true);
        }
        completions
    }

    fn custom(days: &[u8]) -> Goal {
        Goal::Custom {
            days: days.to_vec(),
        }
    }

    #[test]
    fn only_custom_goals_filter_days() {
        let goals = [
            Goal::Daily,
            Goal::Weekly { target: 3 },
            Goal::Monthly { target: 12 },
        ];
        let start = day(2024, 1, 1);
        for offset in 0..14 {
            let date = start + Duration::days(offset);
            for goal in &goals {
                assert!(is_target_date(date, goal));
            }
            let goal = custom(&[1, 3, 5]);
            assert_eq!(
                is_target_date(date, &goal),
                [1, 3, 5].contains(&weekday_index(date))
            );
        }
    }

    #[test]
    fn daily_progress_mirrors_today() {
        let today = day(2024, 1, 10);
        let pending = calculate_progress(&Goal::Daily, &done_on(&[today - Duration::days(1)]), today);
        assert_eq!(pending.today, TodayStatus::Pending);
        assert_eq!(pending.fraction, Fraction { done: 0, total: 1 });

        let done = calculate_progress(&Goal::Daily, &done_on(&[today]), today);
        assert_eq!(done.today, TodayStatus::Done);
        assert_eq!(done.fraction, Fraction { done: 1, total: 1 });
    }

    #[test]
    fn weekly_counts_done_days_since_sunday() {
        // Wednesday; the week started on Sunday 2024-01-07.
        let today = day(2024, 1, 10);
        let completions = done_on(&[day(2024, 1, 6), day(2024, 1, 8), day(2024, 1, 9)]);
        let progress = calculate_progress(&Goal::Weekly { target: 3 }, &completions, today);
        assert_eq!(progress.fraction.label(), "2/3");
        assert_eq!(progress.today, TodayStatus::Pending);
    }

    #[test]
    fn weekly_target_is_not_clamped_to_window() {
        let today = day(2024, 1, 7);
        let progress = calculate_progress(&Goal::Weekly { target: 5 }, &done_on(&[today]), today);
        assert_eq!(progress.fraction, Fraction { done: 1, total: 5 });
    }

    #[test]
    fn monthly_counts_from_first_of_month() {
        let today = day(2024, 3, 3);
        let completions = done_on(&[day(2024, 2, 29), day(2024, 3, 1), day(2024, 3, 3)]);
        let progress = calculate_progress(&Goal::Monthly { target: 12 }, &completions, today);
        assert_eq!(progress.fraction, Fraction { done: 2, total: 12 });
        assert_eq!(progress.today, TodayStatus::Done);
    }

    #[test]
    fn custom_counts_only_elapsed_target_days() {
        // Tuesday 2024-01-09: only Monday has elapsed among Mon/Wed/Fri.
        let today = day(2024, 1, 9);
        let completions = done_on(&[day(2024, 1, 7), day(2024, 1, 8), today]);
        let progress = calculate_progress(&custom(&[1, 3, 5]), &completions, today);
        assert_eq!(progress.fraction, Fraction { done: 1, total: 1 });
        assert_eq!(progress.today, TodayStatus::Done);
    }

    #[test]
    fn custom_before_first_target_day_has_empty_fraction() {
        let today = day(2024, 1, 7);
        let progress = calculate_progress(&custom(&[1, 3, 5]), &Completions::default(), today);
        assert_eq!(progress.fraction, Fraction { done: 0, total: 0 });
        assert_eq!(progress.fraction.ratio(), None);
    }

    #[test]
    fn descriptions_keep_declared_day_order() {
        assert_eq!(describe_goal(&Goal::Daily), "Daily goal: check in every day.");
        assert_eq!(
            describe_goal(&Goal::Weekly { target: 4 }),
            "Weekly goal: 4 days per week."
        );
        assert_eq!(
            describe_goal(&Goal::Monthly { target: 10 }),
            "Monthly goal: 10 days per month."
        );
        assert_eq!(describe_goal(&custom(&[5, 1, 3])), "Specific days: Fri, Mon, Wed.");
    }

    #[test]
    fn toggle_skips_non_target_days() {
        let mut habit = Habit::new(HabitSettings {
            goal: GoalKind::Custom,
            custom_days: vec![1, 3, 5],
            ..HabitSettings::default()
        });
        habit.completions.0.insert("2024-01-08".into(), true);
        let before = habit.completions.clone();

        assert_eq!(toggle_completion(&mut habit, day(2024, 1, 9)), None);
        assert_eq!(habit.completions, before);
    }

    #[test]
    fn toggle_flips_exactly_one_entry() {
        let mut habit = Habit::new(HabitSettings::default());
        habit.completions.0.insert("2024-01-08".into(), true);
        habit.completions.0.insert("2024-01-09".into(), false);

        assert_eq!(toggle_completion(&mut habit, day(2024, 1, 9)), Some(true));
        assert_eq!(habit.completions.0.len(), 2);
        assert_eq!(habit.completions.0.get("2024-01-08"), Some(&true));
        assert_eq!(habit.completions.0.get("2024-01-09"), Some(&true));
    }
}
