use crate::dates::date_key;
use crate::grid::Grid;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ulid::Ulid;

pub const DEFAULT_NAME: &str = "My habit";
pub const DEFAULT_WEEKLY_TARGET: u32 = 3;
pub const DEFAULT_MONTHLY_TARGET: u32 = 12;
pub const DEFAULT_CUSTOM_DAYS: [u8; 3] = [1, 2, 3];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl GoalKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

/// Goal configuration as it is stored. Every target field is kept regardless
/// of `goal`; only the one matching `goal` is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitSettings {
    pub name: String,
    pub goal: GoalKind,
    pub weekly_target: u32,
    pub monthly_target: u32,
    pub custom_days: Vec<u8>,
}

impl Default for HabitSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            goal: GoalKind::Daily,
            weekly_target: DEFAULT_WEEKLY_TARGET,
            monthly_target: DEFAULT_MONTHLY_TARGET,
            custom_days: DEFAULT_CUSTOM_DAYS.to_vec(),
        }
    }
}

/// Raw settings as submitted by a client, before sanitizing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsInput {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub weekly_target: Option<i64>,
    pub monthly_target: Option<i64>,
    pub custom_days: Option<Vec<i64>>,
}

/// Fields posted by the HTML form. Each weekday is its own checkbox.
#[derive(Debug, Default, Deserialize)]
pub struct HabitForm {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub weekly_target: Option<String>,
    pub monthly_target: Option<String>,
    pub day_0: Option<String>,
    pub day_1: Option<String>,
    pub day_2: Option<String>,
    pub day_3: Option<String>,
    pub day_4: Option<String>,
    pub day_5: Option<String>,
    pub day_6: Option<String>,
}

impl HabitForm {
    pub fn into_input(self) -> SettingsInput {
        let checked = [
            self.day_0, self.day_1, self.day_2, self.day_3, self.day_4, self.day_5, self.day_6,
        ];
        let custom_days = checked
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_some())
            .map(|(index, _)| index as i64)
            .collect();

        SettingsInput {
            name: self.name,
            goal: self.goal,
            weekly_target: self.weekly_target.and_then(|value| value.trim().parse().ok()),
            monthly_target: self.monthly_target.and_then(|value| value.trim().parse().ok()),
            custom_days: Some(custom_days),
        }
    }
}

impl HabitSettings {
    pub fn from_input(input: SettingsInput) -> Self {
        let name = input
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let goal = input
            .goal
            .as_deref()
            .and_then(GoalKind::parse)
            .unwrap_or_default();

        let mut custom_days = Vec::new();
        for day in input.custom_days.unwrap_or_default() {
            if (0..=6).contains(&day) && !custom_days.contains(&(day as u8)) {
                custom_days.push(day as u8);
            }
        }
        if custom_days.is_empty() {
            custom_days = DEFAULT_CUSTOM_DAYS.to_vec();
        }

        Self {
            name,
            goal,
            weekly_target: positive_or(input.weekly_target, DEFAULT_WEEKLY_TARGET),
            monthly_target: positive_or(input.monthly_target, DEFAULT_MONTHLY_TARGET),
            custom_days,
        }
    }

    /// The active goal. Stored values that break the goal's invariants fall
    /// back to the defaults.
    pub fn goal(&self) -> Goal {
        match self.goal {
            GoalKind::Daily => Goal::Daily,
            GoalKind::Weekly => Goal::Weekly {
                target: nonzero_or(self.weekly_target, DEFAULT_WEEKLY_TARGET),
            },
            GoalKind::Monthly => Goal::Monthly {
                target: nonzero_or(self.monthly_target, DEFAULT_MONTHLY_TARGET),
            },
            GoalKind::Custom => {
                let mut days: Vec<u8> = Vec::with_capacity(self.custom_days.len());
                for &day in &self.custom_days {
                    if day <= 6 && !days.contains(&day) {
                        days.push(day);
                    }
                }
                if days.is_empty() {
                    days = DEFAULT_CUSTOM_DAYS.to_vec();
                }
                Goal::Custom { days }
            }
        }
    }
}

fn positive_or(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(value) if value > 0 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => default,
    }
}

fn nonzero_or(value: u32, default: u32) -> u32 {
    if value == 0 { default } else { value }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Goal {
    Daily,
    Weekly { target: u32 },
    Monthly { target: u32 },
    /// Weekday indices (0 = Sunday) in the order the user declared them.
    Custom { days: Vec<u8> },
}

/// Per-day done flags keyed by `YYYY-MM-DD`. A missing key reads as not done.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Completions(pub BTreeMap<String, bool>);

impl Completions {
    pub fn is_done(&self, date: NaiveDate) -> bool {
        self.0.get(&date_key(date)).copied().unwrap_or(false)
    }

    /// Flips the flag for `date` and returns the new value. Un-toggled days
    /// keep their key with `false`.
    pub fn flip(&mut self, date: NaiveDate) -> bool {
        let entry = self.0.entry(date_key(date)).or_insert(false);
        *entry = !*entry;
        *entry
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Habit {
    pub id: String,
    #[serde(flatten)]
    pub settings: HabitSettings,
    #[serde(default)]
    pub completions: Completions,
}

impl Habit {
    pub fn new(settings: HabitSettings) -> Self {
        Self::with_completions(settings, Completions::default())
    }

    pub fn with_completions(settings: HabitSettings, completions: Completions) -> Self {
        Self {
            id: Ulid::new().to_string(),
            settings,
            completions,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TodayStatus {
    Done,
    Pending,
}

impl TodayStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Done => "Done",
            Self::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Fraction {
    pub done: u32,
    pub total: u32,
}

impl Fraction {
    /// `None` when no day has counted toward the goal yet.
    pub fn ratio(self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(f64::from(self.done) / f64::from(self.total))
        }
    }

    pub fn label(self) -> String {
        if self.total == 0 {
            "\u{2014}".to_string()
        } else {
            format!("{}/{}", self.done, self.total)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Progress {
    pub today: TodayStatus,
    pub fraction: Fraction,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub today: TodayStatus,
    pub done: u32,
    pub total: u32,
    pub ratio: Option<f64>,
    pub label: String,
}

impl From<Progress> for SummaryView {
    fn from(progress: Progress) -> Self {
        Self {
            today: progress.today,
            done: progress.fraction.done,
            total: progress.fraction.total,
            ratio: progress.fraction.ratio(),
            label: progress.fraction.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HabitView {
    pub habit: Habit,
    pub description: String,
    pub summary: SummaryView,
    pub grid: Grid,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub changed: bool,
    pub done: bool,
    pub view: HabitView,
}
