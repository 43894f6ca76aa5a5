use crate::dates::parse_date_key;
use crate::grid::DEFAULT_GRID_DAYS;
use chrono::{Local, NaiveDate};
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";
const MAX_GRID_DAYS: usize = 730;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub clock: Clock,
    pub grid_days: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_dir = lookup("APP_DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let grid_days = match lookup("APP_GRID_DAYS") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(days) if (1..=MAX_GRID_DAYS).contains(&days) => days,
                _ => {
                    warn!("ignoring APP_GRID_DAYS={value:?}: expected 1..={MAX_GRID_DAYS}");
                    DEFAULT_GRID_DAYS
                }
            },
            None => DEFAULT_GRID_DAYS,
        };

        let clock = match lookup("APP_TODAY") {
            Some(value) => match parse_date_key(&value) {
                Some(date) => Clock::Fixed(date),
                None => {
                    warn!("ignoring APP_TODAY={value:?}: expected YYYY-MM-DD");
                    Clock::Local
                }
            },
            None => Clock::Local,
        };

        Self {
            port,
            data_dir,
            clock,
            grid_days,
        }
    }
}

/// Source of "today" at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Local,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Fixed(date) => *date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.grid_days, 84);
        assert_eq!(config.clock, Clock::Local);
    }

    #[test]
    fn fixed_today_pins_the_clock() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("APP_DATA_DIR", "/tmp/habits"),
            ("APP_TODAY", "2024-01-10"),
            ("APP_GRID_DAYS", "30"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/habits"));
        assert_eq!(config.grid_days, 30);
        assert_eq!(
            config.clock.today(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn grid_days_outside_bounds_use_default() {
        for value in ["0", "731", "200000000", "-5"] {
            assert_eq!(config_from(&[("APP_GRID_DAYS", value)]).grid_days, 84);
        }
        assert_eq!(config_from(&[("APP_GRID_DAYS", "730")]).grid_days, 730);
    }

    #[test]
    fn garbage_values_fall_back() {
        let config = config_from(&[("PORT", "http"), ("APP_TODAY", "soon")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.clock, Clock::Local);
    }
}
