use crate::errors::AppError;
use crate::models::{Completions, Habit, HabitSettings};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub const HABITS_KEY: &str = "habits";
pub const SETTINGS_KEY: &str = "settings";
pub const COMPLETIONS_KEY: &str = "completions";

/// Key-value store keeping one JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Raw blob for `key`. Read failures are logged and reported as absent.
    pub async fn load(&self, key: &str) -> Option<Vec<u8>> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Some(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read {key} from store: {err}");
                None
            }
        }
    }

    pub async fn save(&self, key: &str, blob: &[u8]) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.path_for(key), blob).await?;
        Ok(())
    }

    pub async fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.load(key).await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("discarding malformed {key} data: {err}");
                None
            }
        }
    }

    pub async fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(value)?;
        self.save(key, &payload).await
    }
}

/// The habit collection, seeded from the single-habit layout when only that
/// exists, otherwise a single default habit.
pub async fn load_habits(store: &FileStore) -> Vec<Habit> {
    if let Some(entries) = store.load_json::<Vec<serde_json::Value>>(HABITS_KEY).await {
        let total = entries.len();
        let habits: Vec<Habit> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if habits.len() < total {
            error!("skipped {} malformed of {total} stored habits", total - habits.len());
        }
        if !habits.is_empty() || total == 0 {
            return habits;
        }
    }

    if let Some(settings) = store.load_json::<HabitSettings>(SETTINGS_KEY).await {
        info!("importing single-habit data as \"{}\"", settings.name);
        let completions = load_completions(store).await;
        return vec![Habit::with_completions(settings, completions)];
    }

    vec![Habit::new(HabitSettings::default())]
}

pub async fn persist_habits(store: &FileStore, habits: &[Habit]) -> Result<(), AppError> {
    store.save_json(HABITS_KEY, &habits).await
}

pub async fn load_settings(store: &FileStore) -> HabitSettings {
    store.load_json(SETTINGS_KEY).await.unwrap_or_default()
}

pub async fn save_settings(store: &FileStore, settings: &HabitSettings) -> Result<(), AppError> {
    store.save_json(SETTINGS_KEY, settings).await
}

pub async fn load_completions(store: &FileStore) -> Completions {
    store.load_json(COMPLETIONS_KEY).await.unwrap_or_default()
}

pub async fn save_completions(store: &FileStore, completions: &Completions) -> Result<(), AppError> {
    store.save_json(COMPLETIONS_KEY, completions).await
}
