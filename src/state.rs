use crate::config::Clock;
use crate::models::Habit;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: FileStore,
    pub clock: Clock,
    pub grid_days: usize,
    pub habits: Arc<Mutex<Vec<Habit>>>,
}

impl AppState {
    pub fn new(store: FileStore, clock: Clock, grid_days: usize, habits: Vec<Habit>) -> Self {
        Self {
            store,
            clock,
            grid_days,
            habits: Arc::new(Mutex::new(habits)),
        }
    }
}
