pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod goal;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::{Clock, Config};
pub use state::AppState;
pub use storage::{load_habits, FileStore};
