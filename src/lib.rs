pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use sea_orm::DatabaseConnection;
use tokio::sync::broadcast;

use domain::change_feed::ChangeEvent;

pub use config::Config;
pub use error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub changes: broadcast::Sender<ChangeEvent>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let (changes, _) = broadcast::channel(256);
        Self {
            db,
            config,
            changes,
        }
    }
}
