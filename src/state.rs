use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, hashing::PasswordHashing};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub hasher: Arc<dyn PasswordHashing>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig, hasher: Arc<dyn PasswordHashing>) -> Self {
        Self {
            orm,
            config: Arc::new(config),
            hasher,
        }
    }
}
