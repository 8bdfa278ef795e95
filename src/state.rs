use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tokio::sync::Mutex;

use crate::auth::credentials::AdminCredentials;
use crate::auth::session::SessionStore;
use crate::config::Config;
use crate::db::posts::{PostRepository, SqlitePostRepository};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub credentials: Arc<AdminCredentials>,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            posts: Arc::new(SqlitePostRepository::new(pool)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
            credentials: Arc::new(AdminCredentials::from_config(&config.auth)),
            config,
        }
    }
}
