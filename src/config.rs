use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

pub const ADMIN_USER_ENV: &str = "POSTBOARD_ADMIN_USER";
pub const ADMIN_PASSWORD_HASH_ENV: &str = "POSTBOARD_ADMIN_PASSWORD_HASH";

#[derive(Parser, Debug)]
#[command(name = "postboard", about = "A small content board")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Path to the SQLite database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a bcrypt hash suitable for `auth.admin_password_hash`
    HashPassword { password: String },
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub board: BoardConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: bool,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_username: String,
    /// bcrypt hash; login is disabled while unset
    pub admin_password_hash: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BoardConfig {
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password_hash: None,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "PAA Pages".to_string(),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::load_with_env(cli, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with an injectable environment lookup.
    pub fn load_with_env(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env(env);

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref db) = cli.db {
            config.database.path = Some(db.clone());
        }

        if config.database.path.is_none() {
            config.database.path = Some(data_dir.join("posts.db"));
        }

        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(user) = env(ADMIN_USER_ENV).filter(|v| !v.is_empty()) {
            self.auth.admin_username = user;
        }
        if let Some(hash) = env(ADMIN_PASSWORD_HASH_ENV).filter(|v| !v.is_empty()) {
            self.auth.admin_password_hash = Some(hash);
        }
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(".postboard"))
                .unwrap_or_else(|| PathBuf::from(".postboard"))
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from("posts.db"))
    }
}
