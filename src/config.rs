use anyhow::Context;
use sqlx::ConnectOptions;
use sqlx::mysql::MySqlConnectOptions;
use std::str::FromStr;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug)]
pub struct Config {
    database_url: String,
    db_max_connections: u32,
    server_port: u16,
}

impl Config {
    /// Loads configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    ///
    /// `DATABASE_URL` takes precedence; otherwise a MySQL URL is assembled from
    /// `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_DATABASE`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => mysql_url(&lookup)?,
        };
        let db_max_connections =
            load_var_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let server_port = load_var_or(&lookup, "PORT", DEFAULT_SERVER_PORT)?;
        Ok(Self {
            database_url,
            db_max_connections,
            server_port,
        })
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    #[must_use]
    pub const fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    #[must_use]
    pub const fn server_port(&self) -> u16 {
        self.server_port
    }
}

fn mysql_url<F>(lookup: &F) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let host: String = load_var(lookup, "DB_HOST")?;
    let port = load_var_or(lookup, "DB_PORT", DEFAULT_DB_PORT)?;
    let user: String = load_var(lookup, "DB_USER")?;
    let password = lookup("DB_PASSWORD").unwrap_or_default();
    let database: String = load_var(lookup, "DB_DATABASE")?;

    let opts = MySqlConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .password(&password)
        .database(&database);
    Ok(opts.to_url_lossy().to_string())
}

fn load_var<F, T>(lookup: &F, key: &str) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let val = lookup(key).with_context(|| format!("Failed to load environment variable {key}"))?;
    val.parse::<T>()
        .with_context(|| format!("Failed to parse environment variable {key}"))
}

fn load_var_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(_) => load_var(lookup, key),
        None => Ok(default),
    }
}
