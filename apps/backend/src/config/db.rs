use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Which database profile the process runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces the `_test` naming rule so tests never touch real data
    Test,
}

/// Database engine and storage flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// One shared in-process connection; contents vanish with the pool
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unknown database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

/// Per-engine session settings applied on every new connection.
#[derive(Debug, Clone, PartialEq)]
pub enum DbSettings {
    Sqlite {
        busy_timeout_ms: u32,
    },
    Postgres {
        app_name: String,
        statement_timeout: String,
        idle_in_transaction_timeout: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
    pub db_settings: DbSettings,
}

impl ConnectionSettings {
    pub fn for_kind(db_kind: DbKind) -> Self {
        match db_kind {
            DbKind::Postgres => Self {
                pool_min: 1,
                pool_max: 10,
                acquire_timeout_ms: 5_000,
                db_settings: DbSettings::Postgres {
                    app_name: "klondike-backend".to_string(),
                    statement_timeout: "15s".to_string(),
                    idle_in_transaction_timeout: "60s".to_string(),
                },
            },
            DbKind::SqliteFile => Self {
                pool_min: 1,
                pool_max: 4,
                acquire_timeout_ms: 5_000,
                db_settings: DbSettings::Sqlite {
                    busy_timeout_ms: 5_000,
                },
            },
            // every connection to :memory: is a separate database
            DbKind::SqliteMemory => Self {
                pool_min: 1,
                pool_max: 1,
                acquire_timeout_ms: 5_000,
                db_settings: DbSettings::Sqlite {
                    busy_timeout_ms: 1_000,
                },
            },
        }
    }
}

/// Builds the connection URL for `env` and `db_kind` from the environment.
pub fn db_url(env: RuntimeEnv, db_kind: DbKind) -> Result<String, AppError> {
    match db_kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(env)?;
            let username = must_var("APP_DB_USER")?;
            let password = must_var("APP_DB_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = must_var("SQLITE_DB_PATH")?;
            if env == RuntimeEnv::Test && !path.contains("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires SQLITE_DB_PATH to contain '_test', but got: '{path}'"
                )));
            }
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn db_name(env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

/// Get required environment variable or return error
pub fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Strip the password from a connection URL for logging.
pub fn sanitize_db_url(url: &str) -> String {
    match url.split_once('@') {
        Some((auth, host)) => match auth.rfind(':') {
            Some(colon) if auth[..colon].contains("//") => {
                format!("{}:***@{host}", &auth[..colon])
            }
            _ => url.to_string(),
        },
        None => url.to_string(),
    }
}
