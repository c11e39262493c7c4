use std::future::Future;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, DbErr, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace, warn};

use super::{DbKind, RuntimeEnv};
use crate::config::db::{db_url, sanitize_db_url, ConnectionSettings, DbSettings};
use crate::error::AppError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays.
/// Returns the last error once all attempts are used.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(
                    "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                    attempt, max_attempts, interval_ms
                );
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Ordered session-level statements run on every new connection.
fn build_session_statements(settings: &DbSettings) -> Vec<String> {
    match settings {
        DbSettings::Sqlite { busy_timeout_ms } => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {busy_timeout_ms};"),
        ],
        DbSettings::Postgres {
            app_name,
            statement_timeout,
            idle_in_transaction_timeout,
        } => vec![
            format!("SET application_name = '{}';", app_name.replace('\'', "''")),
            "SET timezone = 'UTC';".to_string(),
            format!("SET statement_timeout = '{statement_timeout}';"),
            format!("SET idle_in_transaction_session_timeout = '{idle_in_transaction_timeout}';"),
        ],
    }
}

async fn apply_sqlite_config(
    conn: &mut sqlx::SqliteConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

async fn apply_postgres_config(
    conn: &mut sqlx::PgConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Build the application pool with per-connection session settings.
/// Does not run migrations.
pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
    pool_cfg: &ConnectionSettings,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, db_kind)?;
    let db_settings = pool_cfg.db_settings.clone();

    match db_kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
                .create_if_missing(true);

            let pool: SqlitePool = SqlitePoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                // in-memory contents live only as long as the connection
                .idle_timeout(None)
                .max_lifetime(None)
                .after_connect(move |conn, _meta| {
                    let settings = db_settings.clone();
                    Box::pin(async move {
                        apply_sqlite_config(conn, &settings).await?;
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config(format!("failed to create SQLite pool: {e}")))?;

            info!(
                "pool=create engine=sqlite path={} min={} max={}",
                url, pool_cfg.pool_min, pool_cfg.pool_max
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbKind::Postgres => {
            let sqlx_pool = retry_connection(
                || {
                    let url = url.clone();
                    let settings = db_settings.clone();
                    async move {
                        PgPoolOptions::new()
                            .min_connections(pool_cfg.pool_min)
                            .max_connections(pool_cfg.pool_max)
                            .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                            .idle_timeout(Duration::from_secs(30))
                            .after_connect(move |conn, _meta| {
                                let settings = settings.clone();
                                Box::pin(async move {
                                    apply_postgres_config(conn, &settings).await?;
                                    Ok::<_, sqlx::Error>(())
                                })
                            })
                            .connect(&url)
                            .await
                            .map_err(|e| {
                                AppError::db_unavailable(format!("failed to connect to Postgres: {e}"))
                            })
                    }
                },
                5,
                500,
            )
            .await?;

            info!(
                "pool=create engine=postgres url={} min={} max={}",
                sanitize_db_url(&url),
                pool_cfg.pool_min,
                pool_cfg.pool_max
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
        }
    }
}

/// True when every known migration is already applied.
async fn fast_path_schema_check(conn: &DatabaseConnection) -> Result<bool, AppError> {
    let expected_count = Migrator::migrations().len();
    let expected_last = Migrator::migrations()
        .last()
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    let applied = match Migrator::get_applied_migrations(conn).await {
        Ok(applied) => applied,
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => return Err(AppError::from(e)),
    };

    let current_last = applied.last().map(|m| m.name().to_string());
    let up_to_date =
        applied.len() == expected_count && current_last.as_deref() == Some(expected_last.as_str());
    trace!(
        fastpath = if up_to_date { "hit" } else { "miss" },
        applied_count = applied.len(),
        expected_count
    );
    Ok(up_to_date)
}

/// Connect the application database and bring its schema up to date.
///
/// For `SqliteMemory` the migration must run on the returned pool itself,
/// since each connection is its own database; the pool is capped at one
/// connection for that reason.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    info!(
        "bootstrap=start env={:?} db_kind={:?} engine={} pid={}",
        env,
        db_kind,
        get_db_engine(db_kind),
        process::id()
    );

    let conn = build_pool(env, db_kind, &ConnectionSettings::for_kind(db_kind)).await?;

    if fast_path_schema_check(&conn).await? {
        info!("migrate=skipped up_to_date=true");
    } else {
        migrate(&conn, MigrationCommand::Up).await?;
        info!("migrate=done");
    }

    info!("bootstrap=ready");
    Ok(conn)
}

/// Run an arbitrary migration command; used by the migration CLI.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), AppError> {
    let conn = build_pool(env, db_kind, &ConnectionSettings::for_kind(db_kind)).await?;
    info!(
        "migrate=start env={:?} db_kind={:?} command={:?}",
        env, db_kind, command
    );
    migrate(&conn, command).await?;
    info!("migrate=done");
    Ok(())
}
