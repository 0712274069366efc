use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::{str::FromStr, sync::Arc, time::Duration};

pub mod cart;
pub mod order;
pub mod plant;
pub mod user;

pub mod models {
    pub mod cart;
    pub mod order;
    pub mod plant;
    pub mod user;
}

pub mod dtos {
    pub mod cart;
    pub mod order;
    pub mod user;
}

/// Opens (creating if needed) the database at `database_url` and runs pending migrations.
pub async fn setup(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<SqlitePool>, Box<dyn std::error::Error>> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    connect(options, max_connections).await
}

/// Builds a pool from explicit options and runs pending migrations.
///
/// The migration history table makes this idempotent: the schema is created and the plant
/// catalog seeded exactly once per database.
pub async fn connect(
    options: SqliteConnectOptions,
    max_connections: u32,
) -> Result<Arc<SqlitePool>, Box<dyn std::error::Error>> {
    let options = options
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    // in-memory databases live as long as their connection, so never recycle it
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(Arc::new(pool))
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::str::FromStr;

    use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

    use crate::{dtos::user::UserCreateRequest, user};

    pub async fn memory_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = crate::connect(options, 1).await.unwrap();
        (*pool).clone()
    }

    pub async fn insert_test_user(pool: &SqlitePool, email: &str) -> i64 {
        user::insert_user(
            pool,
            UserCreateRequest {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
            },
        )
        .await
        .unwrap()
        .id
    }
}
