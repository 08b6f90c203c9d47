use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        name          TEXT NOT NULL UNIQUE,
        email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL CHECK (role IN ('Employee', 'Manager')),
        manager_id    INTEGER REFERENCES users(id),
        created_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        CHECK ((role = 'Employee') = (manager_id IS NOT NULL))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS credentials (
        username      TEXT PRIMARY KEY,
        email         TEXT NOT NULL,
        name          TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL CHECK (role IN ('Employee', 'Manager'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_requests (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id      INTEGER NOT NULL REFERENCES users(id),
        manager_id       INTEGER NOT NULL REFERENCES users(id),
        leave_type       TEXT NOT NULL CHECK (leave_type IN ('Personal', 'Sick', 'Official')),
        comment          TEXT NOT NULL DEFAULT '',
        status           TEXT NOT NULL DEFAULT 'Waiting'
                         CHECK (status IN ('Waiting', 'Approved', 'Rejected')),
        application_date TEXT NOT NULL,
        decision_date    TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_leave_employee_status ON leave_requests (employee_id, status)",
    "CREATE INDEX IF NOT EXISTS idx_leave_manager_status ON leave_requests (manager_id, status)",
];

/// Opens the pool and makes sure the schema exists.
///
/// In-memory URLs get a single, never-recycled connection: every new
/// SQLite connection to `:memory:` would otherwise see an empty database.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?
    };

    create_tables(&pool).await?;
    Ok(pool)
}

pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("schema ready");
    Ok(())
}
