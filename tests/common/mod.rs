#![allow(dead_code)]

use leave_desk::auth::auth::Principal;
use leave_desk::config::Config;
use leave_desk::db::init_db;
use leave_desk::directory::create_account;
use leave_desk::model::role::Role;
use leave_desk::model::user::{NewAccount, User};
use sqlx::SqlitePool;

pub async fn memory_pool() -> SqlitePool {
    init_db("sqlite::memory:").await.unwrap()
}

/// File-backed pool with several connections, for tests that need real contention.
pub async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let url = format!("sqlite://{}", dir.path().join("leave_desk.db").display());
    init_db(&url).await.unwrap()
}

pub async fn manager(pool: &SqlitePool, name: &str) -> User {
    create_account(
        pool,
        NewAccount {
            name: name.to_string(),
            email: format!("{}@company.com", name.to_lowercase()),
            password: format!("{name}-pw"),
            role: Role::Manager,
            manager_id: None,
        },
    )
    .await
    .unwrap()
}

pub async fn employee(pool: &SqlitePool, name: &str, manager: &User) -> User {
    create_account(
        pool,
        NewAccount {
            name: name.to_string(),
            email: format!("{}@company.com", name.to_lowercase()),
            password: format!("{name}-pw"),
            role: Role::Employee,
            manager_id: Some(manager.id),
        },
    )
    .await
    .unwrap()
}

pub fn principal(user: &User) -> Principal {
    Principal {
        user_id: user.id,
        username: user.name.clone(),
        role: user.role,
    }
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-secret".into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_ttl: 600,
        rate_login_per_min: 10_000,
        rate_register_per_min: 10_000,
        rate_protected_per_min: 10_000,
        api_prefix: "/api".into(),
        log_dir: "logs".into(),
    }
}
