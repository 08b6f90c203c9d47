//! User directory and credential store.
//!
//! Both live in the same database. Signup writes the two rows inside one
//! transaction so the stores can not drift apart.

use crate::auth::password::hash_password;
use crate::error::{LeaveError, LeaveResult};
use crate::model::user::{Credential, ManagerSummary, NewAccount, User};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

fn validate(account: &NewAccount) -> LeaveResult<()> {
    if account.name.trim().is_empty()
        || account.email.trim().is_empty()
        || account.password.is_empty()
    {
        return Err(LeaveError::Validation(
            "Name, email and password must not be empty".into(),
        ));
    }

    if !account.email.contains('@') {
        return Err(LeaveError::Validation("Email address is not valid".into()));
    }

    match (account.role.requires_manager(), account.manager_id) {
        (true, None) => Err(LeaveError::Validation(
            "Please select your manager".into(),
        )),
        (false, Some(_)) => Err(LeaveError::Validation(
            "Managers can not have a manager".into(),
        )),
        _ => Ok(()),
    }
}

fn map_unique_violation(e: sqlx::Error) -> LeaveError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            // "UNIQUE constraint failed: users.email"
            if db_err.message().contains("email") {
                return LeaveError::DuplicateEmail;
            }
            return LeaveError::UsernameTaken;
        }
    }
    LeaveError::Storage(e)
}

/// Creates the directory row and the credential entry, or neither.
#[instrument(name = "create_account", skip(pool, account), fields(username = %account.name.trim(), role = %account.role))]
pub async fn create_account(pool: &SqlitePool, account: NewAccount) -> LeaveResult<User> {
    validate(&account)?;

    let name = account.name.trim().to_string();
    let email = account.email.trim().to_lowercase();
    let password_hash = hash_password(&account.password)?;

    let mut tx = pool.begin().await?;

    // The first statement writes, so a concurrent signup waits on the busy
    // timeout instead of failing a SHARED to RESERVED upgrade.
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash, role, manager_id)
        SELECT ?, ?, ?, ?, ?
        WHERE ? IS NULL
        OR EXISTS (SELECT 1 FROM users WHERE id = ? AND role = 'Manager')
        "#,
    )
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .bind(account.role)
    .bind(account.manager_id)
    .bind(account.manager_id)
    .bind(account.manager_id)
    .execute(&mut *tx)
    .await
    .map_err(map_unique_violation)?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        let manager_id = account.manager_id.unwrap_or_default();
        return Err(LeaveError::Validation(format!(
            "User {manager_id} is not a manager"
        )));
    }

    let id = result.last_insert_rowid();

    sqlx::query(
        r#"
        INSERT INTO credentials (username, email, name, password_hash, role)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&name)
    .bind(&email)
    .bind(&name)
    .bind(&password_hash)
    .bind(account.role)
    .execute(&mut *tx)
    .await
    .map_err(map_unique_violation)?;

    tx.commit().await?;

    info!(user_id = id, "account created");

    Ok(User {
        id,
        name,
        email,
        password_hash,
        role: account.role,
        manager_id: account.manager_id,
    })
}

pub async fn find_user(pool: &SqlitePool, id: i64) -> LeaveResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, role, manager_id FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_user_by_name(pool: &SqlitePool, name: &str) -> LeaveResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, role, manager_id FROM users WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_credential(pool: &SqlitePool, username: &str) -> LeaveResult<Option<Credential>> {
    debug!(username, "credential lookup");
    let credential = sqlx::query_as::<_, Credential>(
        "SELECT username, email, name, password_hash, role FROM credentials WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(credential)
}

/// Read on every call; signup must see managers created a moment ago.
pub async fn list_managers(pool: &SqlitePool) -> LeaveResult<Vec<ManagerSummary>> {
    let managers = sqlx::query_as::<_, ManagerSummary>(
        "SELECT id, name FROM users WHERE role = 'Manager' ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(managers)
}
