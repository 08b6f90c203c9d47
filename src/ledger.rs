//! Data access for the leave ledger. Business rules live in `workflow`.

use crate::model::leave_request::{LeaveEntry, LeaveRequest, LeaveStatus, LeaveType};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

const REQUEST_COLUMNS: &str = r#"
    id, employee_id, manager_id, leave_type, comment, status, application_date, decision_date
"#;

const ENTRY_SELECT: &str = r#"
    SELECT lr.id, lr.employee_id, u.name AS employee_name, lr.manager_id, lr.leave_type,
           lr.comment, lr.status, lr.application_date, lr.decision_date
    FROM leave_requests lr
    JOIN users u ON lr.employee_id = u.id
"#;

pub struct NewLeave<'a> {
    pub employee_id: i64,
    pub manager_id: i64,
    pub leave_type: LeaveType,
    pub application_date: NaiveDate,
    pub comment: &'a str,
}

/// Inserts a Waiting request unless the employee already has `limit`
/// waiting ones. The cap is part of the INSERT itself, so concurrent
/// submissions can not overshoot it.
///
/// Returns the new id and the waiting count after the insert, or `None`
/// when the cap was hit and nothing was written.
pub async fn insert_within_quota(
    pool: &SqlitePool,
    leave: NewLeave<'_>,
    limit: i64,
) -> Result<Option<(i64, i64)>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, manager_id, leave_type, comment, status, application_date)
        SELECT ?, ?, ?, ?, 'Waiting', ?
        WHERE (
            SELECT COUNT(*) FROM leave_requests
            WHERE employee_id = ? AND status = 'Waiting'
        ) < ?
        "#,
    )
    .bind(leave.employee_id)
    .bind(leave.manager_id)
    .bind(leave.leave_type)
    .bind(leave.comment)
    .bind(leave.application_date)
    .bind(leave.employee_id)
    .bind(limit)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let id = result.last_insert_rowid();

    let waiting = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM leave_requests WHERE employee_id = ? AND status = 'Waiting'",
    )
    .bind(leave.employee_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some((id, waiting)))
}

pub async fn count_waiting(pool: &SqlitePool, employee_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM leave_requests WHERE employee_id = ? AND status = 'Waiting'",
    )
    .bind(employee_id)
    .fetch_one(pool)
    .await
}

/// Moves a Waiting request routed to `manager_id` into `status` and
/// returns the row as written. `None` when no row matched; the ledger is
/// then untouched.
pub async fn decide_if_waiting(
    pool: &SqlitePool,
    id: i64,
    manager_id: i64,
    status: LeaveStatus,
    decided_at: DateTime<Utc>,
) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(&format!(
        r#"
        UPDATE leave_requests
        SET status = ?, decision_date = ?
        WHERE id = ?
        AND manager_id = ?
        AND status = 'Waiting'
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(status)
    .bind(decided_at)
    .bind(id)
    .bind(manager_id)
    .fetch_optional(pool)
    .await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_entry(pool: &SqlitePool, id: i64) -> Result<Option<LeaveEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaveEntry>(&format!("{ENTRY_SELECT} WHERE lr.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// In insertion order.
pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM leave_requests WHERE employee_id = ? ORDER BY id"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

pub async fn list_for_manager(
    pool: &SqlitePool,
    manager_id: i64,
    status: Option<LeaveStatus>,
) -> Result<Vec<LeaveEntry>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as::<_, LeaveEntry>(&format!(
                "{ENTRY_SELECT} WHERE lr.manager_id = ? AND lr.status = ? ORDER BY lr.id"
            ))
            .bind(manager_id)
            .bind(status)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, LeaveEntry>(&format!(
                "{ENTRY_SELECT} WHERE lr.manager_id = ? ORDER BY lr.id"
            ))
            .bind(manager_id)
            .fetch_all(pool)
            .await
        }
    }
}
