//! Leave-request lifecycle: submission under a quota, one-shot manager
//! decisions, and the role-scoped read paths.

use crate::auth::auth::Principal;
use crate::directory;
use crate::error::{LeaveError, LeaveResult};
use crate::ledger::{self, NewLeave};
use crate::model::leave_request::{Decision, LeaveEntry, LeaveRequest, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::model::user::ManagerSummary;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{info, instrument};

/// Waiting requests one employee may have open at once.
pub const MAX_WAITING_REQUESTS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub id: i64,
    pub remaining_quota: i64,
}

#[instrument(skip(pool, comment))]
pub async fn submit_leave(
    pool: &SqlitePool,
    employee_id: i64,
    leave_type: LeaveType,
    application_date: NaiveDate,
    comment: &str,
) -> LeaveResult<Submission> {
    let employee = directory::find_user(pool, employee_id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("User {employee_id}")))?;

    if employee.role != Role::Employee {
        return Err(LeaveError::Forbidden("Only employees can apply for leave".into()));
    }

    let manager_id = employee
        .manager_id
        .ok_or_else(|| LeaveError::Validation("Employee has no manager of record".into()))?;

    let leave = NewLeave {
        employee_id,
        manager_id,
        leave_type,
        application_date,
        comment,
    };

    match ledger::insert_within_quota(pool, leave, MAX_WAITING_REQUESTS).await? {
        Some((id, waiting)) => {
            info!(leave_id = id, manager_id, "leave request submitted");
            Ok(Submission {
                id,
                remaining_quota: MAX_WAITING_REQUESTS - waiting,
            })
        }
        None => {
            info!("leave quota exhausted");
            Err(LeaveError::QuotaExceeded {
                limit: MAX_WAITING_REQUESTS,
            })
        }
    }
}

/// Applies a manager's decision to a Waiting request.
///
/// The status check, the write and the returned row are one conditional
/// UPDATE. When it matches nothing, the row is read back only to say why.
#[instrument(skip(pool, acting_manager), fields(manager_id = acting_manager.user_id))]
pub async fn decide_leave(
    pool: &SqlitePool,
    request_id: i64,
    decision: Decision,
    acting_manager: &Principal,
) -> LeaveResult<LeaveRequest> {
    acting_manager.require_manager()?;

    let status = LeaveStatus::from(decision);
    let decided = ledger::decide_if_waiting(
        pool,
        request_id,
        acting_manager.user_id,
        status,
        Utc::now(),
    )
    .await?;

    if let Some(request) = decided {
        info!(leave_id = request_id, %status, "leave request decided");
        return Ok(request);
    }

    let current = ledger::find(pool, request_id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("Leave request {request_id}")))?;

    if current.manager_id != acting_manager.user_id {
        return Err(LeaveError::Forbidden(
            "This leave request is routed to another manager".into(),
        ));
    }

    if current.status.is_terminal() {
        return Err(LeaveError::AlreadyDecided { id: request_id });
    }

    Err(LeaveError::Internal(format!(
        "decision on leave request {request_id} matched no row"
    )))
}

pub async fn list_own_requests(pool: &SqlitePool, employee_id: i64) -> LeaveResult<Vec<LeaveRequest>> {
    Ok(ledger::list_for_employee(pool, employee_id).await?)
}

pub async fn list_pending_for_manager(pool: &SqlitePool, manager_id: i64) -> LeaveResult<Vec<LeaveEntry>> {
    Ok(ledger::list_for_manager(pool, manager_id, Some(LeaveStatus::Waiting)).await?)
}

pub async fn list_history_for_manager(pool: &SqlitePool, manager_id: i64) -> LeaveResult<Vec<LeaveEntry>> {
    Ok(ledger::list_for_manager(pool, manager_id, None).await?)
}

pub async fn list_managers(pool: &SqlitePool) -> LeaveResult<Vec<ManagerSummary>> {
    directory::list_managers(pool).await
}

/// Waiting requests the employee can still open.
pub async fn remaining_quota(pool: &SqlitePool, employee_id: i64) -> LeaveResult<i64> {
    let waiting = ledger::count_waiting(pool, employee_id).await?;
    Ok((MAX_WAITING_REQUESTS - waiting).max(0))
}

/// One request, visible to its requester and to the manager it is routed to.
pub async fn get_request(pool: &SqlitePool, viewer: &Principal, request_id: i64) -> LeaveResult<LeaveEntry> {
    let entry = ledger::find_entry(pool, request_id)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("Leave request {request_id}")))?;

    let visible = match viewer.role {
        Role::Employee => entry.employee_id == viewer.user_id,
        Role::Manager => entry.manager_id == viewer.user_id,
    };

    if !visible {
        return Err(LeaveError::Forbidden("Not your leave request".into()));
    }
    Ok(entry)
}
