use crate::auth::auth::Principal;
use crate::error::LeaveError;
use crate::model::leave_request::{Decision, LeaveEntry, LeaveRequest};
use crate::models::{CreateLeave, SubmitLeaveResponse};
use crate::workflow;
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/* =========================
Submit leave (Employee)
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = SubmitLeaveResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Employees only"),
        (status = 409, description = "Waiting-request quota reached")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: Principal,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, LeaveError> {
    auth.require_employee()?;

    let submission = workflow::submit_leave(
        pool.get_ref(),
        auth.user_id,
        payload.leave_type,
        payload.application_date,
        &payload.comment,
    )
    .await?;

    Ok(HttpResponse::Created().json(SubmitLeaveResponse {
        id: submission.id,
        status: "Waiting".to_string(),
        remaining_quota: submission.remaining_quota,
    }))
}

/// Own requests, oldest first
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "Requests of the logged-in employee", body = Vec<LeaveRequest>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Employees only")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn own_leaves(auth: Principal, pool: web::Data<SqlitePool>) -> Result<HttpResponse, LeaveError> {
    auth.require_employee()?;
    let leaves = workflow::list_own_requests(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/// Waiting requests the employee can still open
#[utoipa::path(
    get,
    path = "/api/leave/quota",
    responses(
        (status = 200, description = "Remaining quota", body = Object, example = json!({
            "remaining_quota": 9
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Employees only")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn leave_quota(auth: Principal, pool: web::Data<SqlitePool>) -> Result<HttpResponse, LeaveError> {
    auth.require_employee()?;
    let remaining = workflow::remaining_quota(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "remaining_quota": remaining
    })))
}

#[utoipa::path(
    get,
    path = "/api/leave/pending",
    responses(
        (status = 200, description = "Waiting requests routed to the manager", body = Vec<LeaveEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Managers only")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn pending_leaves(auth: Principal, pool: web::Data<SqlitePool>) -> Result<HttpResponse, LeaveError> {
    auth.require_manager()?;
    let leaves = workflow::list_pending_for_manager(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

#[utoipa::path(
    get,
    path = "/api/leave/history",
    responses(
        (status = 200, description = "Every request routed to the manager", body = Vec<LeaveEntry>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Managers only")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn leave_history(auth: Principal, pool: web::Data<SqlitePool>) -> Result<HttpResponse, LeaveError> {
    auth.require_manager()?;
    let leaves = workflow::list_history_for_manager(pool.get_ref(), auth.user_id).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveEntry),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Neither requester nor routed manager"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: Principal,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LeaveError> {
    let entry = workflow::get_request(pool.get_ref(), &auth, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(entry))
}

async fn decide(
    auth: Principal,
    pool: web::Data<SqlitePool>,
    leave_id: i64,
    decision: Decision,
) -> Result<HttpResponse, LeaveError> {
    let decided = workflow::decide_leave(pool.get_ref(), leave_id, decision, &auth).await?;
    Ok(HttpResponse::Ok().json(decided))
}

/* =========================
Approve / reject (Manager of record)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Routed to another manager"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already decided")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: Principal,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LeaveError> {
    decide(auth, pool, path.into_inner(), Decision::Approved).await
}

#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = i64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Routed to another manager"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Already decided")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: Principal,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, LeaveError> {
    decide(auth, pool, path.into_inner(), Decision::Rejected).await
}
