use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum LeaveType {
    Personal,
    Sick,
    Official,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum LeaveStatus {
    Waiting,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Waiting)
    }
}

/// The two outcomes a manager can pick.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for LeaveStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => LeaveStatus::Approved,
            Decision::Rejected => LeaveStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 2)]
    pub employee_id: i64,
    /// manager-of-record at submission time
    #[schema(example = 1)]
    pub manager_id: i64,
    pub leave_type: LeaveType,
    #[schema(example = "flu")]
    pub comment: String,
    pub status: LeaveStatus,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub application_date: NaiveDate,
    #[schema(example = "2026-01-02T09:30:00Z", format = "date-time", value_type = Option<String>)]
    pub decision_date: Option<DateTime<Utc>>,
}

/// A ledger row joined with the requester's name, as managers see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveEntry {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 2)]
    pub employee_id: i64,
    #[schema(example = "Ada")]
    pub employee_name: String,
    #[schema(example = 1)]
    pub manager_id: i64,
    pub leave_type: LeaveType,
    #[schema(example = "flu")]
    pub comment: String,
    pub status: LeaveStatus,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub application_date: NaiveDate,
    #[schema(example = "2026-01-02T09:30:00Z", format = "date-time", value_type = Option<String>)]
    pub decision_date: Option<DateTime<Utc>>,
}
