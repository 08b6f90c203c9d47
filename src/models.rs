use crate::auth::auth::Principal;
use crate::model::{leave_request::LeaveType, role::Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "Ada")]
    pub username: String,
    #[schema(example = "s3cret")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub principal: Principal,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = 2)]
    pub id: i64,
    #[schema(example = "Ada")]
    pub name: String,
    pub role: Role,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    pub leave_type: LeaveType,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub application_date: chrono::NaiveDate,
    #[schema(example = "flu")]
    #[serde(default)]
    pub comment: String,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitLeaveResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Waiting")]
    pub status: String,
    #[schema(example = 9)]
    pub remaining_quota: i64,
}

/// JWT body; the principal travels inside it instead of in server-side session state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub jti: String,
}
