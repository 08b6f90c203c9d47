use crate::auth::auth::Principal;
use crate::model::leave_request::{Decision, LeaveEntry, LeaveRequest, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::model::user::{ManagerSummary, NewAccount};
use crate::models::{CreateLeave, LoginReqDto, LoginResponse, RegisterResponse, SubmitLeaveResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Desk API",
        version = "0.1.0",
        description = r#"
## Leave Desk

Employees apply for leave, their manager of record approves or rejects it.

### Roles
- **Employee**: submits leave (at most 10 waiting at a time) and sees own requests
- **Manager**: decides requests routed to them and sees their history

### Security
Log in at `/auth/login` and send the token as `Authorization: Bearer <token>`.
Logging out is dropping the token.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::auth::handlers::managers,
        crate::auth::handlers::me,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::own_leaves,
        crate::api::leave_request::leave_quota,
        crate::api::leave_request::pending_leaves,
        crate::api::leave_request::leave_history,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave
    ),
    components(
        schemas(
            Role,
            Principal,
            NewAccount,
            ManagerSummary,
            LoginReqDto,
            LoginResponse,
            RegisterResponse,
            LeaveType,
            LeaveStatus,
            Decision,
            LeaveRequest,
            LeaveEntry,
            CreateLeave,
            SubmitLeaveResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Signup, login and principal lookup"),
        (name = "Leave", description = "Leave submission and decisions"),
    )
)]
pub struct ApiDoc;

/// Prefix the protected handlers are documented under.
const DOCUMENTED_API_PREFIX: &str = "/api/";

/// The OpenAPI document with protected paths moved under `api_prefix`.
pub fn openapi_for(api_prefix: &str) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let prefix = api_prefix.trim_end_matches('/');

    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .map(|(path, item)| match path.strip_prefix(DOCUMENTED_API_PREFIX) {
            Some(rest) => (format!("{prefix}/{rest}"), item),
            None => (path, item),
        })
        .collect();
    doc
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
