use crate::{
    auth::{auth::Principal, gate, jwt::generate_access_token},
    config::Config,
    directory,
    error::LeaveError,
    model::user::{ManagerSummary, NewAccount},
    models::{LoginReqDto, LoginResponse, RegisterResponse},
    workflow,
};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;
use tracing::{info, instrument};

/// Sign up
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = NewAccount,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing field or invalid manager selection"),
        (status = 409, description = "Email or username already taken")
    ),
    tag = "Auth"
)]
pub async fn register(
    payload: web::Json<NewAccount>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, LeaveError> {
    let user = directory::create_account(pool.get_ref(), payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        id: user.id,
        name: user.name,
        role: user.role,
    }))
}

/// Log in and receive a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, LeaveError> {
    info!("Login request received");

    let principal = gate::authenticate(pool.get_ref(), &user.username, &user.password).await?;
    let access_token =
        generate_access_token(&principal, &config.jwt_secret, config.access_token_ttl)?;

    info!(user_id = principal.user_id, role = %principal.role, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        principal,
    }))
}

/// Nothing is stored server side; the client drops its token.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Logged out")),
    tag = "Auth"
)]
pub async fn logout() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Managers an employee can pick at signup
#[utoipa::path(
    get,
    path = "/auth/managers",
    responses((status = 200, description = "Current managers", body = Vec<ManagerSummary>)),
    tag = "Auth"
)]
pub async fn managers(pool: web::Data<SqlitePool>) -> Result<HttpResponse, LeaveError> {
    let managers = workflow::list_managers(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(managers))
}

/// Current principal, role re-read from the directory
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Logged-in principal", body = Principal),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Principal no longer in the directory")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me(auth: Principal, pool: web::Data<SqlitePool>) -> Result<HttpResponse, LeaveError> {
    let role = gate::resolve_role(pool.get_ref(), &auth.username).await?;
    Ok(HttpResponse::Ok().json(Principal { role, ..auth }))
}
