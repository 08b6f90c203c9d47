use crate::auth::auth::Principal;
use crate::auth::password::{burn_verification, verify_password};
use crate::directory;
use crate::error::{LeaveError, LeaveResult};
use crate::model::role::Role;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Checks a username/password pair against the credential store and
/// resolves the principal from the directory.
///
/// Unknown users and wrong passwords both end in `InvalidCredentials`.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> LeaveResult<Principal> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LeaveError::Validation("Username and password are required".into()));
    }

    let credential = match directory::find_credential(pool, username).await? {
        Some(c) => c,
        None => {
            burn_verification(password);
            info!("invalid credentials: unknown user");
            return Err(LeaveError::InvalidCredentials);
        }
    };

    if !verify_password(password, &credential.password_hash)? {
        info!("invalid credentials: password mismatch");
        return Err(LeaveError::InvalidCredentials);
    }

    debug!("password verified");

    let user = directory::find_user_by_name(pool, &credential.username)
        .await?
        .ok_or_else(|| {
            warn!(username, "credential has no directory entry");
            LeaveError::NotFound(format!("User {username}"))
        })?;

    if user.role != credential.role {
        warn!(username, "credential role disagrees with directory, using directory");
    }

    Ok(Principal {
        user_id: user.id,
        username: user.name,
        role: user.role,
    })
}

/// The directory is the authority on roles.
pub async fn resolve_role(pool: &SqlitePool, username: &str) -> LeaveResult<Role> {
    directory::find_user_by_name(pool, username)
        .await?
        .map(|user| user.role)
        .ok_or_else(|| LeaveError::NotFound(format!("User {username}")))
}
