use crate::{
    auth::jwt::verify_token, config::Config, error::LeaveError, model::role::Role, models::Claims,
};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An authenticated identity plus its resolved role.
///
/// The server never stores it: it is rebuilt from the bearer token on
/// every request and dropped afterwards. Logging out means the caller
/// forgets its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    #[schema(example = 2)]
    pub user_id: i64,
    #[schema(example = "Ada")]
    pub username: String,
    pub role: Role,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal {
            user_id: claims.user_id,
            username: claims.sub,
            role: claims.role,
        }
    }
}

impl FromRequest for Principal {
    type Error = LeaveError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(LeaveError::Unauthorized("Missing token".into()))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => return ready(Err(LeaveError::Internal("Config missing".into()))),
        };

        match verify_token(token, &config.jwt_secret) {
            Ok(claims) => ready(Ok(Principal::from(claims))),
            Err(e) => {
                tracing::debug!(error = %e, "rejected bearer token");
                ready(Err(LeaveError::Unauthorized("Invalid or expired token".into())))
            }
        }
    }
}

impl Principal {
    pub fn require_employee(&self) -> Result<(), LeaveError> {
        if self.role == Role::Employee {
            Ok(())
        } else {
            Err(LeaveError::Forbidden("Employees only".into()))
        }
    }

    pub fn require_manager(&self) -> Result<(), LeaveError> {
        if self.role == Role::Manager {
            Ok(())
        } else {
            Err(LeaveError::Forbidden("Managers only".into()))
        }
    }
}
