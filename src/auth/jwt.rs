use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    auth::auth::Principal,
    error::{LeaveError, LeaveResult},
    models::Claims,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or_default()
}

pub fn generate_access_token(principal: &Principal, secret: &str, ttl: usize) -> LeaveResult<String> {
    let claims = Claims {
        user_id: principal.user_id,
        sub: principal.username.clone(),
        role: principal.role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| LeaveError::Internal(format!("token encoding failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;

    fn principal() -> Principal {
        Principal {
            user_id: 4,
            username: "Grace".into(),
            role: Role::Manager,
        }
    }

    #[test]
    fn token_carries_the_principal() {
        let token = generate_access_token(&principal(), "secret", 60).unwrap();
        let claims = verify_token(&token, "secret").unwrap();

        assert_eq!(claims.user_id, 4);
        assert_eq!(claims.sub, "Grace");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(Principal::from(claims), principal());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token(&principal(), "secret", 60).unwrap();
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            user_id: 1,
            sub: "Grace".into(),
            role: Role::Manager,
            exp: now() - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(verify_token(&token, "secret").is_err());
    }
}
