use crate::model::role::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the user directory. `name` doubles as the login username.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    /// Manager-of-record, set iff `role` is Employee
    pub manager_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ManagerSummary {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Grace")]
    pub name: String,
}

/// Entry of the credential store, keyed by username.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
}

/// Signup input; the password is still in clear text here.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewAccount {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "ada@company.com", format = "email")]
    pub email: String,
    #[schema(example = "s3cret")]
    pub password: String,
    pub role: Role,
    /// Required for employees, must be absent for managers
    #[schema(example = 1, nullable = true)]
    pub manager_id: Option<i64>,
}
