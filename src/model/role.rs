use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Stored as TEXT (`Employee` / `Manager`) in both `users` and `credentials`.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    /// Employees are routed to a manager, managers report to nobody.
    pub fn requires_manager(&self) -> bool {
        *self == Role::Employee
    }
}
