#[allow(clippy::module_inception)]
pub mod auth;
pub mod gate;
pub mod handlers;
pub mod jwt;
pub mod password;
