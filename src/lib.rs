pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod docs;
pub mod error;
pub mod ledger;
pub mod model;
pub mod models;
pub mod routes;
pub mod workflow;
