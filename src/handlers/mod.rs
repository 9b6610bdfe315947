//! HTTP handlers

pub mod health;
pub mod auth;
pub mod datasets;
pub mod impact;
pub mod follows;
