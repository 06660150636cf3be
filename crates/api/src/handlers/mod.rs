//! Request handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod resources;
pub mod tables;
