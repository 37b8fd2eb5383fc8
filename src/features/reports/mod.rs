//! Free-text field reports from volunteers and staff.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
