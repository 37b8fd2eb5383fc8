//! Resource inventory and allocations to victim requests (admin only).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
