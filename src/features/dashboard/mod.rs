//! Admin overview: headline counts across every collection.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
