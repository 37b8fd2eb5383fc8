//! Volunteer call postings (open calls for volunteer labour) and the
//! applications volunteers make to them.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
