//! Volunteer registration and the admin outreach log.
//!
//! The outreach log records outbound contact attempts (an admin calling a
//! volunteer about a disaster). It is unrelated to volunteer call postings,
//! which live in `volunteer_calls`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
