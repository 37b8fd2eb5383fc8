//! Fundraising campaigns and donations.
//!
//! A fundraiser's raised amount only moves when a money donation is recorded.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
