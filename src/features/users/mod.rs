//! User accounts: self-service profile edits and admin activation control.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | PATCH | `/api/users/me` | Update own name / phone |
//! | GET | `/api/admin/users` | List all users (admin) |
//! | PATCH | `/api/admin/users/{id}/status` | Activate or deactivate a user (admin) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
