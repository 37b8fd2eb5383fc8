pub mod auth;
pub mod dashboard;
pub mod disasters;
pub mod fundraisers;
pub mod reports;
pub mod requests;
pub mod resources;
pub mod users;
pub mod volunteer_calls;
pub mod volunteers;
