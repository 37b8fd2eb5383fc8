pub mod constants;
pub mod status;
pub mod test_helpers;
pub mod types;
pub mod validation;
pub mod view_model;
