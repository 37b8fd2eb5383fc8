mod user;

pub use user::{Profile, Role, User, UserPatch, UserRole};
