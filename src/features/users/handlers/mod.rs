pub mod user_handler;

pub use user_handler::{
    __path_list_users, __path_update_own_profile, __path_update_user_status, list_users,
    update_own_profile, update_user_status,
};
