pub mod outreach_handler;
pub mod volunteer_handler;

pub use outreach_handler::{
    __path_list_calls, __path_log_call, __path_update_call, list_calls, log_call, update_call,
};
pub use volunteer_handler::{
    __path_list_all_volunteers, __path_list_my_volunteers, __path_register_volunteer,
    __path_update_volunteer_status, list_all_volunteers, list_my_volunteers, register_volunteer,
    update_volunteer_status,
};
