pub mod disaster_handler;

pub use disaster_handler::{
    __path_admin_list_disasters, __path_create_disaster, __path_list_disasters,
    __path_update_disaster, admin_list_disasters, create_disaster, list_disasters,
    update_disaster,
};
