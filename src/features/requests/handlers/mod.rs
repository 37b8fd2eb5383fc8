pub mod request_handler;

pub use request_handler::{
    __path_create_request, __path_list_all_requests, __path_list_my_requests,
    __path_update_request_status, create_request, list_all_requests, list_my_requests,
    update_request_status,
};
