pub mod posting_handler;

pub use posting_handler::{
    __path_admin_list_postings, __path_apply_to_posting, __path_create_posting,
    __path_delete_posting, __path_list_my_applications, __path_list_posting_applications,
    __path_list_postings, __path_update_application_status, admin_list_postings,
    apply_to_posting, create_posting, delete_posting, list_my_applications,
    list_posting_applications, list_postings, update_application_status,
};
