pub mod dashboard_handler;

pub use dashboard_handler::{
    __path_get_overview, __path_quick_add_resource, __path_review_request, get_overview,
    quick_add_resource, review_request,
};
