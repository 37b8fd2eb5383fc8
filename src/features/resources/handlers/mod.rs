pub mod resource_handler;

pub use resource_handler::{
    __path_allocate_resource, __path_create_resource, __path_delete_resource,
    __path_list_allocations, __path_list_resources, __path_update_resource, allocate_resource,
    create_resource, delete_resource, list_allocations, list_resources, update_resource,
};
