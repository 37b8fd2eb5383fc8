pub mod donation_handler;
pub mod fundraiser_handler;

pub use donation_handler::{
    __path_create_donation, __path_list_all_donations, __path_list_my_donations,
    create_donation, list_all_donations, list_my_donations,
};
pub use fundraiser_handler::{
    __path_create_fundraiser, __path_list_all_fundraisers, __path_list_fundraisers,
    __path_update_fundraiser_status, create_fundraiser, list_all_fundraisers, list_fundraisers,
    update_fundraiser_status,
};
