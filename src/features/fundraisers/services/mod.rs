mod fundraiser_service;

pub use fundraiser_service::FundraiserService;
