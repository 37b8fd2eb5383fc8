mod posting_service;

pub use posting_service::PostingService;
