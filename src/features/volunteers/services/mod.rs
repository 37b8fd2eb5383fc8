mod outreach_service;
mod volunteer_service;

pub use outreach_service::OutreachService;
pub use volunteer_service::VolunteerService;
