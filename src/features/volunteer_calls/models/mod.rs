mod application;
mod posting;

pub use application::{
    ApplicationFilter, ApplicationPatch, ApplicationStatus, ApplicationWithProfile,
    NewApplication, VolunteerCallApplication,
};
pub use posting::{NewPosting, VolunteerCallPosting};
