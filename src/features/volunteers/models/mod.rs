mod volunteer;
mod volunteer_call;

pub use volunteer::{
    NewVolunteer, Volunteer, VolunteerFilter, VolunteerPatch, VolunteerStatus,
    VolunteerWithProfile,
};
pub use volunteer_call::{
    CallFilter, CallResponseStatus, NewVolunteerCall, VolunteerCall, VolunteerCallPatch,
};
