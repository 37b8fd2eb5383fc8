mod outreach_dto;
mod volunteer_dto;

pub use outreach_dto::{CallResponseDto, LogCallDto, OutreachListQuery, UpdateCallDto};
pub use volunteer_dto::{
    RegisterVolunteerDto, UpdateVolunteerStatusDto, VolunteerListQuery, VolunteerResponseDto,
};
