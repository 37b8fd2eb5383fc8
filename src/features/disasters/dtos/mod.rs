mod disaster_dto;

pub use disaster_dto::{CreateDisasterDto, DisasterListQuery, DisasterResponseDto, UpdateDisasterDto};
