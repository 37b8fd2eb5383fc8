mod donation_dto;
mod fundraiser_dto;

pub use donation_dto::{CreateDonationDto, DonationListQuery, DonationResponseDto};
pub use fundraiser_dto::{
    CreateFundraiserDto, FundraiserResponseDto, UpdateFundraiserStatusDto,
};
