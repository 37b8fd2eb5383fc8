mod donation;
mod fundraiser;

pub use donation::{Donation, DonationFilter, DonationType, NewDonation};
pub use fundraiser::{Fundraiser, FundraiserPatch, NewFundraiser};
