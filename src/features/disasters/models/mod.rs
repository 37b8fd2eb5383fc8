mod disaster;

pub use disaster::{Disaster, DisasterFilter, DisasterPatch, DisasterStatus, NewDisaster};
