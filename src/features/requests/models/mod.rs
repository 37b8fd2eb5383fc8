mod victim_request;

pub use victim_request::{
    NewVictimRequest, RequestFilter, VictimRequest, VictimRequestPatch, VictimRequestWithProfile,
};
