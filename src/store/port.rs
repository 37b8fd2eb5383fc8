//! Storage-agnostic CRUD contract, one trait per entity group.
//!
//! Lists are ordered newest first by the entity's creation timestamp.
//! `update_*`/`delete_*` on an unknown id fail with
//! [`StoreError::NotFound`](super::StoreError::NotFound).

use async_trait::async_trait;
use uuid::Uuid;

use super::StoreResult;
use crate::features::disasters::models::{Disaster, DisasterFilter, DisasterPatch, NewDisaster};
use crate::features::fundraisers::models::{
    Donation, DonationFilter, Fundraiser, FundraiserPatch, NewDonation, NewFundraiser,
};
use crate::features::reports::models::{NewReport, Report, ReportFilter};
use crate::features::requests::models::{
    NewVictimRequest, RequestFilter, VictimRequest, VictimRequestPatch, VictimRequestWithProfile,
};
use crate::features::resources::models::{
    AllocationFilter, NewAllocation, NewResource, Resource, ResourceAllocation, ResourcePatch,
};
use crate::features::users::models::{Profile, Role, User, UserPatch};
use crate::features::volunteer_calls::models::{
    ApplicationFilter, ApplicationPatch, NewApplication, NewPosting, VolunteerCallApplication,
    VolunteerCallPosting,
};
use crate::features::volunteers::models::{
    CallFilter, NewVolunteer, NewVolunteerCall, Volunteer, VolunteerCall, VolunteerCallPatch,
    VolunteerFilter, VolunteerPatch, VolunteerWithProfile,
};

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<()>;

    /// Profiles for the given ids; unknown ids are simply absent from the result.
    async fn profiles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Profile>>;

    /// Role row of a user, `None` when no role row exists.
    async fn role_of(&self, user_id: Uuid) -> StoreResult<Option<Role>>;
}

#[async_trait]
pub trait VictimRequestStore: Send + Sync {
    /// Requests joined with the submitter's profile; a missing profile passes through as `None`.
    async fn list_requests(&self, filter: RequestFilter)
        -> StoreResult<Vec<VictimRequestWithProfile>>;

    async fn create_request(&self, new: NewVictimRequest) -> StoreResult<VictimRequest>;

    /// Stamps `updated_at`, including for status-only changes.
    async fn update_request(&self, id: Uuid, patch: VictimRequestPatch) -> StoreResult<()>;
}

#[async_trait]
pub trait DisasterStore: Send + Sync {
    async fn list_disasters(&self, filter: DisasterFilter) -> StoreResult<Vec<Disaster>>;

    async fn create_disaster(&self, new: NewDisaster) -> StoreResult<Disaster>;

    async fn update_disaster(&self, id: Uuid, patch: DisasterPatch) -> StoreResult<()>;
}

#[async_trait]
pub trait VolunteerStore: Send + Sync {
    async fn list_volunteers(&self, filter: VolunteerFilter)
        -> StoreResult<Vec<VolunteerWithProfile>>;

    async fn create_volunteer(&self, new: NewVolunteer) -> StoreResult<Volunteer>;

    async fn update_volunteer(&self, id: Uuid, patch: VolunteerPatch) -> StoreResult<()>;
}

/// Outreach log: outbound contact attempts to volunteers
#[async_trait]
pub trait VolunteerCallStore: Send + Sync {
    async fn list_calls(&self, filter: CallFilter) -> StoreResult<Vec<VolunteerCall>>;

    /// Stamps `called_at`.
    async fn create_call(&self, new: NewVolunteerCall) -> StoreResult<VolunteerCall>;

    async fn update_call(&self, id: Uuid, patch: VolunteerCallPatch) -> StoreResult<()>;
}

#[async_trait]
pub trait PostingStore: Send + Sync {
    async fn list_postings(&self) -> StoreResult<Vec<VolunteerCallPosting>>;

    async fn create_posting(&self, new: NewPosting) -> StoreResult<VolunteerCallPosting>;

    /// Removes the posting together with every application made to it.
    async fn delete_posting(&self, id: Uuid) -> StoreResult<()>;

    async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> StoreResult<Vec<VolunteerCallApplication>>;

    /// Stamps `applied_at`; status starts as pending.
    async fn create_application(&self, new: NewApplication)
        -> StoreResult<VolunteerCallApplication>;

    async fn update_application(&self, id: Uuid, patch: ApplicationPatch) -> StoreResult<()>;
}

#[async_trait]
pub trait FundraisingStore: Send + Sync {
    async fn list_fundraisers(&self) -> StoreResult<Vec<Fundraiser>>;

    /// `current_amount` starts at zero.
    async fn create_fundraiser(&self, new: NewFundraiser) -> StoreResult<Fundraiser>;

    async fn update_fundraiser(&self, id: Uuid, patch: FundraiserPatch) -> StoreResult<()>;

    async fn list_donations(&self, filter: DonationFilter) -> StoreResult<Vec<Donation>>;

    /// Records the donation and, for money donations, credits the fundraiser's
    /// `current_amount` by exactly the donated amount. A donation against an
    /// unknown fundraiser is still recorded. A credit that would push the total
    /// past the largest storable amount fails with `Validation`.
    async fn record_donation(&self, new: NewDonation) -> StoreResult<Donation>;
}

#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn list_resources(&self) -> StoreResult<Vec<Resource>>;

    async fn create_resource(&self, new: NewResource) -> StoreResult<Resource>;

    async fn update_resource(&self, id: Uuid, patch: ResourcePatch) -> StoreResult<()>;

    /// Removes the resource together with its allocation history.
    async fn delete_resource(&self, id: Uuid) -> StoreResult<()>;

    async fn list_allocations(&self, filter: AllocationFilter)
        -> StoreResult<Vec<ResourceAllocation>>;

    /// Records the allocation and decrements the resource's quantity by the
    /// allocated amount in the same operation. A decrement that leaves the
    /// quantity outside the integer range fails with `Validation`.
    async fn allocate_resource(&self, new: NewAllocation) -> StoreResult<ResourceAllocation>;
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn list_reports(&self, filter: ReportFilter) -> StoreResult<Vec<Report>>;

    async fn create_report(&self, new: NewReport) -> StoreResult<Report>;

    async fn delete_report(&self, id: Uuid) -> StoreResult<()>;
}

/// The full entity set, implemented by both backends.
pub trait ReliefStore:
    UserStore
    + VictimRequestStore
    + DisasterStore
    + VolunteerStore
    + VolunteerCallStore
    + PostingStore
    + FundraisingStore
    + ResourceStore
    + ReportStore
{
}

impl<T> ReliefStore for T where
    T: UserStore
        + VictimRequestStore
        + DisasterStore
        + VolunteerStore
        + VolunteerCallStore
        + PostingStore
        + FundraisingStore
        + ResourceStore
        + ReportStore
{
}

/// Session handling of the local mirror. The remote backend delegates
/// authentication to the hosted auth subsystem instead.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Succeeds only when the password matches and the user is active.
    async fn login(&self, email: &str, password: &str) -> bool;

    /// Fails when a user with the same email already exists.
    async fn register(&self, email: &str, password: &str, name: &str, phone: &str) -> bool;

    async fn logout(&self);

    async fn current_user(&self) -> Option<User>;
}
