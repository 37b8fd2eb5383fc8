use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{newest_first, touch, CollectionKey, LocalMirrorStore};
use crate::features::disasters::models::{Disaster, DisasterFilter, DisasterPatch, NewDisaster};
use crate::features::fundraisers::models::{
    Donation, DonationFilter, DonationType, Fundraiser, FundraiserPatch, NewDonation,
    NewFundraiser,
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
    ApplicationFilter, ApplicationPatch, ApplicationStatus, NewApplication, NewPosting,
    VolunteerCallApplication, VolunteerCallPosting,
};
use crate::features::volunteers::models::{
    CallFilter, NewVolunteer, NewVolunteerCall, Volunteer, VolunteerCall, VolunteerCallPatch,
    VolunteerFilter, VolunteerPatch, VolunteerStatus, VolunteerWithProfile,
};
use crate::shared::validation::MAX_AMOUNT;
use crate::store::{
    DisasterStore, FundraisingStore, PostingStore, ReportStore, ResourceStore, StoreError,
    StoreResult, UserStore, VictimRequestStore, VolunteerCallStore, VolunteerStore,
};

fn find_mut<'a, T>(
    items: &'a mut [T],
    id: Uuid,
    id_of: impl Fn(&T) -> Uuid,
    entity: &str,
) -> StoreResult<&'a mut T> {
    items
        .iter_mut()
        .find(|item| id_of(item) == id)
        .ok_or_else(|| StoreError::not_found(entity, id))
}

fn profile_of(users: &[User], user_id: Uuid) -> Option<Profile> {
    users.iter().find(|u| u.id == user_id).map(User::profile)
}

#[async_trait]
impl UserStore for LocalMirrorStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = self.read(|s| s.users.clone()).await;
        Ok(newest_first(users, |u| u.created_at))
    }

    async fn update_user(&self, id: Uuid, patch: UserPatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::Users, CollectionKey::CurrentUser], |s| {
            let user = find_mut(&mut s.users, id, |u| u.id, "User")?;
            user.apply(patch);
            let updated = user.clone();
            if s.current_user.as_ref().is_some_and(|c| c.id == id) {
                s.current_user = Some(updated);
            }
            Ok(())
        })
        .await?;

        tracing::info!("User updated: {}", id);
        Ok(())
    }

    async fn profiles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        let ids = ids.to_vec();
        Ok(self
            .read(move |s| {
                s.users
                    .iter()
                    .filter(|u| ids.contains(&u.id))
                    .map(User::profile)
                    .collect()
            })
            .await)
    }

    async fn role_of(&self, user_id: Uuid) -> StoreResult<Option<Role>> {
        Ok(self
            .read(|s| {
                s.user_roles
                    .iter()
                    .find(|r| r.user_id == user_id)
                    .map(|r| r.role)
            })
            .await)
    }
}

#[async_trait]
impl VictimRequestStore for LocalMirrorStore {
    async fn list_requests(
        &self,
        filter: RequestFilter,
    ) -> StoreResult<Vec<VictimRequestWithProfile>> {
        let requests = self
            .read(move |s| {
                s.victim_requests
                    .iter()
                    .filter(|r| filter.matches(r))
                    .map(|r| VictimRequestWithProfile {
                        request: r.clone(),
                        profile: profile_of(&s.users, r.user_id),
                    })
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(requests, |r| r.request.created_at))
    }

    async fn create_request(&self, new: NewVictimRequest) -> StoreResult<VictimRequest> {
        let now = Utc::now();
        let request = VictimRequest {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            name: new.name,
            location: new.location,
            description: new.description,
            urgency: new.urgency,
            status: new.status,
            created_at: now,
            updated_at: now,
        };

        let created = request.clone();
        self.mutate(&[CollectionKey::VictimRequests], move |s| {
            s.victim_requests.push(request);
            Ok(())
        })
        .await?;

        tracing::info!("Victim request created: {}", created.id);
        Ok(created)
    }

    async fn update_request(&self, id: Uuid, patch: VictimRequestPatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::VictimRequests], |s| {
            let request = find_mut(&mut s.victim_requests, id, |r| r.id, "Victim request")?;
            request.apply(patch);
            request.updated_at = touch(request.updated_at);
            Ok(())
        })
        .await?;

        tracing::info!("Victim request updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl DisasterStore for LocalMirrorStore {
    async fn list_disasters(&self, filter: DisasterFilter) -> StoreResult<Vec<Disaster>> {
        let disasters = self
            .read(move |s| {
                s.disasters
                    .iter()
                    .filter(|d| filter.matches(d))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(disasters, |d| d.created_at))
    }

    async fn create_disaster(&self, new: NewDisaster) -> StoreResult<Disaster> {
        let disaster = Disaster {
            id: Uuid::now_v7(),
            name: new.name,
            location: new.location,
            description: new.description,
            severity: new.severity,
            status: new.status,
            created_at: Utc::now(),
        };

        let created = disaster.clone();
        self.mutate(&[CollectionKey::Disasters], move |s| {
            s.disasters.push(disaster);
            Ok(())
        })
        .await?;

        tracing::info!("Disaster created: {}", created.id);
        Ok(created)
    }

    async fn update_disaster(&self, id: Uuid, patch: DisasterPatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::Disasters], |s| {
            find_mut(&mut s.disasters, id, |d| d.id, "Disaster")?.apply(patch);
            Ok(())
        })
        .await?;

        tracing::info!("Disaster updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl VolunteerStore for LocalMirrorStore {
    async fn list_volunteers(
        &self,
        filter: VolunteerFilter,
    ) -> StoreResult<Vec<VolunteerWithProfile>> {
        let volunteers = self
            .read(move |s| {
                s.volunteers
                    .iter()
                    .filter(|v| filter.matches(v))
                    .map(|v| VolunteerWithProfile {
                        volunteer: v.clone(),
                        profile: profile_of(&s.users, v.user_id),
                    })
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(volunteers, |v| v.volunteer.created_at))
    }

    async fn create_volunteer(&self, new: NewVolunteer) -> StoreResult<Volunteer> {
        let volunteer = Volunteer {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            disaster_id: new.disaster_id,
            skills: new.skills,
            availability: new.availability,
            location: new.location,
            contact_info: new.contact_info,
            status: VolunteerStatus::Active,
            created_at: Utc::now(),
        };

        let created = volunteer.clone();
        self.mutate(&[CollectionKey::Volunteers], move |s| {
            let taken = s
                .volunteers
                .iter()
                .any(|v| v.user_id == volunteer.user_id && v.disaster_id == volunteer.disaster_id);
            if taken {
                return Err(StoreError::Conflict(
                    "You are already registered as a volunteer".to_string(),
                ));
            }
            s.volunteers.push(volunteer);
            Ok(())
        })
        .await?;

        tracing::info!("Volunteer registered: {}", created.id);
        Ok(created)
    }

    async fn update_volunteer(&self, id: Uuid, patch: VolunteerPatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::Volunteers], |s| {
            find_mut(&mut s.volunteers, id, |v| v.id, "Volunteer")?.apply(patch);
            Ok(())
        })
        .await?;

        tracing::info!("Volunteer updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl VolunteerCallStore for LocalMirrorStore {
    async fn list_calls(&self, filter: CallFilter) -> StoreResult<Vec<VolunteerCall>> {
        let calls = self
            .read(move |s| {
                s.volunteer_calls
                    .iter()
                    .filter(|c| filter.matches(c))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(calls, |c| c.called_at))
    }

    async fn create_call(&self, new: NewVolunteerCall) -> StoreResult<VolunteerCall> {
        let call = VolunteerCall {
            id: Uuid::now_v7(),
            volunteer_id: new.volunteer_id,
            disaster_id: new.disaster_id,
            called_by: new.called_by,
            called_at: Utc::now(),
            response_status: new.response_status,
            notes: new.notes,
        };

        let created = call.clone();
        self.mutate(&[CollectionKey::VolunteerCalls], move |s| {
            find_mut(&mut s.volunteers, call.volunteer_id, |v| v.id, "Volunteer")?;
            s.volunteer_calls.push(call);
            Ok(())
        })
        .await?;

        tracing::info!("Volunteer call logged: {}", created.id);
        Ok(created)
    }

    async fn update_call(&self, id: Uuid, patch: VolunteerCallPatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::VolunteerCalls], |s| {
            find_mut(&mut s.volunteer_calls, id, |c| c.id, "Volunteer call")?.apply(patch);
            Ok(())
        })
        .await?;

        tracing::info!("Volunteer call updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl PostingStore for LocalMirrorStore {
    async fn list_postings(&self) -> StoreResult<Vec<VolunteerCallPosting>> {
        let postings = self.read(|s| s.postings.clone()).await;
        Ok(newest_first(postings, |p| p.created_at))
    }

    async fn create_posting(&self, new: NewPosting) -> StoreResult<VolunteerCallPosting> {
        let posting = VolunteerCallPosting {
            id: Uuid::now_v7(),
            disaster_name: new.disaster_name,
            disaster_location: new.disaster_location,
            description: new.description,
            volunteers_needed: new.volunteers_needed,
            priority_level: new.priority_level,
            call_date: new.call_date,
            required_skills: new.required_skills,
            created_at: Utc::now(),
        };

        let created = posting.clone();
        self.mutate(&[CollectionKey::VolunteerCallPostings], move |s| {
            s.postings.push(posting);
            Ok(())
        })
        .await?;

        tracing::info!("Volunteer call posting created: {}", created.id);
        Ok(created)
    }

    async fn delete_posting(&self, id: Uuid) -> StoreResult<()> {
        let keys = [
            CollectionKey::VolunteerCallPostings,
            CollectionKey::VolunteerCallApplications,
        ];
        let removed = self
            .mutate(&keys, |s| {
                let before = s.postings.len();
                s.postings.retain(|p| p.id != id);
                if s.postings.len() == before {
                    return Err(StoreError::not_found("Volunteer call posting", id));
                }
                let applications = s.applications.len();
                s.applications.retain(|a| a.call_id != id);
                Ok(applications - s.applications.len())
            })
            .await?;

        tracing::info!(
            "Volunteer call posting deleted: {} ({} applications removed)",
            id,
            removed
        );
        Ok(())
    }

    async fn list_applications(
        &self,
        filter: ApplicationFilter,
    ) -> StoreResult<Vec<VolunteerCallApplication>> {
        let applications = self
            .read(move |s| {
                s.applications
                    .iter()
                    .filter(|a| filter.matches(a))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(applications, |a| a.applied_at))
    }

    async fn create_application(
        &self,
        new: NewApplication,
    ) -> StoreResult<VolunteerCallApplication> {
        let application = VolunteerCallApplication {
            id: Uuid::now_v7(),
            call_id: new.call_id,
            user_id: new.user_id,
            status: ApplicationStatus::Pending,
            notes: new.notes,
            applied_at: Utc::now(),
        };

        let created = application.clone();
        self.mutate(&[CollectionKey::VolunteerCallApplications], move |s| {
            find_mut(&mut s.postings, application.call_id, |p| p.id, "Volunteer call posting")?;
            let duplicate = s
                .applications
                .iter()
                .any(|a| a.call_id == application.call_id && a.user_id == application.user_id);
            if duplicate {
                return Err(StoreError::Conflict(
                    "You have already applied to this call".to_string(),
                ));
            }
            s.applications.push(application);
            Ok(())
        })
        .await?;

        tracing::info!("Volunteer call application created: {}", created.id);
        Ok(created)
    }

    async fn update_application(&self, id: Uuid, patch: ApplicationPatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::VolunteerCallApplications], |s| {
            find_mut(&mut s.applications, id, |a| a.id, "Application")?.apply(patch);
            Ok(())
        })
        .await?;

        tracing::info!("Volunteer call application updated: {}", id);
        Ok(())
    }
}

#[async_trait]
impl FundraisingStore for LocalMirrorStore {
    async fn list_fundraisers(&self) -> StoreResult<Vec<Fundraiser>> {
        let fundraisers = self.read(|s| s.fundraisers.clone()).await;
        Ok(newest_first(fundraisers, |f| f.created_at))
    }

    async fn create_fundraiser(&self, new: NewFundraiser) -> StoreResult<Fundraiser> {
        let fundraiser = Fundraiser {
            id: Uuid::now_v7(),
            title: new.title,
            description: new.description,
            goal_amount: new.goal_amount,
            current_amount: rust_decimal::Decimal::ZERO,
            status: new.status,
            created_at: Utc::now(),
            end_date: new.end_date,
        };

        let created = fundraiser.clone();
        self.mutate(&[CollectionKey::Fundraisers], move |s| {
            s.fundraisers.push(fundraiser);
            Ok(())
        })
        .await?;

        tracing::info!("Fundraiser created: {}", created.id);
        Ok(created)
    }

    async fn update_fundraiser(&self, id: Uuid, patch: FundraiserPatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::Fundraisers], |s| {
            find_mut(&mut s.fundraisers, id, |f| f.id, "Fundraiser")?.apply(patch);
            Ok(())
        })
        .await?;

        tracing::info!("Fundraiser updated: {}", id);
        Ok(())
    }

    async fn list_donations(&self, filter: DonationFilter) -> StoreResult<Vec<Donation>> {
        let donations = self
            .read(move |s| {
                s.donations
                    .iter()
                    .filter(|d| filter.matches(d))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(donations, |d| d.created_at))
    }

    async fn record_donation(&self, new: NewDonation) -> StoreResult<Donation> {
        let donation = Donation {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            fundraiser_id: new.fundraiser_id,
            amount: new.amount,
            donation_type: new.donation_type,
            resource_name: new.resource_name,
            created_at: Utc::now(),
        };

        let created = donation.clone();
        let keys = [CollectionKey::Donations, CollectionKey::Fundraisers];
        let credited = self
            .mutate(&keys, move |s| {
                let mut credited = false;
                if donation.donation_type == DonationType::Money {
                    if let Some(fundraiser) = s
                        .fundraisers
                        .iter_mut()
                        .find(|f| f.id == donation.fundraiser_id)
                    {
                        fundraiser.current_amount = fundraiser
                            .current_amount
                            .checked_add(donation.amount)
                            .filter(|total| *total <= *MAX_AMOUNT)
                            .ok_or_else(|| {
                                StoreError::Validation(
                                    "Donation would exceed the fundraiser's maximum amount"
                                        .to_string(),
                                )
                            })?;
                        credited = true;
                    }
                }
                s.donations.push(donation);
                Ok(credited)
            })
            .await?;

        if created.donation_type == DonationType::Money && !credited {
            tracing::warn!(
                "Donation {} recorded against unknown fundraiser {}",
                created.id,
                created.fundraiser_id
            );
        }
        tracing::info!("Donation recorded: {}", created.id);
        Ok(created)
    }
}

#[async_trait]
impl ResourceStore for LocalMirrorStore {
    async fn list_resources(&self) -> StoreResult<Vec<Resource>> {
        let resources = self.read(|s| s.resources.clone()).await;
        Ok(newest_first(resources, |r| r.created_at))
    }

    async fn create_resource(&self, new: NewResource) -> StoreResult<Resource> {
        let now = Utc::now();
        let resource = Resource {
            id: Uuid::now_v7(),
            name: new.name,
            quantity: new.quantity,
            unit: new.unit,
            category: new.category,
            created_at: now,
            updated_at: now,
        };

        let created = resource.clone();
        self.mutate(&[CollectionKey::Resources], move |s| {
            s.resources.push(resource);
            Ok(())
        })
        .await?;

        tracing::info!("Resource created: {}", created.id);
        Ok(created)
    }

    async fn update_resource(&self, id: Uuid, patch: ResourcePatch) -> StoreResult<()> {
        self.mutate(&[CollectionKey::Resources], |s| {
            let resource = find_mut(&mut s.resources, id, |r| r.id, "Resource")?;
            resource.apply(patch);
            resource.updated_at = touch(resource.updated_at);
            Ok(())
        })
        .await?;

        tracing::info!("Resource updated: {}", id);
        Ok(())
    }

    async fn delete_resource(&self, id: Uuid) -> StoreResult<()> {
        let keys = [CollectionKey::Resources, CollectionKey::ResourceAllocations];
        let removed = self
            .mutate(&keys, |s| {
                let before = s.resources.len();
                s.resources.retain(|r| r.id != id);
                if s.resources.len() == before {
                    return Err(StoreError::not_found("Resource", id));
                }
                let allocations = s.allocations.len();
                s.allocations.retain(|a| a.resource_id != id);
                Ok(allocations - s.allocations.len())
            })
            .await?;

        tracing::info!("Resource deleted: {} ({} allocations removed)", id, removed);
        Ok(())
    }

    async fn list_allocations(
        &self,
        filter: AllocationFilter,
    ) -> StoreResult<Vec<ResourceAllocation>> {
        let allocations = self
            .read(move |s| {
                s.allocations
                    .iter()
                    .filter(|a| filter.matches(a))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(allocations, |a| a.allocated_date))
    }

    async fn allocate_resource(&self, new: NewAllocation) -> StoreResult<ResourceAllocation> {
        let allocation = ResourceAllocation {
            id: Uuid::now_v7(),
            resource_id: new.resource_id,
            request_id: new.request_id,
            quantity: new.quantity,
            allocated_date: Utc::now(),
        };

        let policy = self.policy;
        let created = allocation.clone();
        let keys = [CollectionKey::ResourceAllocations, CollectionKey::Resources];
        let remaining = self
            .mutate(&keys, move |s| {
                let resource = find_mut(&mut s.resources, allocation.resource_id, |r| r.id, "Resource")?;
                policy.check(resource.quantity, allocation.quantity)?;
                resource.quantity = resource
                    .quantity
                    .checked_sub(allocation.quantity)
                    .ok_or_else(|| {
                        StoreError::Validation("Allocation would overflow stock quantity".to_string())
                    })?;
                resource.updated_at = touch(resource.updated_at);
                let remaining = resource.quantity;
                s.allocations.push(allocation);
                Ok(remaining)
            })
            .await?;

        tracing::info!(
            "Resource {} allocated to request {}: {} units, {} remaining",
            created.resource_id,
            created.request_id,
            created.quantity,
            remaining
        );
        Ok(created)
    }
}

#[async_trait]
impl ReportStore for LocalMirrorStore {
    async fn list_reports(&self, filter: ReportFilter) -> StoreResult<Vec<Report>> {
        let reports = self
            .read(move |s| {
                s.reports
                    .iter()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .await;
        Ok(newest_first(reports, |r| r.report_date))
    }

    async fn create_report(&self, new: NewReport) -> StoreResult<Report> {
        let report = Report {
            id: Uuid::now_v7(),
            user_id: new.user_id,
            report: new.report,
            report_type: new.report_type,
            report_date: Utc::now(),
            request_id: new.request_id,
            volunteer_id: new.volunteer_id,
        };

        let created = report.clone();
        self.mutate(&[CollectionKey::Reports], move |s| {
            s.reports.push(report);
            Ok(())
        })
        .await?;

        tracing::info!("Report created: {}", created.id);
        Ok(created)
    }

    async fn delete_report(&self, id: Uuid) -> StoreResult<()> {
        self.mutate(&[CollectionKey::Reports], |s| {
            let before = s.reports.len();
            s.reports.retain(|r| r.id != id);
            if s.reports.len() == before {
                return Err(StoreError::not_found("Report", id));
            }
            Ok(())
        })
        .await?;

        tracing::info!("Report deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Sentence;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use rust_decimal::Decimal;

    use super::*;
    use crate::features::disasters::models::DisasterStatus;
    use crate::features::volunteers::models::CallResponseStatus;
    use crate::shared::status::{ReviewStatus, Severity};
    use crate::store::local::{MemorySnapshotStorage, SnapshotStorage};
    use crate::store::{AllocationPolicy, SessionStore};

    async fn store_with(
        policy: AllocationPolicy,
    ) -> (LocalMirrorStore, Arc<MemorySnapshotStorage>) {
        let storage = Arc::new(MemorySnapshotStorage::new());
        let store = LocalMirrorStore::open(storage.clone(), policy, vec![])
            .await
            .unwrap();
        (store, storage)
    }

    async fn store() -> LocalMirrorStore {
        store_with(AllocationPolicy::RejectOverdraw).await.0
    }

    fn new_fundraiser(title: &str, goal: i64) -> NewFundraiser {
        NewFundraiser {
            title: title.to_string(),
            description: Sentence(3..8).fake(),
            goal_amount: Decimal::from(goal),
            status: ReviewStatus::Approved,
            end_date: None,
        }
    }

    fn money(fundraiser_id: Uuid, amount: Decimal) -> NewDonation {
        NewDonation {
            user_id: Uuid::now_v7(),
            fundraiser_id,
            amount,
            donation_type: DonationType::Money,
            resource_name: None,
        }
    }

    fn new_resource(name: &str, quantity: i32) -> NewResource {
        NewResource {
            name: name.to_string(),
            quantity,
            unit: "liters".to_string(),
            category: "water".to_string(),
        }
    }

    fn new_request(user_id: Uuid) -> NewVictimRequest {
        NewVictimRequest {
            user_id,
            name: Name().fake(),
            location: "Riverside".to_string(),
            description: Sentence(3..8).fake(),
            urgency: Severity::High,
            status: ReviewStatus::Pending,
        }
    }

    #[tokio::test]
    async fn flood_fund_scenario() {
        let store = store().await;
        let fund = store
            .create_fundraiser(new_fundraiser("Flood Fund", 1000))
            .await
            .unwrap();

        store
            .record_donation(money(fund.id, Decimal::from(250)))
            .await
            .unwrap();

        let fund = store.list_fundraisers().await.unwrap().remove(0);
        assert_eq!(fund.current_amount, Decimal::from(250));
        assert_eq!(fund.progress_percent(), Decimal::from(25));
    }

    #[tokio::test]
    async fn current_amount_is_sum_of_money_donations() {
        let store = store().await;
        let a = store.create_fundraiser(new_fundraiser("A", 500)).await.unwrap();
        let b = store.create_fundraiser(new_fundraiser("B", 500)).await.unwrap();

        for (target, cents) in [(a.id, 1050), (b.id, 99), (a.id, 1), (a.id, 20000)] {
            store
                .record_donation(money(target, Decimal::new(cents, 2)))
                .await
                .unwrap();
        }
        store
            .record_donation(NewDonation {
                user_id: Uuid::now_v7(),
                fundraiser_id: a.id,
                amount: Decimal::from(40),
                donation_type: DonationType::Resource,
                resource_name: Some("Blankets".to_string()),
            })
            .await
            .unwrap();

        let donations = store.list_donations(DonationFilter::default()).await.unwrap();
        for fund in store.list_fundraisers().await.unwrap() {
            let expected: Decimal = donations
                .iter()
                .filter(|d| d.fundraiser_id == fund.id && d.donation_type == DonationType::Money)
                .map(|d| d.amount)
                .sum();
            assert_eq!(fund.current_amount, expected);
        }
    }

    #[tokio::test]
    async fn credit_past_maximum_amount_is_rejected_before_any_write() {
        let store = store().await;
        let fund = store.create_fundraiser(new_fundraiser("Flood Fund", 1000)).await.unwrap();
        store.record_donation(money(fund.id, *MAX_AMOUNT)).await.unwrap();
        let before = store.snapshot().await;

        let result = store.record_donation(money(fund.id, Decimal::new(1, 2))).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.snapshot().await, before);

        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let result = store.record_donation(money(fund.id, huge)).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn donation_to_unknown_fundraiser_is_still_recorded() {
        let store = store().await;
        let donation = store
            .record_donation(money(Uuid::now_v7(), Decimal::from(5)))
            .await
            .unwrap();

        let donations = store.list_donations(DonationFilter::default()).await.unwrap();
        assert_eq!(donations, vec![donation]);
    }

    #[tokio::test]
    async fn water_allocation_scenario() {
        let store = store().await;
        let water = store.create_resource(new_resource("Water", 100)).await.unwrap();

        store
            .allocate_resource(NewAllocation {
                resource_id: water.id,
                request_id: Uuid::now_v7(),
                quantity: 30,
            })
            .await
            .unwrap();

        let water_after = store.list_resources().await.unwrap().remove(0);
        assert_eq!(water_after.quantity, 70);
        assert!(water_after.updated_at > water.updated_at);
    }

    #[tokio::test]
    async fn overdraw_is_rejected_before_any_write() {
        let store = store().await;
        let water = store.create_resource(new_resource("Water", 10)).await.unwrap();
        let before = store.snapshot().await;

        let result = store
            .allocate_resource(NewAllocation {
                resource_id: water.id,
                request_id: Uuid::now_v7(),
                quantity: 11,
            })
            .await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn allow_negative_keeps_quantity_equal_to_initial_minus_allocations() {
        let (store, _) = store_with(AllocationPolicy::AllowNegative).await;
        let water = store.create_resource(new_resource("Water", 20)).await.unwrap();

        for quantity in [15, 10, 7] {
            store
                .allocate_resource(NewAllocation {
                    resource_id: water.id,
                    request_id: Uuid::now_v7(),
                    quantity,
                })
                .await
                .unwrap();
        }

        let allocated: i32 = store
            .list_allocations(AllocationFilter {
                resource_id: Some(water.id),
                request_id: None,
            })
            .await
            .unwrap()
            .iter()
            .map(|a| a.quantity)
            .sum();
        let water = store.list_resources().await.unwrap().remove(0);
        assert_eq!(water.quantity, 20 - allocated);
        assert_eq!(water.quantity, -12);
    }

    #[tokio::test]
    async fn allow_negative_rejects_quantity_underflow() {
        let (store, _) = store_with(AllocationPolicy::AllowNegative).await;
        let water = store.create_resource(new_resource("Water", 0)).await.unwrap();
        let allocate = || NewAllocation {
            resource_id: water.id,
            request_id: Uuid::now_v7(),
            quantity: i32::MAX,
        };

        store.allocate_resource(allocate()).await.unwrap();
        let before = store.snapshot().await;

        let result = store.allocate_resource(allocate()).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.snapshot().await, before);
        assert_eq!(store.list_resources().await.unwrap()[0].quantity, -i32::MAX);
    }

    #[tokio::test]
    async fn deleting_resource_cascades_to_allocations() {
        let store = store().await;
        let water = store.create_resource(new_resource("Water", 100)).await.unwrap();
        let rice = store.create_resource(new_resource("Rice", 50)).await.unwrap();
        for (resource_id, quantity) in [(water.id, 10), (water.id, 5), (rice.id, 3)] {
            store
                .allocate_resource(NewAllocation {
                    resource_id,
                    request_id: Uuid::now_v7(),
                    quantity,
                })
                .await
                .unwrap();
        }

        store.delete_resource(water.id).await.unwrap();

        let remaining = store
            .list_allocations(AllocationFilter::default())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].resource_id, rice.id);
        assert!(store
            .snapshot()
            .await
            .allocations
            .iter()
            .all(|a| a.resource_id != water.id));
    }

    #[tokio::test]
    async fn allocation_against_unknown_resource_is_not_found() {
        let store = store().await;
        let result = store
            .allocate_resource(NewAllocation {
                resource_id: Uuid::now_v7(),
                request_id: Uuid::now_v7(),
                quantity: 1,
            })
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn status_update_stamps_updated_at() {
        let store = store().await;
        let request = store.create_request(new_request(Uuid::now_v7())).await.unwrap();
        assert_eq!(request.status, ReviewStatus::Pending);

        store
            .update_request(
                request.id,
                VictimRequestPatch {
                    status: Some(ReviewStatus::Approved),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = store
            .list_requests(RequestFilter::default())
            .await
            .unwrap()
            .remove(0)
            .request;
        assert_eq!(updated.status, ReviewStatus::Approved);
        assert!(updated.updated_at > request.updated_at);
        assert_eq!(updated.created_at, request.created_at);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = store().await;
        let id = Uuid::now_v7();

        assert!(matches!(
            store.update_request(id, VictimRequestPatch::default()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_resource(id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_report(id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update_user(id, UserPatch::default()).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn lists_are_newest_first() {
        let store = store().await;
        let first = store.create_resource(new_resource("First", 1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store.create_resource(new_resource("Second", 1)).await.unwrap();

        let ids: Vec<Uuid> = store
            .list_resources()
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn requests_carry_profile_or_none() {
        let store = store().await;
        let email: String = SafeEmail().fake();
        assert!(store.register(&email, "secret-pass", "Dewi", "0812").await);
        let user = store.current_user().await.unwrap();

        store.create_request(new_request(user.id)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        store.create_request(new_request(Uuid::now_v7())).await.unwrap();

        let requests = store.list_requests(RequestFilter::default()).await.unwrap();
        let profiles: Vec<Option<String>> = requests
            .iter()
            .map(|r| r.profile.as_ref().map(|p| p.name.clone()))
            .collect();
        assert_eq!(profiles, vec![None, Some("Dewi".to_string())]);
    }

    #[tokio::test]
    async fn volunteer_is_unique_per_user_and_disaster() {
        let store = store().await;
        let user_id = Uuid::now_v7();
        let disaster = store
            .create_disaster(NewDisaster {
                name: "Flood".to_string(),
                location: "Delta".to_string(),
                description: String::new(),
                severity: Severity::Critical,
                status: DisasterStatus::Active,
            })
            .await
            .unwrap();

        let volunteer = |disaster_id| NewVolunteer {
            user_id,
            disaster_id,
            skills: vec!["first aid".to_string()],
            availability: "weekends".to_string(),
            location: "Delta".to_string(),
            contact_info: "0812".to_string(),
        };

        store.create_volunteer(volunteer(Some(disaster.id))).await.unwrap();
        store.create_volunteer(volunteer(None)).await.unwrap();
        assert!(matches!(
            store.create_volunteer(volunteer(Some(disaster.id))).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn outreach_calls_are_logged_against_volunteers() {
        let store = store().await;
        let volunteer = store
            .create_volunteer(NewVolunteer {
                user_id: Uuid::now_v7(),
                disaster_id: None,
                skills: vec![],
                availability: "anytime".to_string(),
                location: "Delta".to_string(),
                contact_info: "0812".to_string(),
            })
            .await
            .unwrap();

        let call = store
            .create_call(NewVolunteerCall {
                volunteer_id: volunteer.id,
                disaster_id: None,
                called_by: Uuid::now_v7(),
                response_status: CallResponseStatus::Pending,
                notes: None,
            })
            .await
            .unwrap();
        store
            .update_call(
                call.id,
                VolunteerCallPatch {
                    response_status: Some(CallResponseStatus::Available),
                    notes: Some("Can leave tonight".to_string()),
                },
            )
            .await
            .unwrap();

        let calls = store
            .list_calls(CallFilter {
                volunteer_id: Some(volunteer.id),
                disaster_id: None,
            })
            .await
            .unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].response_status, CallResponseStatus::Available);
        assert_eq!(calls[0].called_at, call.called_at);
    }

    #[tokio::test]
    async fn deleting_posting_cascades_to_applications() {
        let store = store().await;
        let posting = store
            .create_posting(NewPosting {
                disaster_name: "Flood".to_string(),
                disaster_location: "Delta".to_string(),
                description: None,
                volunteers_needed: 5,
                priority_level: Severity::High,
                call_date: Utc::now().date_naive(),
                required_skills: vec!["boat".to_string()],
            })
            .await
            .unwrap();

        let user_id = Uuid::now_v7();
        let application = NewApplication {
            call_id: posting.id,
            user_id,
            notes: None,
        };
        store.create_application(application.clone()).await.unwrap();
        assert!(matches!(
            store.create_application(application).await,
            Err(StoreError::Conflict(_))
        ));

        store.delete_posting(posting.id).await.unwrap();
        assert!(store.list_postings().await.unwrap().is_empty());
        assert!(store
            .list_applications(ApplicationFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn snapshot_round_trips_across_restart() {
        let (store, storage) = store_with(AllocationPolicy::RejectOverdraw).await;
        assert!(store.register("ana@example.org", "pw-123456", "Ana", "0811").await);
        let user = store.current_user().await.unwrap();

        let fund = store.create_fundraiser(new_fundraiser("Flood Fund", 1000)).await.unwrap();
        store.record_donation(money(fund.id, Decimal::new(1999, 2))).await.unwrap();
        let water = store.create_resource(new_resource("Water", 100)).await.unwrap();
        let request = store.create_request(new_request(user.id)).await.unwrap();
        store
            .allocate_resource(NewAllocation {
                resource_id: water.id,
                request_id: request.id,
                quantity: 30,
            })
            .await
            .unwrap();
        store
            .create_report(NewReport {
                user_id: user.id,
                report: Sentence(5..10).fake(),
                report_type: Some("Field Report".to_string()),
                request_id: Some(request.id),
                volunteer_id: None,
            })
            .await
            .unwrap();

        let disaster = store
            .create_disaster(NewDisaster {
                name: "Flood".to_string(),
                location: "Delta".to_string(),
                description: Sentence(3..8).fake(),
                severity: Severity::High,
                status: DisasterStatus::Active,
            })
            .await
            .unwrap();
        let volunteer = store
            .create_volunteer(NewVolunteer {
                user_id: user.id,
                disaster_id: Some(disaster.id),
                skills: vec!["boat".to_string(), "first aid".to_string()],
                availability: "weekends".to_string(),
                location: "Delta".to_string(),
                contact_info: "0811".to_string(),
            })
            .await
            .unwrap();
        let call = store
            .create_call(NewVolunteerCall {
                volunteer_id: volunteer.id,
                disaster_id: Some(disaster.id),
                called_by: user.id,
                response_status: CallResponseStatus::Available,
                notes: Some("Ready at dawn".to_string()),
            })
            .await
            .unwrap();
        let posting = store
            .create_posting(NewPosting {
                disaster_name: disaster.name.clone(),
                disaster_location: disaster.location.clone(),
                description: None,
                volunteers_needed: 4,
                priority_level: Severity::Critical,
                call_date: Utc::now().date_naive(),
                required_skills: vec!["boat".to_string()],
            })
            .await
            .unwrap();
        let application = store
            .create_application(NewApplication {
                call_id: posting.id,
                user_id: user.id,
                notes: Some("Have a boat".to_string()),
            })
            .await
            .unwrap();

        let before = store.snapshot().await;
        let reopened: Arc<dyn SnapshotStorage> = storage;
        let restarted = LocalMirrorStore::open(reopened, AllocationPolicy::RejectOverdraw, vec![])
            .await
            .unwrap();

        assert_eq!(restarted.snapshot().await, before);
        assert_eq!(
            restarted.list_disasters(DisasterFilter::default()).await.unwrap(),
            vec![disaster]
        );
        let volunteers = restarted
            .list_volunteers(VolunteerFilter::default())
            .await
            .unwrap();
        assert_eq!(volunteers.len(), 1);
        assert_eq!(volunteers[0].volunteer, volunteer);
        assert_eq!(restarted.list_calls(CallFilter::default()).await.unwrap(), vec![call]);
        assert_eq!(restarted.list_postings().await.unwrap(), vec![posting]);
        assert_eq!(
            restarted
                .list_applications(ApplicationFilter::default())
                .await
                .unwrap(),
            vec![application]
        );
    }

    #[tokio::test]
    async fn failed_persist_leaves_state_and_storage_unchanged() {
        let (store, storage) = store_with(AllocationPolicy::RejectOverdraw).await;
        let fund = store.create_fundraiser(new_fundraiser("Flood Fund", 1000)).await.unwrap();
        let before = store.snapshot().await;

        storage.fail_writes_to(Some(CollectionKey::Fundraisers));
        let result = store.record_donation(money(fund.id, Decimal::from(10))).await;
        storage.fail_writes_to(None);

        assert!(matches!(result, Err(StoreError::Persistence(_))));
        assert_eq!(store.snapshot().await, before);

        let reopened = LocalMirrorStore::open(storage, AllocationPolicy::RejectOverdraw, vec![])
            .await
            .unwrap();
        assert_eq!(reopened.snapshot().await, before);
    }

    #[tokio::test]
    async fn malformed_snapshot_fails_open() {
        let storage = Arc::new(MemorySnapshotStorage::new());
        storage
            .set(CollectionKey::Resources, "{not json".to_string())
            .await
            .unwrap();

        let result = LocalMirrorStore::open(storage, AllocationPolicy::RejectOverdraw, vec![]).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
