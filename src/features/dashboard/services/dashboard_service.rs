use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use crate::features::dashboard::dtos::{
    DashboardOverviewDto, RequestReviewDto, ResourceQuickAddDto,
};
use crate::features::disasters::models::{DisasterFilter, DisasterStatus};
use crate::features::fundraisers::models::DonationFilter;
use crate::features::reports::models::ReportFilter;
use crate::features::requests::models::{RequestFilter, VictimRequestPatch, VictimRequestWithProfile};
use crate::features::resources::models::{NewResource, Resource};
use crate::features::volunteers::models::{VolunteerFilter, VolunteerStatus};
use crate::shared::status::ReviewStatus;
use crate::shared::view_model::{CollectingNotifier, FormState, ListViewModel, Notifier};
use crate::store::{ReliefStore, StoreError, StoreResult};

pub struct DashboardService {
    store: Arc<dyn ReliefStore>,
}

/// Load one collection through its own view model. Failures become a
/// notice on `notifier` and an empty list.
async fn collection<T, F, Fut>(label: &str, fetch: F, notifier: Arc<dyn Notifier>) -> Vec<T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = StoreResult<Vec<T>>> + Send + 'static,
{
    let mut vm = ListViewModel::from_fn(label, fetch, notifier);
    vm.load().await;
    vm.into_items()
}

fn count<T>(items: &[T], pred: impl Fn(&T) -> bool) -> i64 {
    items.iter().filter(|item| pred(item)).count() as i64
}

impl DashboardService {
    pub fn new(store: Arc<dyn ReliefStore>) -> Self {
        Self { store }
    }

    fn resources_view(&self, notifier: Arc<dyn Notifier>) -> ListViewModel<Resource> {
        let store = self.store.clone();
        ListViewModel::from_fn(
            "resources",
            move || {
                let store = store.clone();
                async move { store.list_resources().await }
            },
            notifier,
        )
    }

    fn requests_view(&self, notifier: Arc<dyn Notifier>) -> ListViewModel<VictimRequestWithProfile> {
        let store = self.store.clone();
        ListViewModel::from_fn(
            "requests",
            move || {
                let store = store.clone();
                async move { store.list_requests(RequestFilter::default()).await }
            },
            notifier,
        )
    }

    /// Add stock from the overview's inventory tab.
    pub async fn quick_add_resource(&self, draft: NewResource) -> ResourceQuickAddDto {
        let notifier = Arc::new(CollectingNotifier::new());
        let mut vm = self.resources_view(notifier.clone());
        vm.load().await;

        let mut form = FormState::open_with(draft);
        let store = self.store.clone();
        let created = vm
            .submit(
                &mut form,
                |new| async move { store.create_resource(new).await },
                "Resource added",
            )
            .await;

        ResourceQuickAddDto {
            created: created.map(Into::into),
            resources: vm.into_items().into_iter().map(Into::into).collect(),
            notices: notifier.take(),
        }
    }

    /// Status change from the overview's request tab. Follows the same
    /// transitions as the request triage endpoint.
    pub async fn review_request(&self, id: Uuid, status: ReviewStatus) -> RequestReviewDto {
        let notifier = Arc::new(CollectingNotifier::new());
        let mut vm = self.requests_view(notifier.clone());
        vm.load().await;

        let current = vm
            .items()
            .iter()
            .find(|r| r.request.id == id)
            .map(|r| r.request.status);
        let store = self.store.clone();
        let change = async move {
            let current = current.ok_or_else(|| StoreError::not_found("Request", id))?;
            if !current.can_transition_to(status) {
                return Err(StoreError::Conflict(format!(
                    "Cannot move request from {} to {}",
                    current, status
                )));
            }
            let patch = VictimRequestPatch {
                status: Some(status),
                ..Default::default()
            };
            store.update_request(id, patch).await
        };
        let updated = vm.run(change, "Request status updated").await.is_some();

        RequestReviewDto {
            updated,
            requests: vm.into_items().into_iter().map(Into::into).collect(),
            notices: notifier.take(),
        }
    }

    pub async fn overview(&self) -> DashboardOverviewDto {
        let notifier = Arc::new(CollectingNotifier::new());
        let sink: Arc<dyn Notifier> = notifier.clone();

        let users = {
            let store = self.store.clone();
            collection(
                "users",
                move || {
                    let store = store.clone();
                    async move { store.list_users().await }
                },
                sink.clone(),
            )
        };
        let disasters = {
            let store = self.store.clone();
            collection(
                "disasters",
                move || {
                    let store = store.clone();
                    async move { store.list_disasters(DisasterFilter::default()).await }
                },
                sink.clone(),
            )
        };
        let requests = {
            let store = self.store.clone();
            collection(
                "requests",
                move || {
                    let store = store.clone();
                    async move { store.list_requests(RequestFilter::default()).await }
                },
                sink.clone(),
            )
        };
        let volunteers = {
            let store = self.store.clone();
            collection(
                "volunteers",
                move || {
                    let store = store.clone();
                    async move { store.list_volunteers(VolunteerFilter::default()).await }
                },
                sink.clone(),
            )
        };
        let resources = {
            let store = self.store.clone();
            collection(
                "resources",
                move || {
                    let store = store.clone();
                    async move { store.list_resources().await }
                },
                sink.clone(),
            )
        };
        let fundraisers = {
            let store = self.store.clone();
            collection(
                "fundraisers",
                move || {
                    let store = store.clone();
                    async move { store.list_fundraisers().await }
                },
                sink.clone(),
            )
        };
        let donations = {
            let store = self.store.clone();
            collection(
                "donations",
                move || {
                    let store = store.clone();
                    async move { store.list_donations(DonationFilter::default()).await }
                },
                sink.clone(),
            )
        };
        let reports = {
            let store = self.store.clone();
            collection(
                "reports",
                move || {
                    let store = store.clone();
                    async move { store.list_reports(ReportFilter::default()).await }
                },
                sink.clone(),
            )
        };

        let (users, disasters, requests, volunteers, resources, fundraisers, donations, reports) = tokio::join!(
            users,
            disasters,
            requests,
            volunteers,
            resources,
            fundraisers,
            donations,
            reports
        );

        let overview = DashboardOverviewDto {
            total_users: users.len() as i64,
            active_users: count(&users, |u| u.is_active),
            active_disasters: count(&disasters, |d| d.status == DisasterStatus::Active),
            total_requests: requests.len() as i64,
            pending_requests: count(&requests, |r| r.request.status == ReviewStatus::Pending),
            total_volunteers: volunteers.len() as i64,
            active_volunteers: count(&volunteers, |v| {
                v.volunteer.status == VolunteerStatus::Active
            }),
            total_resources: resources.len() as i64,
            out_of_stock_resources: count(&resources, |r| r.quantity <= 0),
            total_fundraisers: fundraisers.len() as i64,
            pending_fundraisers: count(&fundraisers, |f| f.status == ReviewStatus::Pending),
            total_donations: donations.len() as i64,
            total_reports: reports.len() as i64,
            notices: notifier.take(),
        };
        tracing::debug!(
            "Dashboard overview built with {} notice(s)",
            overview.notices.len()
        );
        overview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::requests::models::NewVictimRequest;
    use crate::shared::status::Severity;
    use crate::shared::test_helpers::memory_store;
    use crate::shared::view_model::{Notification, NotificationKind};
    use crate::store::{ResourceStore, SessionStore, VictimRequestStore};

    fn water() -> NewResource {
        NewResource {
            name: "Water".to_string(),
            quantity: 40,
            unit: "liters".to_string(),
            category: "Water".to_string(),
        }
    }

    #[tokio::test]
    async fn overview_counts_each_collection() {
        let store = memory_store().await;
        assert!(store.register("ani@example.org", "secret1", "Ani", "0811").await);
        for (name, quantity) in [("Rice", 0), ("Tents", 12)] {
            store
                .create_resource(NewResource {
                    name: name.to_string(),
                    quantity,
                    unit: "units".to_string(),
                    category: "General".to_string(),
                })
                .await
                .unwrap();
        }

        let overview = DashboardService::new(store).overview().await;

        assert_eq!(overview.total_users, 1);
        assert_eq!(overview.active_users, 1);
        assert_eq!(overview.total_resources, 2);
        assert_eq!(overview.out_of_stock_resources, 1);
        assert_eq!(overview.total_requests, 0);
        assert!(overview.notices.is_empty());
    }

    #[tokio::test]
    async fn failing_collection_degrades_to_empty_with_notice() {
        let notifier = Arc::new(CollectingNotifier::new());
        let sink: Arc<dyn Notifier> = notifier.clone();

        let (healthy, broken) = tokio::join!(
            collection("disasters", || async { Ok(vec![1, 2, 3]) }, sink.clone()),
            collection(
                "fundraisers",
                || async { Err::<Vec<u8>, _>(StoreError::Persistence("timeout".to_string())) },
                sink.clone(),
            ),
        );

        assert_eq!(healthy.len(), 3);
        assert!(broken.is_empty());
        let notices = notifier.take();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NotificationKind::Error);
        assert_eq!(notices[0].title, "Failed to load fundraisers");
    }

    #[tokio::test]
    async fn quick_add_returns_refreshed_inventory() {
        let store = memory_store().await;
        store.create_resource(water()).await.unwrap();
        let service = DashboardService::new(store);

        let mut blankets = water();
        blankets.name = "Blankets".to_string();
        let outcome = service.quick_add_resource(blankets).await;

        let created = outcome.created.unwrap();
        assert_eq!(created.name, "Blankets");
        assert_eq!(outcome.resources.len(), 2);
        assert!(outcome.resources.iter().any(|r| r.id == created.id));
        assert_eq!(
            outcome.notices,
            vec![Notification::success("Success", "Resource added")]
        );
    }

    #[tokio::test]
    async fn review_moves_request_and_refetches() {
        let store = memory_store().await;
        let request = store
            .create_request(NewVictimRequest {
                user_id: Uuid::now_v7(),
                name: "Pak Harun".to_string(),
                location: "Riverside".to_string(),
                description: "Roof collapsed".to_string(),
                urgency: Severity::High,
                status: ReviewStatus::Pending,
            })
            .await
            .unwrap();
        let service = DashboardService::new(store);

        let outcome = service.review_request(request.id, ReviewStatus::Approved).await;
        assert!(outcome.updated);
        assert_eq!(outcome.requests[0].status, ReviewStatus::Approved);
        assert_eq!(outcome.notices[0].kind, NotificationKind::Success);

        let refused = service.review_request(request.id, ReviewStatus::Pending).await;
        assert!(!refused.updated);
        assert_eq!(refused.requests[0].status, ReviewStatus::Approved);
        assert_eq!(refused.notices.len(), 1);
        assert_eq!(refused.notices[0].kind, NotificationKind::Error);
        assert_eq!(refused.notices[0].description, "Cannot move request from approved to pending");
    }

    #[tokio::test]
    async fn review_of_unknown_request_is_a_notice() {
        let service = DashboardService::new(memory_store().await);

        let outcome = service.review_request(Uuid::now_v7(), ReviewStatus::Approved).await;
        assert!(!outcome.updated);
        assert!(outcome.requests.is_empty());
        assert_eq!(outcome.notices[0].kind, NotificationKind::Error);
        assert!(outcome.notices[0].description.starts_with("Request '"));
    }
}
