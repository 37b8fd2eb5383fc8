//! Screen-level data hooks: load a collection, keep it with a loading flag,
//! and report outcomes as user-facing notifications.
//!
//! A failed load never propagates: it becomes an error notification and an
//! empty collection. A failed mutation becomes an error notification and
//! leaves the form as it was, so the user can retry.

use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::{StoreError, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Error notification with a message safe to show to the user.
    pub fn from_store_error(title: impl Into<String>, err: &StoreError) -> Self {
        let description = match err {
            StoreError::NotFound(msg) | StoreError::Validation(msg) | StoreError::Conflict(msg) => {
                msg.clone()
            }
            _ => "Something went wrong. Please try again.".to_string(),
        };
        Self::error(title, description)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log only.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!("{}: {}", notification.title, notification.description)
            }
            NotificationKind::Error => {
                tracing::warn!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

/// Keeps notifications so they can be returned alongside a response.
#[derive(Default)]
pub struct CollectingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Notification> {
        match self.notifications.lock() {
            Ok(mut notifications) => std::mem::take(&mut *notifications),
            Err(_) => Vec::new(),
        }
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        TracingNotifier.notify(notification.clone());
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification);
        }
    }
}

/// Draft of a create/edit dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState<D> {
    pub draft: D,
    pub open: bool,
}

impl<D: Default> FormState<D> {
    pub fn open_with(draft: D) -> Self {
        Self { draft, open: true }
    }

    pub fn reset(&mut self) {
        self.draft = D::default();
        self.open = false;
    }
}

type Fetcher<T> = Box<dyn Fn() -> BoxFuture<'static, StoreResult<Vec<T>>> + Send + Sync>;

pub struct ListViewModel<T> {
    label: String,
    items: Vec<T>,
    loading: bool,
    fetcher: Fetcher<T>,
    notifier: Arc<dyn Notifier>,
}

impl<T: Send + 'static> ListViewModel<T> {
    /// `label` names the collection in notifications ("requests", "fundraisers").
    pub fn from_fn<F, Fut>(label: impl Into<String>, fetch: F, notifier: Arc<dyn Notifier>) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StoreResult<Vec<T>>> + Send + 'static,
    {
        Self {
            label: label.into(),
            items: Vec::new(),
            loading: false,
            fetcher: Box::new(move || fetch().boxed()),
            notifier,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Initial fetch.
    pub async fn load(&mut self) {
        self.loading = true;
        match (self.fetcher)().await {
            Ok(items) => self.items = items,
            Err(e) => {
                self.notifier.notify(Notification::from_store_error(
                    format!("Failed to load {}", self.label),
                    &e,
                ));
                self.items = Vec::new();
            }
        }
        self.loading = false;
    }

    pub async fn refetch(&mut self) {
        self.load().await;
    }

    /// Run a mutation built from the form draft. On success: notify, reset
    /// the form, refetch. On failure: notify and keep the form.
    pub async fn submit<D, R, Op, Fut>(
        &mut self,
        form: &mut FormState<D>,
        op: Op,
        success_message: &str,
    ) -> Option<R>
    where
        D: Clone + Default,
        Op: FnOnce(D) -> Fut,
        Fut: Future<Output = StoreResult<R>>,
    {
        let result = op(form.draft.clone()).await;
        let outcome = self.settle(result, success_message);
        if outcome.is_some() {
            form.reset();
            self.refetch().await;
        }
        outcome
    }

    /// Run a mutation that has no form (status change, delete).
    pub async fn run<R, Fut>(&mut self, op: Fut, success_message: &str) -> Option<R>
    where
        Fut: Future<Output = StoreResult<R>>,
    {
        let outcome = self.settle(op.await, success_message);
        if outcome.is_some() {
            self.refetch().await;
        }
        outcome
    }

    fn settle<R>(&self, result: StoreResult<R>, success_message: &str) -> Option<R> {
        match result {
            Ok(value) => {
                self.notifier
                    .notify(Notification::success("Success", success_message));
                Some(value)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::from_store_error("Error", &e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio_test::assert_ok;

    use super::*;

    fn counting_fetch(
        calls: Arc<AtomicUsize>,
        fail: bool,
    ) -> impl Fn() -> BoxFuture<'static, StoreResult<Vec<u32>>> + Send + Sync + 'static {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) as u32;
            async move {
                if fail {
                    Err(StoreError::Persistence("offline".to_string()))
                } else {
                    Ok(vec![n; (n + 1) as usize])
                }
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn load_replaces_items_and_clears_loading() {
        let notifier = Arc::new(CollectingNotifier::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let mut vm = ListViewModel::from_fn("numbers", counting_fetch(calls.clone(), false), notifier.clone());

        vm.load().await;
        assert_eq!(vm.items(), &[0]);
        assert!(!vm.is_loading());

        vm.refetch().await;
        assert_eq!(vm.items(), &[1, 1]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(notifier.take().is_empty());
    }

    #[tokio::test]
    async fn failed_load_notifies_and_falls_back_to_empty() {
        let notifier = Arc::new(CollectingNotifier::new());
        let mut vm = ListViewModel::from_fn(
            "requests",
            counting_fetch(Arc::new(AtomicUsize::new(0)), true),
            notifier.clone(),
        );

        vm.load().await;

        assert!(vm.items().is_empty());
        assert!(!vm.is_loading());
        let notes = notifier.take();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(notes[0].title, "Failed to load requests");
        assert_eq!(notes[0].description, "Something went wrong. Please try again.");
    }

    #[tokio::test]
    async fn successful_submit_resets_form_and_refetches() {
        let notifier = Arc::new(CollectingNotifier::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let mut vm = ListViewModel::from_fn("numbers", counting_fetch(calls.clone(), false), notifier.clone());
        let mut form = FormState::open_with("Water".to_string());

        let created = vm
            .submit(
                &mut form,
                |draft| async move { Ok::<_, StoreError>(draft.len()) },
                "Resource added",
            )
            .await;

        assert_eq!(created, Some(5));
        assert_eq!(form, FormState::default());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.take(), vec![Notification::success("Success", "Resource added")]);
    }

    #[tokio::test]
    async fn failed_submit_keeps_form_for_retry() {
        let notifier = Arc::new(CollectingNotifier::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let mut vm = ListViewModel::from_fn("numbers", counting_fetch(calls.clone(), false), notifier.clone());
        let mut form = FormState::open_with("dup@example.org".to_string());

        let result = vm
            .submit(
                &mut form,
                |_draft| async {
                    Err::<(), _>(StoreError::Conflict("Email already registered".to_string()))
                },
                "Registered",
            )
            .await;

        assert_eq!(result, None);
        assert!(form.open);
        assert_eq!(form.draft, "dup@example.org");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let notes = notifier.take();
        assert_eq!(notes[0].description, "Email already registered");
    }

    #[tokio::test]
    async fn run_refetches_after_success() {
        let notifier = Arc::new(CollectingNotifier::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let mut vm = ListViewModel::from_fn("numbers", counting_fetch(calls.clone(), false), notifier);

        let outcome = vm.run(async { Ok::<_, StoreError>(()) }, "Deleted").await;
        assert_ok!(outcome.ok_or(()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
