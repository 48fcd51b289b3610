//! Application context.
//!
//! One [`PortalContext`] is built at startup and shared by every caller. It
//! holds the signed-in user, their match profile and the cached first pages
//! of jobs, housing and matches, each with its own loading and error state.
//!
//! Every list load takes a generation number when it starts. A response is
//! only written back if no newer load of the same list has started since, so
//! a slow, stale request can never overwrite fresher results.

use std::sync::Arc;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::auth::{AuthEvent, AuthNotifier, Session, User};
use crate::services::{housing, jobs, matchmaking};
use crate::store::{
    HousingFilter, Job, JobFilter, MatchPreference, MatchProfile, Page, PageRequest,
    ProfileUpdate, SeniorLiving, Store, StoreError,
};

#[cfg(test)]
mod context_test;

/// Items per cached page.
pub const PAGE_SIZE: usize = 5;

pub const JOBS_ERROR: &str = "Failed to load jobs. Please try again later.";
pub const HOUSING_ERROR: &str = "Failed to load senior living options. Please try again later.";
pub const MATCHES_ERROR: &str = "Failed to find matches. Please try again later.";

#[derive(Error, Diagnostic, Debug)]
pub enum ContextError {
    #[error("Please sign in to save your profile")]
    #[diagnostic(code(portal::context::sign_in_required))]
    SignInRequired,

    #[error("Failed to save profile: {0}")]
    #[diagnostic(code(portal::context::store))]
    Store(#[from] StoreError),
}

/// A cached list as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub total_pages: usize,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            loading: false,
            error: None,
            total_pages: 0,
        }
    }
}

/// A list plus the generation of its newest load.
struct Tracked<T> {
    state: ListState<T>,
    generation: u64,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            state: ListState::default(),
            generation: 0,
        }
    }
}

impl<T: Clone> Tracked<T> {
    /// Mark a load as started and return its generation.
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;
        self.generation
    }

    /// Store the outcome of load `generation`; ignored if a newer load began.
    fn finish(&mut self, generation: u64, outcome: Result<Page<T>, String>) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "Dropping stale response");
            return false;
        }
        self.state.loading = false;
        match outcome {
            Ok(page) => {
                self.state.page = page.page;
                self.state.total_pages = page.total_pages;
                self.state.items = page.items;
            }
            Err(message) => self.state.error = Some(message),
        }
        true
    }
}

#[derive(Default)]
struct Inner {
    session: Option<Session>,
    profile: Option<MatchProfile>,
    jobs: Tracked<Job>,
    housing: Tracked<SeniorLiving>,
    matches: Tracked<MatchProfile>,
}

/// Point-in-time copy of the context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContextSnapshot {
    pub user: Option<User>,
    pub profile: Option<MatchProfile>,
    pub jobs: ListState<Job>,
    pub housing: ListState<SeniorLiving>,
    pub matches: ListState<MatchProfile>,
}

/// Tears down the auth subscription when stopped or dropped.
pub struct ListenerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl ListenerHandle {
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && !self.task.is_finished()
    }

    /// Cancel the subscription and wait for it to wind down.
    pub async fn stop(mut self) {
        self.token.cancel();
        let _ = (&mut self.task).await;
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

pub struct PortalContext<S: Store> {
    store: Arc<S>,
    inner: RwLock<Inner>,
    subscription: Mutex<Option<CancellationToken>>,
}

impl<S: Store> PortalContext<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            inner: RwLock::new(Inner::default()),
            subscription: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the first page of jobs and housing.
    pub async fn mount(&self) {
        info!("Loading initial listings");
        let job_filter = JobFilter::default();
        let housing_filter = HousingFilter::default();
        tokio::join!(
            self.fetch_jobs_with_filters(1, &job_filter),
            self.fetch_housing_with_filters(1, &housing_filter),
        );
    }

    pub async fn fetch_jobs_with_filters(&self, page: usize, filter: &JobFilter) -> ListState<Job> {
        let generation = self.inner.write().await.jobs.begin();
        let outcome = match PageRequest::new(page, PAGE_SIZE) {
            Ok(request) => jobs::fetch_jobs(&*self.store, &request, filter)
                .await
                .map_err(|_| JOBS_ERROR.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let mut inner = self.inner.write().await;
        inner.jobs.finish(generation, outcome);
        inner.jobs.state.clone()
    }

    pub async fn fetch_housing_with_filters(
        &self,
        page: usize,
        filter: &HousingFilter,
    ) -> ListState<SeniorLiving> {
        let generation = self.inner.write().await.housing.begin();
        let outcome = match PageRequest::new(page, PAGE_SIZE) {
            Ok(request) => housing::fetch_senior_livings(&*self.store, &request, filter)
                .await
                .map_err(|_| HOUSING_ERROR.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let mut inner = self.inner.write().await;
        inner.housing.finish(generation, outcome);
        inner.housing.state.clone()
    }

    pub async fn find_matches_with_preferences(
        &self,
        preference: &MatchPreference,
        page: usize,
    ) -> ListState<MatchProfile> {
        let generation = self.inner.write().await.matches.begin();
        let outcome = match PageRequest::new(page, PAGE_SIZE) {
            Ok(request) => matchmaking::find_matches(&*self.store, preference, &request)
                .await
                .map_err(|_| MATCHES_ERROR.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let mut inner = self.inner.write().await;
        inner.matches.finish(generation, outcome);
        inner.matches.state.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.read().await.session.as_ref().map(|s| s.user.clone())
    }

    pub async fn session(&self) -> Option<Session> {
        self.inner.read().await.session.clone()
    }

    pub async fn profile(&self) -> Option<MatchProfile> {
        self.inner.read().await.profile.clone()
    }

    /// Save the signed-in user's profile and cache the stored version.
    pub async fn save_profile(&self, update: ProfileUpdate) -> Result<MatchProfile, ContextError> {
        let user = self.user().await.ok_or(ContextError::SignInRequired)?;
        let saved = matchmaking::save_user_profile(&*self.store, update, &user.id).await?;
        let mut inner = self.inner.write().await;
        // The user may have signed out while the save was in flight.
        if inner.session.as_ref().is_some_and(|s| s.user.id == user.id) {
            inner.profile = Some(saved.clone());
        }
        Ok(saved)
    }

    /// Apply a session change. Returns false when it changes nothing.
    pub async fn apply(&self, event: &AuthEvent) -> bool {
        match event {
            AuthEvent::SignedIn { session } => {
                {
                    let mut inner = self.inner.write().await;
                    if inner.session.as_ref() == Some(session) {
                        return false;
                    }
                    inner.session = Some(session.clone());
                    inner.profile = None;
                }
                info!(user_id = %session.user.id, "User signed in");
                let profile = matchmaking::get_user_profile(&*self.store, &session.user.id)
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Error loading user profile");
                        None
                    });
                let mut inner = self.inner.write().await;
                if inner.session.as_ref() == Some(session) {
                    inner.profile = profile;
                }
                true
            }
            AuthEvent::SignedOut => {
                let mut inner = self.inner.write().await;
                if inner.session.is_none() {
                    return false;
                }
                inner.session = None;
                inner.profile = None;
                info!("User signed out");
                true
            }
        }
    }

    pub async fn snapshot(&self) -> ContextSnapshot {
        let inner = self.inner.read().await;
        ContextSnapshot {
            user: inner.session.as_ref().map(|s| s.user.clone()),
            profile: inner.profile.clone(),
            jobs: inner.jobs.state.clone(),
            housing: inner.housing.state.clone(),
            matches: inner.matches.state.clone(),
        }
    }

    /// Follow session changes published on `notifier`.
    ///
    /// Only one subscription exists at a time; starting a new one cancels the
    /// previous.
    pub async fn listen(self: &Arc<Self>, notifier: &AuthNotifier) -> ListenerHandle {
        let token = CancellationToken::new();
        if let Some(previous) = self.subscription.lock().await.replace(token.clone()) {
            previous.cancel();
        }

        let mut rx = notifier.subscribe();
        let context = Arc::clone(self);
        let cancelled = token.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(event) => {
                            context.apply(&event).await;
                        }
                        Err(RecvError::Lagged(missed)) => {
                            warn!(missed, "Auth subscription lagged");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            debug!("Auth subscription stopped");
        });

        ListenerHandle { token, task }
    }
}
