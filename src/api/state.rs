//! Application state for the API server.

use std::sync::Arc;

use crate::auth::{AuthNotifier, AuthProvider};
use crate::context::PortalContext;
use crate::services::scraper::{JobScraper, PartnerBoardSource};
use crate::store::Store;

/// Shared application state.
///
/// Generic over the store and the identity provider so tests can run the
/// whole router against in-memory implementations.
pub struct AppState<S: Store, A: AuthProvider> {
    store: Arc<S>,
    auth: Arc<A>,
    notifier: AuthNotifier,
    context: Arc<PortalContext<S>>,
    scraper: Arc<JobScraper<PartnerBoardSource>>,
    store_configured: bool,
}

// Manual Clone impl - only the Arcs are cloned, S and A need not be Clone
impl<S: Store, A: AuthProvider> Clone for AppState<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            auth: Arc::clone(&self.auth),
            notifier: self.notifier.clone(),
            context: Arc::clone(&self.context),
            scraper: Arc::clone(&self.scraper),
            store_configured: self.store_configured,
        }
    }
}

impl<S: Store, A: AuthProvider> AppState<S, A> {
    /// Create a new AppState. The context shares `store`.
    pub fn new(store: S, auth: A, notifier: AuthNotifier, store_configured: bool) -> Self {
        let store = Arc::new(store);
        Self {
            context: Arc::new(PortalContext::new(Arc::clone(&store))),
            store,
            auth: Arc::new(auth),
            notifier,
            scraper: Arc::new(JobScraper::partner_boards()),
            store_configured,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn notifier(&self) -> &AuthNotifier {
        &self.notifier
    }

    pub fn context(&self) -> &Arc<PortalContext<S>> {
        &self.context
    }

    pub fn scraper(&self) -> &JobScraper<PartnerBoardSource> {
        &self.scraper
    }

    /// Whether hosted store credentials were supplied.
    pub fn store_configured(&self) -> bool {
        self.store_configured
    }
}
