//! Catalog search session: initial search, load-more and retry.
//!
//! The session drives a [`CatalogProvider`] and writes each page into the
//! store through the reducer. It remembers the last request it attempted so
//! a failed search or load-more can be resubmitted unchanged.

use geomarket_core::error::{MarketError, Result};
use geomarket_core::models::CatalogSearchRequest;
use geomarket_core::ports::CatalogProvider;
use tracing::{info, warn};

use crate::draft::OrderDraft;
use crate::store::{OrderAction, OrderStore};

/// How a page of results is merged into the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Replace the result list
    Initial,
    /// Append to the result list
    LoadMore,
}

/// A request together with how its response is merged
#[derive(Debug, Clone, PartialEq)]
pub struct SearchAttempt {
    pub kind: SearchKind,
    pub request: CatalogSearchRequest,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    /// The last attempt failed; [`SearchSession::retry`] resubmits it
    Failed { reason: String },
}

pub struct SearchSession<C: CatalogProvider> {
    catalog: C,
    status: SearchStatus,
    last_attempt: Option<SearchAttempt>,
}

impl<C: CatalogProvider> SearchSession<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog, status: SearchStatus::Idle, last_attempt: None }
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn last_attempt(&self) -> Option<&SearchAttempt> {
        self.last_attempt.as_ref()
    }

    /// Whether the last attempt failed and can be retried
    pub fn can_retry(&self) -> bool {
        matches!(self.status, SearchStatus::Failed { .. }) && self.last_attempt.is_some()
    }

    /// First page for the draft's area of interest and search form
    pub fn initial_request(draft: &OrderDraft) -> CatalogSearchRequest {
        let bbox = draft.area_of_interest().map(|aoi| aoi.bbox());
        CatalogSearchRequest::from_params(draft.search_params(), bbox)
    }

    /// Next page: same filters, offset by the number of loaded results
    pub fn load_more_request(draft: &OrderDraft) -> CatalogSearchRequest {
        Self::initial_request(draft).at_offset(draft.results().len())
    }

    /// Run a new search, replacing the current results.
    ///
    /// Returns the number of scenes received.
    pub async fn search(&mut self, store: &mut OrderStore) -> Result<usize> {
        let request = Self::initial_request(store.draft());
        self.run(store, SearchAttempt { kind: SearchKind::Initial, request }).await
    }

    /// Fetch the next page and append it. A no-op when everything is loaded.
    pub async fn load_more(&mut self, store: &mut OrderStore) -> Result<usize> {
        if !store.draft().has_more_results() {
            return Ok(0);
        }
        let request = Self::load_more_request(store.draft());
        self.run(store, SearchAttempt { kind: SearchKind::LoadMore, request }).await
    }

    /// Resubmit the exact request that last failed
    pub async fn retry(&mut self, store: &mut OrderStore) -> Result<usize> {
        if !self.can_retry() {
            return Err(MarketError::NothingToRetry);
        }
        let attempt = self.last_attempt.clone().ok_or(MarketError::NothingToRetry)?;
        self.run(store, attempt).await
    }

    async fn run(&mut self, store: &mut OrderStore, attempt: SearchAttempt) -> Result<usize> {
        self.status = SearchStatus::Loading;
        self.last_attempt = Some(attempt.clone());

        info!(
            provider = self.catalog.provider_name(),
            kind = ?attempt.kind,
            offset = attempt.request.offset.unwrap_or(0),
            limit = attempt.request.limit,
            "Searching catalog"
        );

        let response = match self.catalog.search(&attempt.request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Catalog search failed");
                self.status = SearchStatus::Failed { reason: e.to_string() };
                return Err(e);
            }
        };

        let received = response.features.len();
        let total_matched = response.number_matched;
        let action = match attempt.kind {
            SearchKind::Initial => {
                OrderAction::ReplaceResults { scenes: response.features, total_matched }
            }
            SearchKind::LoadMore => {
                OrderAction::AppendResults { scenes: response.features, total_matched }
            }
        };
        store.dispatch(action)?;
        self.status = SearchStatus::Idle;

        info!(received, total_matched, loaded = store.draft().results().len(), "Catalog page merged");
        Ok(received)
    }
}
