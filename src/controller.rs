use crate::error::SearchError;
use crate::model::{PriceStats, Product, SearchResult, SortKey};
use crate::transform;

/// The current phase of the fetch/display lifecycle. Exactly one is current
/// at any time. The retained result lives next to it in the controller so a
/// `Failed` or `Idle` phase can keep the previous listings on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    Idle,
    Loading,
    Success,
    Failed(SearchError),
}

/// A pending fetch handed back by `submit`: the trimmed keyword to query for
/// and the generation token to pass to `complete_fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub keyword: String,
    pub generation: u64,
}

/// The listings in display order together with the derived price stats,
/// re-computed from the retained result on every call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResultView {
    pub keyword: String,
    pub products: Vec<Product>,
    pub stats: Option<PriceStats>,
}

/// Owns the pipeline state and sequences validation, fetching and display
/// derivation. Only this type writes the state; the validator, client and
/// transformer communicate with it purely through return values.
///
/// Each accepted submit bumps a generation counter and only the response
/// carrying the current generation may update state, so re-submitting while
/// a fetch is in flight is cancel-and-replace: the stale response is dropped
/// on arrival instead of racing the newer one.
#[derive(Debug)]
pub struct StateController {
    state: PipelineState,
    result: Option<SearchResult>,
    sort_key: SortKey,
    generation: u64,
}

impl StateController {
    pub fn new(sort_key: SortKey) -> Self {
        StateController {
            state: PipelineState::Idle,
            result: None,
            sort_key,
            generation: 0,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Validate the keyword and, if accepted, enter `Loading`. Rejection
    /// sets `Failed(EmptyKeyword)` without issuing a request and leaves the
    /// previously displayed result untouched.
    pub fn submit(&mut self, keyword: &str) -> Option<PendingSearch> {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            self.state = PipelineState::Failed(SearchError::EmptyKeyword);
            return None;
        }

        self.generation += 1;
        self.state = PipelineState::Loading;
        tracing::debug!("Submitted search #{} for \"{}\"", self.generation, trimmed);

        Some(PendingSearch {
            keyword: trimmed.to_string(),
            generation: self.generation,
        })
    }

    /// Apply a fetch outcome. Outcomes from superseded generations are
    /// dropped. Success stores a fresh result that wholly replaces the old
    /// one; failure keeps the old result and only flips the state.
    pub fn complete_fetch(
        &mut self,
        pending: &PendingSearch,
        outcome: Result<Vec<Product>, SearchError>,
    ) {
        if pending.generation != self.generation {
            tracing::debug!(
                "Dropping stale response #{} (current is #{})",
                pending.generation,
                self.generation
            );
            return;
        }

        match outcome {
            Ok(products) => {
                self.result = Some(SearchResult {
                    keyword: pending.keyword.clone(),
                    products,
                });
                self.state = PipelineState::Success;
            }
            Err(err) => {
                tracing::warn!("Search #{} failed: {}", pending.generation, err);
                self.state = PipelineState::Failed(err);
            }
        }
    }

    /// Keyword edits return to `Idle`, clearing the current error but not
    /// the displayed result. Any in-flight fetch is invalidated so a late
    /// response cannot resurrect the superseded search.
    pub fn edit_keyword(&mut self) {
        self.generation += 1;
        self.state = PipelineState::Idle;
    }

    /// Change the ordering criterion. The view is re-derived on the next
    /// `view()` call; no re-fetch happens and the state does not change.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    /// Derive the current display: listings sorted by the active key plus
    /// price stats, both recomputed from the retained result.
    pub fn view(&self) -> Option<ResultView> {
        self.result.as_ref().map(|result| ResultView {
            keyword: result.keyword.clone(),
            products: transform::sort_products(&result.products, self.sort_key),
            stats: transform::price_stats(&result.products),
        })
    }
}
