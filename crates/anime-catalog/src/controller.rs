//! Search and pagination state for the anime browser.
//!
//! The controller owns what the screen shows: the popular list fetched on
//! mount, the accumulated results of the current search, and the item picked
//! for the detail view. Methods take `&self` so several tasks can trigger
//! them; the state mutex is never held across a request.
//!
//! Every fresh operation (mount, new search, clearing the search) starts a new
//! generation for its list. A response that lands after a newer generation
//! started is dropped, so the last request issued always wins.

use crate::api::{AnimeEntry, CatalogApi, CatalogError, PaginatedResponse};
use crate::clock::{Clock, SystemClock};
use shared::Translations;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// How long a closed detail view keeps its item (exit animation)
pub const DEFAULT_SELECTION_LINGER: Duration = Duration::from_millis(300);

/// Coarse state of the current screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Which user-facing error message applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Load,
    Search,
}

impl ErrorKind {
    pub fn message(self, t: &Translations) -> &'static str {
        match self {
            ErrorKind::Load => t.load_error,
            ErrorKind::Search => t.search_error,
        }
    }
}

/// Operation that failed and would be repeated by a retry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedOperation {
    Mount,
    Search(String),
}

impl FailedOperation {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FailedOperation::Mount => ErrorKind::Load,
            FailedOperation::Search(_) => ErrorKind::Search,
        }
    }
}

/// What the results area should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Idle,
    Loading,
    Error(ErrorKind),
    /// The search finished with zero matches
    Empty,
    Results,
}

/// Snapshot of the browsing state
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    /// Active search text (empty = showing the popular list)
    pub query: String,
    /// Last search page appended
    pub page: u32,
    /// Accumulated search results
    pub results: Vec<AnimeEntry>,
    /// Popular list fetched on mount
    pub popular: Vec<AnimeEntry>,
    pub has_next_page: bool,
    /// A search or load-more request is outstanding
    pub in_flight: bool,
    pub failure: Option<FailedOperation>,
    popular_loading: bool,
    popular_loaded: bool,
    search_loaded: bool,
}

impl QueryState {
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn phase(&self) -> Phase {
        if self.failure.is_some() {
            return Phase::Error;
        }

        if self.is_searching() {
            if self.search_loaded {
                Phase::Loaded
            } else if self.in_flight {
                Phase::Loading
            } else {
                Phase::Idle
            }
        } else if self.popular_loading {
            Phase::Loading
        } else if self.popular_loaded {
            Phase::Loaded
        } else {
            Phase::Idle
        }
    }

    /// Items the grid shows right now
    pub fn displayed(&self) -> &[AnimeEntry] {
        if self.is_searching() {
            &self.results
        } else {
            &self.popular
        }
    }

    pub fn view(&self) -> View {
        match self.phase() {
            Phase::Idle => View::Idle,
            Phase::Loading => View::Loading,
            Phase::Error => View::Error(
                self.failure
                    .as_ref()
                    .map_or(ErrorKind::Load, FailedOperation::kind),
            ),
            Phase::Loaded if self.is_searching() && self.results.is_empty() => View::Empty,
            Phase::Loaded => View::Results,
        }
    }

    /// Whether a load-more would do anything
    pub fn can_load_more(&self) -> bool {
        self.is_searching() && self.has_next_page && !self.in_flight
    }
}

#[derive(Debug, Default)]
struct Selection {
    item: Option<AnimeEntry>,
    open: bool,
    closed_at: Option<Instant>,
}

#[derive(Debug, Default)]
struct Inner {
    state: QueryState,
    popular_generation: u64,
    search_generation: u64,
    selection: Selection,
}

/// Drives a [`CatalogApi`] from user actions
#[derive(Debug)]
pub struct SearchController<A> {
    api: A,
    clock: Arc<dyn Clock>,
    page_size: u32,
    selection_linger: Duration,
    inner: Mutex<Inner>,
}

impl<A: CatalogApi> SearchController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            clock: Arc::new(SystemClock),
            page_size: DEFAULT_PAGE_SIZE,
            selection_linger: DEFAULT_SELECTION_LINGER,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_selection_linger(mut self, linger: Duration) -> Self {
        self.selection_linger = linger;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> QueryState {
        self.lock().state.clone()
    }

    pub fn view(&self) -> View {
        self.lock().state.view()
    }

    /// Items the grid shows right now
    pub fn displayed(&self) -> Vec<AnimeEntry> {
        self.lock().state.displayed().to_vec()
    }

    /// Load the popular list shown when no search is active
    pub async fn mount(&self) {
        let generation = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            inner.popular_generation += 1;
            inner.state.popular_loading = true;
            inner.state.failure = None;
            inner.popular_generation
        };

        let result = self.api.top_anime(1, self.page_size).await;

        let mut guard = self.lock();
        let inner = &mut *guard;
        if inner.popular_generation != generation {
            debug!(generation = generation, "Discarding superseded popular list");
            return;
        }

        inner.state.popular_loading = false;
        match result {
            Ok(page) => {
                info!(count = page.data.len(), "Loaded popular anime");
                inner.state.popular = page.data;
                inner.state.popular_loaded = true;
            }
            Err(e) => {
                error!(error = %e, "Error loading popular anime");
                inner.state.failure = Some(FailedOperation::Mount);
            }
        }
    }

    /// Start a new search, or return to the popular list for blank text
    pub async fn submit_search(&self, text: &str) {
        let query = text.trim().to_string();

        let generation = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            inner.search_generation += 1;

            let state = &mut inner.state;
            state.results.clear();
            state.page = 1;
            state.has_next_page = false;
            state.search_loaded = false;
            if matches!(state.failure, Some(FailedOperation::Search(_))) || !query.is_empty() {
                state.failure = None;
            }

            if query.is_empty() {
                debug!("Search cleared, showing popular list");
                state.query.clear();
                state.in_flight = false;
                return;
            }

            state.query = query.clone();
            state.in_flight = true;
            inner.search_generation
        };

        let result = self.api.search_anime(&query, 1, self.page_size).await;

        let mut guard = self.lock();
        let inner = &mut *guard;
        if inner.search_generation != generation {
            debug!(query = %query, "Discarding superseded search results");
            return;
        }

        let state = &mut inner.state;
        state.in_flight = false;
        match result {
            Ok(page) => {
                state.has_next_page = page.has_next_page();
                state.results = dedup_by_id(page.data);
                state.search_loaded = true;
                info!(
                    query = %query,
                    count = state.results.len(),
                    has_next_page = state.has_next_page,
                    "Search complete"
                );
            }
            Err(e) => {
                error!(query = %query, error = %e, "Error searching anime");
                state.failure = Some(FailedOperation::Search(query));
            }
        }
    }

    /// Append the next page of the active search
    ///
    /// Returns `true` when a page was appended. Does nothing without an active
    /// query, without a next page, or while another request is in flight. A
    /// failure keeps the results already shown.
    pub async fn load_more(&self) -> bool {
        let (query, next_page, generation) = {
            let mut guard = self.lock();
            let inner = &mut *guard;
            if !inner.state.can_load_more() {
                debug!(
                    searching = inner.state.is_searching(),
                    has_next_page = inner.state.has_next_page,
                    in_flight = inner.state.in_flight,
                    "Load more ignored"
                );
                return false;
            }

            inner.state.in_flight = true;
            (
                inner.state.query.clone(),
                inner.state.page + 1,
                inner.search_generation,
            )
        };

        let result: Result<PaginatedResponse<AnimeEntry>, CatalogError> =
            self.api.search_anime(&query, next_page, self.page_size).await;

        let mut guard = self.lock();
        let inner = &mut *guard;
        if inner.search_generation != generation {
            debug!(query = %query, page = next_page, "Discarding page from superseded search");
            return false;
        }

        let state = &mut inner.state;
        state.in_flight = false;
        match result {
            Ok(page) => {
                let has_next_page = page.has_next_page();
                let appended = append_unique(&mut state.results, page.data);
                state.page = next_page;
                state.has_next_page = has_next_page;
                info!(
                    query = %query,
                    page = next_page,
                    appended = appended,
                    total = state.results.len(),
                    "Loaded more results"
                );
                true
            }
            Err(e) => {
                warn!(query = %query, page = next_page, error = %e, "Error loading more results");
                false
            }
        }
    }

    /// Repeat whichever operation last failed
    pub async fn retry(&self) {
        let failure = self.lock().state.failure.clone();
        match failure {
            Some(FailedOperation::Mount) => self.mount().await,
            Some(FailedOperation::Search(query)) => self.submit_search(&query).await,
            None => debug!("Nothing to retry"),
        }
    }

    /// Open the detail view for an item
    pub fn select(&self, item: AnimeEntry) {
        debug!(mal_id = item.mal_id, "Item selected");
        let mut guard = self.lock();
        guard.selection = Selection {
            item: Some(item),
            open: true,
            closed_at: None,
        };
    }

    /// Close the detail view; the item stays readable until the linger passes
    pub fn close_detail(&self) {
        let now = self.clock.now();
        let mut guard = self.lock();
        if guard.selection.open {
            guard.selection.open = false;
            guard.selection.closed_at = Some(now);
        }
    }

    pub fn is_detail_open(&self) -> bool {
        self.lock().selection.open
    }

    /// Item backing the detail view, if any
    pub fn selected(&self) -> Option<AnimeEntry> {
        let now = self.clock.now();
        let mut guard = self.lock();
        let selection = &mut guard.selection;

        if let Some(closed_at) = selection.closed_at {
            if now.saturating_duration_since(closed_at) >= self.selection_linger {
                selection.item = None;
                selection.closed_at = None;
            }
        }

        selection.item.clone()
    }
}

/// Drop entries whose id already appeared earlier in the list
fn dedup_by_id(items: Vec<AnimeEntry>) -> Vec<AnimeEntry> {
    let mut unique = Vec::with_capacity(items.len());
    append_unique(&mut unique, items);
    unique
}

/// Append entries not already present; returns how many were added
fn append_unique(results: &mut Vec<AnimeEntry>, page: Vec<AnimeEntry>) -> usize {
    let mut seen: HashSet<u32> = results.iter().map(|a| a.mal_id).collect();
    let before = results.len();
    let offered = page.len();

    results.extend(page.into_iter().filter(|a| seen.insert(a.mal_id)));

    let added = results.len() - before;
    if added < offered {
        debug!(dropped = offered - added, "Dropped duplicate entries");
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Pagination, Recommendation, Season};
    use crate::clock::ManualClock;
    use std::collections::VecDeque;
    use tokio::sync::Notify;

    type PageResult = Result<PaginatedResponse<AnimeEntry>, CatalogError>;

    /// Catalog returning scripted pages and recording every call
    #[derive(Default)]
    struct FakeCatalog {
        top: Mutex<VecDeque<PageResult>>,
        search: Mutex<VecDeque<PageResult>>,
        calls: Mutex<Vec<String>>,
        /// (query, page) that waits for `release` before answering
        hold: Mutex<Option<(String, u32)>>,
        release: Notify,
    }

    impl FakeCatalog {
        fn push_top(&self, result: PageResult) {
            self.top.lock().unwrap().push_back(result);
        }

        fn push_search(&self, result: PageResult) {
            self.search.lock().unwrap().push_back(result);
        }

        fn hold(&self, query: &str, page: u32) {
            *self.hold.lock().unwrap() = Some((query.to_string(), page));
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn failure(status: u16) -> CatalogError {
        CatalogError::HttpStatus {
            url: "http://fake".to_string(),
            status,
            message: None,
        }
    }

    impl CatalogApi for FakeCatalog {
        async fn top_anime(&self, page: u32, limit: u32) -> PageResult {
            self.calls.lock().unwrap().push(format!("top:{}:{}", page, limit));
            let next = self.top.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(failure(500)))
        }

        async fn search_anime(&self, query: &str, page: u32, limit: u32) -> PageResult {
            self.calls
                .lock()
                .unwrap()
                .push(format!("search:{}:{}:{}", query, page, limit));
            let held = self.hold.lock().unwrap().as_ref()
                == Some(&(query.to_string(), page));
            // Claim the response before waiting so answers keep call order
            let next = self.search.lock().unwrap().pop_front();
            if held {
                self.release.notified().await;
            }
            next.unwrap_or_else(|| Err(failure(500)))
        }

        async fn anime_by_id(&self, _id: u32) -> Result<AnimeEntry, CatalogError> {
            Err(failure(501))
        }

        async fn seasonal_anime(
            &self,
            _year: Option<i32>,
            _season: Option<Season>,
        ) -> PageResult {
            Err(failure(501))
        }

        async fn recommendations(&self, _id: u32) -> Result<Vec<Recommendation>, CatalogError> {
            Err(failure(501))
        }
    }

    fn entry(id: u32) -> AnimeEntry {
        serde_json::from_value(serde_json::json!({ "mal_id": id, "title": format!("Anime {}", id) }))
            .unwrap()
    }

    fn page(ids: std::ops::RangeInclusive<u32>, has_next_page: bool) -> PageResult {
        Ok(PaginatedResponse {
            data: ids.map(entry).collect(),
            pagination: Pagination {
                has_next_page,
                ..Default::default()
            },
        })
    }

    fn ids(items: &[AnimeEntry]) -> Vec<u32> {
        items.iter().map(|a| a.mal_id).collect()
    }

    #[tokio::test]
    async fn test_mount_loads_popular_in_order() {
        let fake = FakeCatalog::default();
        fake.push_top(page(1..=24, true));
        let controller = SearchController::new(fake);

        assert_eq!(controller.snapshot().phase(), Phase::Idle);
        controller.mount().await;

        let state = controller.snapshot();
        assert_eq!(state.phase(), Phase::Loaded);
        assert_eq!(ids(&state.popular), (1..=24).collect::<Vec<_>>());
        assert_eq!(ids(state.displayed()), (1..=24).collect::<Vec<_>>());
        assert_eq!(controller.api().calls(), vec!["top:1:24"]);
    }

    #[tokio::test]
    async fn test_mount_failure_shows_load_error() {
        let fake = FakeCatalog::default();
        fake.push_top(Err(failure(500)));
        let controller = SearchController::new(fake);

        controller.mount().await;

        assert_eq!(controller.view(), View::Error(ErrorKind::Load));
        assert_eq!(controller.snapshot().failure, Some(FailedOperation::Mount));
    }

    #[tokio::test]
    async fn test_retry_repeats_mount() {
        let fake = FakeCatalog::default();
        fake.push_top(Err(failure(503)));
        fake.push_top(page(1..=3, false));
        let controller = SearchController::new(fake);

        controller.mount().await;
        controller.retry().await;

        assert_eq!(controller.view(), View::Results);
        assert_eq!(ids(&controller.displayed()), vec![1, 2, 3]);
        assert_eq!(controller.api().calls(), vec!["top:1:24", "top:1:24"]);
    }

    #[tokio::test]
    async fn test_search_replaces_results() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=24, true));
        fake.push_search(page(100..=101, false));
        let controller = SearchController::new(fake);

        controller.submit_search("naruto").await;
        controller.submit_search("  bleach  ").await;

        let state = controller.snapshot();
        assert_eq!(state.query, "bleach");
        assert_eq!(state.page, 1);
        assert_eq!(ids(&state.results), vec![100, 101]);
        assert!(!state.has_next_page);
        assert_eq!(
            controller.api().calls(),
            vec!["search:naruto:1:24", "search:bleach:1:24"]
        );
    }

    #[tokio::test]
    async fn test_blank_search_never_calls_network() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=5, true));
        let controller = SearchController::new(fake);

        controller.submit_search("naruto").await;
        controller.submit_search("   ").await;
        controller.submit_search("").await;

        let state = controller.snapshot();
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());
        assert!(!state.is_searching());
        assert_eq!(controller.api().calls(), vec!["search:naruto:1:24"]);
    }

    #[tokio::test]
    async fn test_search_failure_shows_search_error() {
        let fake = FakeCatalog::default();
        fake.push_search(Err(failure(500)));
        fake.push_search(page(1..=2, false));
        let controller = SearchController::new(fake);

        controller.submit_search("one piece").await;
        assert_eq!(controller.view(), View::Error(ErrorKind::Search));

        controller.retry().await;
        assert_eq!(controller.view(), View::Results);
        assert_eq!(
            controller.api().calls(),
            vec!["search:one piece:1:24", "search:one piece:1:24"]
        );
    }

    #[tokio::test]
    async fn test_zero_matches_is_empty_not_error() {
        let fake = FakeCatalog::default();
        fake.push_search(Ok(PaginatedResponse {
            data: Vec::new(),
            pagination: Pagination::default(),
        }));
        let controller = SearchController::new(fake);

        controller.submit_search("zzzzzz").await;

        assert_eq!(controller.view(), View::Empty);
        assert!(controller.snapshot().failure.is_none());
    }

    #[tokio::test]
    async fn test_load_more_appends_pages() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=24, true));
        fake.push_search(page(25..=48, false));
        let controller = SearchController::new(fake);

        controller.submit_search("gundam").await;
        assert!(controller.load_more().await);

        let state = controller.snapshot();
        assert_eq!(state.results.len(), 48);
        assert_eq!(ids(&state.results), (1..=48).collect::<Vec<_>>());
        assert_eq!(state.page, 2);
        assert!(!state.has_next_page);

        // No further page: load-more is a no-op
        assert!(!controller.load_more().await);
        assert_eq!(
            controller.api().calls(),
            vec!["search:gundam:1:24", "search:gundam:2:24"]
        );
    }

    #[tokio::test]
    async fn test_load_more_without_query_is_noop() {
        let fake = FakeCatalog::default();
        fake.push_top(page(1..=24, true));
        let controller = SearchController::new(fake);

        controller.mount().await;
        assert!(!controller.load_more().await);

        assert_eq!(controller.api().calls(), vec!["top:1:24"]);
    }

    #[tokio::test]
    async fn test_load_more_failure_keeps_results() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=24, true));
        fake.push_search(Err(failure(500)));
        let controller = SearchController::new(fake);

        controller.submit_search("gintama").await;
        let before = controller.snapshot();

        assert!(!controller.load_more().await);

        let after = controller.snapshot();
        assert_eq!(after.results, before.results);
        assert_eq!(after.page, 1);
        assert!(after.has_next_page);
        assert!(after.failure.is_none());
        assert_eq!(after.phase(), Phase::Loaded);
    }

    #[tokio::test]
    async fn test_load_more_drops_duplicate_ids() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=3, true));
        fake.push_search(page(3..=5, false));
        let controller = SearchController::new(fake);

        controller.submit_search("overlap").await;
        controller.load_more().await;

        assert_eq!(ids(&controller.snapshot().results), vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_concurrent_load_more_fetches_once() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=24, true));
        fake.push_search(page(25..=48, true));
        fake.hold("mecha", 2);
        let controller = SearchController::new(fake);

        controller.submit_search("mecha").await;

        let first = controller.load_more();
        let second = async {
            tokio::task::yield_now().await;
            let fetched = controller.load_more().await;
            controller.api().release.notify_one();
            fetched
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first);
        assert!(!second);
        assert_eq!(controller.snapshot().results.len(), 48);
        assert_eq!(
            controller.api().calls(),
            vec!["search:mecha:1:24", "search:mecha:2:24"]
        );
    }

    #[tokio::test]
    async fn test_latest_search_wins() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=2, true));
        fake.push_search(page(10..=11, false));
        fake.hold("slow", 1);
        let controller = SearchController::new(fake);

        let slow = controller.submit_search("slow");
        let fast = async {
            tokio::task::yield_now().await;
            controller.submit_search("fast").await;
            controller.api().release.notify_one();
        };
        tokio::join!(slow, fast);

        let state = controller.snapshot();
        assert_eq!(state.query, "fast");
        assert_eq!(ids(&state.results), vec![10, 11]);
        assert!(!state.has_next_page);
        assert!(!state.in_flight);
    }

    #[tokio::test]
    async fn test_clearing_search_discards_pending_page() {
        let fake = FakeCatalog::default();
        fake.push_search(page(1..=24, true));
        fake.push_search(page(25..=48, true));
        fake.hold("evangelion", 2);
        let controller = SearchController::new(fake);

        controller.submit_search("evangelion").await;

        let more = controller.load_more();
        let clear = async {
            tokio::task::yield_now().await;
            controller.submit_search("").await;
            controller.api().release.notify_one();
        };
        let (appended, ()) = tokio::join!(more, clear);

        assert!(!appended);
        let state = controller.snapshot();
        assert!(state.results.is_empty());
        assert!(!state.in_flight);
    }

    #[test]
    fn test_selection_lingers_after_close() {
        let clock = Arc::new(ManualClock::new());
        let controller = SearchController::new(FakeCatalog::default())
            .with_clock(clock.clone())
            .with_selection_linger(Duration::from_millis(300));

        controller.select(entry(42));
        assert!(controller.is_detail_open());

        controller.close_detail();
        assert!(!controller.is_detail_open());
        assert_eq!(controller.selected().map(|a| a.mal_id), Some(42));

        clock.advance(Duration::from_millis(299));
        assert!(controller.selected().is_some());

        clock.advance(Duration::from_millis(1));
        assert!(controller.selected().is_none());
    }

    #[test]
    fn test_reselect_cancels_pending_clear() {
        let clock = Arc::new(ManualClock::new());
        let controller =
            SearchController::new(FakeCatalog::default()).with_clock(clock.clone());

        controller.select(entry(1));
        controller.close_detail();
        controller.select(entry(2));
        clock.advance(Duration::from_secs(5));

        assert_eq!(controller.selected().map(|a| a.mal_id), Some(2));
    }

    #[test]
    fn test_error_messages_follow_language() {
        let en = shared::Language::En.translations();

        assert_eq!(ErrorKind::Load.message(en), en.load_error);
        assert_eq!(ErrorKind::Search.message(en), en.search_error);
    }
}
