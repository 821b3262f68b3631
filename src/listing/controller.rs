use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::models::MovieRecord;

use super::cache::ListingCache;
use super::debounce::Debouncer;
use super::fetcher::MovieFetcher;
use super::query::{MovieQuery, UNFILTERED_GENRE};

/// Coalescing window for search keystrokes
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// The one user-facing failure message; raw error details stay in the logs
const FETCH_ERROR_MESSAGE: &str = "Failed to load movies. Please try again later.";

/// Mutable listing state behind the controller's lock
struct ListingState {
    page: u32,
    year: Option<i32>,
    genre: String,
    search: String,
    movies: Vec<MovieRecord>,
    loading: bool,
    error: Option<String>,
    cache: ListingCache,
    /// Monotonic fetch counter; an in-flight fetch only applies its outcome
    /// if this still holds the value it captured
    request_seq: u64,
}

impl ListingState {
    fn new() -> Self {
        Self {
            page: 1,
            year: None,
            genre: UNFILTERED_GENRE.to_string(),
            search: String::new(),
            movies: Vec::new(),
            loading: false,
            error: None,
            cache: ListingCache::new(),
            request_seq: 0,
        }
    }

    fn current_query(&self) -> MovieQuery {
        MovieQuery {
            page: self.page,
            year: self.year,
            genre: self.genre.clone(),
            search: self.search.clone(),
        }
    }
}

/// Filter/search/page state machine for the movie listing view
///
/// Owns the per-query response cache and exposes the records, loading flag,
/// error message, and empty condition the view branches on. Cloning yields a
/// handle to the same state.
#[derive(Clone)]
pub struct ListingController {
    state: Arc<RwLock<ListingState>>,
    fetcher: Arc<dyn MovieFetcher>,
    debouncer: Arc<Mutex<Debouncer>>,
}

impl ListingController {
    /// Creates a controller with default state (page 1, no year, genre "All",
    /// empty search). The caller triggers the initial load with
    /// [`fetch_movies`](Self::fetch_movies).
    pub fn new(fetcher: Arc<dyn MovieFetcher>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ListingState::new())),
            fetcher,
            debouncer: Arc::new(Mutex::new(Debouncer::new(SEARCH_DEBOUNCE))),
        }
    }

    /// Registers a search keystroke
    ///
    /// Rapid calls within the debounce window collapse into a single commit
    /// of the last value. Committing applies the search text, resets the page
    /// to 1, and triggers exactly one fetch.
    pub async fn update_search(&self, text: impl Into<String>) {
        let text = text.into();
        let this = self.clone();
        self.debouncer.lock().await.schedule(async move {
            this.commit_search(text).await;
        });
    }

    async fn commit_search(&self, text: String) {
        {
            let mut state = self.state.write().await;
            state.search = text;
            state.page = 1;
        }
        self.fetch_movies().await;
    }

    /// Sets the year filter and fetches the new combination
    pub async fn set_year(&self, year: Option<i32>) {
        {
            self.state.write().await.year = year;
        }
        self.fetch_movies().await;
    }

    /// Sets the genre filter and fetches the new combination
    pub async fn set_genre(&self, genre: impl Into<String>) {
        {
            self.state.write().await.genre = genre.into();
        }
        self.fetch_movies().await;
    }

    /// Sets the page (clamped to >= 1) and fetches the new combination
    pub async fn set_page(&self, page: u32) {
        {
            self.state.write().await.page = page.max(1);
        }
        self.fetch_movies().await;
    }

    /// Loads movies for the current filter combination
    ///
    /// A cached combination is applied synchronously with no network
    /// activity. On a miss the fetch runs with `loading` visible, and the
    /// outcome is applied only if no newer fetch started in the meantime; a
    /// failure keeps the previously displayed records.
    pub async fn fetch_movies(&self) {
        let (query, seq) = {
            let mut state = self.state.write().await;
            let query = state.current_query();

            if let Some(cached) = state.cache.get(&query) {
                tracing::debug!(query = %query, "Cache hit");
                state.movies = cached;
                return;
            }

            state.loading = true;
            state.error = None;
            state.request_seq += 1;
            (query, state.request_seq)
        };

        // The lock is not held across the network call.
        let result = self.fetcher.fetch(&query).await;

        let mut state = self.state.write().await;
        if state.request_seq != seq {
            // A newer fetch superseded this one; it owns the loading flag and
            // the displayed records, so this outcome is dropped wholesale.
            tracing::debug!(query = %query, "Discarding stale fetch result");
            return;
        }

        match result {
            Ok(movies) => {
                state.cache.insert(query, movies.clone());
                state.movies = movies;
            }
            Err(err) => {
                tracing::error!(error = %err, query = %query, "Movie fetch failed");
                state.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        state.loading = false;
    }

    pub async fn movies(&self) -> Vec<MovieRecord> {
        self.state.read().await.movies.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// True when there is nothing to show and no reason why: no records, not
    /// loading, no error
    pub async fn is_empty(&self) -> bool {
        let state = self.state.read().await;
        state.movies.is_empty() && !state.loading && state.error.is_none()
    }

    pub async fn page(&self) -> u32 {
        self.state.read().await.page
    }

    pub async fn search(&self) -> String {
        self.state.read().await.search.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use crate::listing::fetcher::MockMovieFetcher;
    use tokio::sync::Mutex as TokioMutex;

    fn record(title: &str) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            image_url: format!("https://images.example/{}.jpg", title),
            description: String::new(),
            release_date: "2024-01-01".to_string(),
            imdb_url: "https://www.imdb.com/title/tt0000001/".to_string(),
            rating: "PG-13".to_string(),
        }
    }

    /// Fetcher that records every query it sees
    struct RecordingFetcher {
        calls: TokioMutex<Vec<MovieQuery>>,
    }

    impl RecordingFetcher {
        fn new() -> Self {
            Self {
                calls: TokioMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl MovieFetcher for RecordingFetcher {
        async fn fetch(&self, query: &MovieQuery) -> AppResult<Vec<MovieRecord>> {
            self.calls.lock().await.push(query.clone());
            Ok(Vec::new())
        }
    }

    /// Fetcher whose first page resolves slowly, everything else fast
    struct DelayedFetcher;

    #[async_trait::async_trait]
    impl MovieFetcher for DelayedFetcher {
        async fn fetch(&self, query: &MovieQuery) -> AppResult<Vec<MovieRecord>> {
            if query.page == 1 {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Ok(vec![record("Stale")])
            } else {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(vec![record("Fresh")])
            }
        }
    }

    #[tokio::test]
    async fn test_identical_queries_hit_cache_once() {
        let mut mock = MockMovieFetcher::new();
        mock.expect_fetch()
            .times(1)
            .returning(|_| Ok(vec![record("Cached")]));
        let controller = ListingController::new(Arc::new(mock));

        controller.fetch_movies().await;
        controller.fetch_movies().await;

        let movies = controller.movies().await;
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Cached");
        assert!(!controller.loading().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_search_input_collapses_to_last_value() {
        let mut mock = MockMovieFetcher::new();
        mock.expect_fetch()
            .withf(|query| query.search == "interstellar" && query.page == 1)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let controller = ListingController::new(Arc::new(mock));

        controller.update_search("i").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.update_search("inter").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.update_search("interstellar").await;

        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(controller.search().await, "interstellar");
        assert_eq!(controller.page().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_commit_resets_page() {
        let mut mock = MockMovieFetcher::new();
        mock.expect_fetch().returning(|_| Ok(Vec::new()));
        let controller = ListingController::new(Arc::new(mock));

        controller.set_page(3).await;
        assert_eq!(controller.page().await, 3);

        controller.update_search("dune").await;
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(controller.page().await, 1);
        assert_eq!(controller.search().await, "dune");
    }

    #[tokio::test]
    async fn test_each_setter_triggers_one_fetch_of_combined_state() {
        let fetcher = Arc::new(RecordingFetcher::new());
        let controller = ListingController::new(fetcher.clone());

        controller.set_year(Some(2023)).await;
        controller.set_genre("Comedy").await;
        controller.set_page(2).await;

        let calls = fetcher.calls.lock().await;
        assert_eq!(calls.len(), 3);
        assert_eq!(
            *calls.last().unwrap(),
            MovieQuery {
                page: 2,
                year: Some(2023),
                genre: "Comedy".to_string(),
                search: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_preserves_records_and_sets_error() {
        let mut mock = MockMovieFetcher::new();
        mock.expect_fetch()
            .withf(|query| query.page == 1)
            .returning(|_| Ok(vec![record("Known Good")]));
        mock.expect_fetch()
            .withf(|query| query.page == 2)
            .returning(|_| Err(AppError::Internal("boom".to_string())));
        let controller = ListingController::new(Arc::new(mock));

        controller.fetch_movies().await;
        assert_eq!(controller.movies().await[0].title, "Known Good");

        controller.set_page(2).await;

        // The grid keeps the last-known-good records.
        assert_eq!(controller.movies().await[0].title, "Known Good");
        let error = controller.error().await.unwrap();
        assert!(!error.is_empty());
        assert!(!controller.loading().await);
        assert!(!controller.is_empty().await);
    }

    #[tokio::test]
    async fn test_error_clears_on_next_successful_fetch() {
        let mut mock = MockMovieFetcher::new();
        mock.expect_fetch()
            .withf(|query| query.page == 2)
            .returning(|_| Err(AppError::Internal("boom".to_string())));
        mock.expect_fetch()
            .withf(|query| query.page == 3)
            .returning(|_| Ok(vec![record("Recovered")]));
        let controller = ListingController::new(Arc::new(mock));

        controller.set_page(2).await;
        assert!(controller.error().await.is_some());

        controller.set_page(3).await;
        assert_eq!(controller.error().await, None);
        assert_eq!(controller.movies().await[0].title, "Recovered");
    }

    #[tokio::test]
    async fn test_empty_fetch_reports_empty_state() {
        let mut mock = MockMovieFetcher::new();
        mock.expect_fetch().returning(|_| Ok(Vec::new()));
        let controller = ListingController::new(Arc::new(mock));

        controller.fetch_movies().await;

        assert!(controller.movies().await.is_empty());
        assert!(!controller.loading().await);
        assert_eq!(controller.error().await, None);
        assert!(controller.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_in_flight_response_is_discarded() {
        let controller = ListingController::new(Arc::new(DelayedFetcher));

        // Start the slow page-1 fetch and let it register its sequence.
        let slow = controller.clone();
        let slow_task = tokio::spawn(async move { slow.fetch_movies().await });
        tokio::task::yield_now().await;
        assert!(controller.loading().await);

        // The page change starts a newer fetch that resolves first.
        controller.set_page(2).await;
        assert_eq!(controller.movies().await[0].title, "Fresh");

        // The slow response arrives late and must not overwrite anything.
        slow_task.await.unwrap();
        assert_eq!(controller.movies().await[0].title, "Fresh");
        assert!(!controller.loading().await);
        assert_eq!(controller.error().await, None);
    }

    #[tokio::test]
    async fn test_page_is_clamped_to_at_least_one() {
        let fetcher = Arc::new(RecordingFetcher::new());
        let controller = ListingController::new(fetcher.clone());

        controller.set_page(0).await;
        assert_eq!(controller.page().await, 1);
    }
}
