//! Listing-page state engine: filter/search/page state, per-query response
//! cache, debounced search input, and the fetch seam to the movie proxy.

pub mod cache;
pub mod controller;
pub mod debounce;
pub mod fetcher;
pub mod query;

pub use cache::ListingCache;
pub use controller::{ListingController, SEARCH_DEBOUNCE};
pub use debounce::Debouncer;
pub use fetcher::{MovieFetcher, ProxyClient};
pub use query::{MovieQuery, UNFILTERED_GENRE};
