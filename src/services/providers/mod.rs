/// Movie data provider abstraction
///
/// The proxy handler talks to the upstream movie metadata API through this
/// seam so route tests can swap in a local server and future providers can be
/// added without touching the handler.
use crate::{error::AppResult, models::MovieRecord};

pub mod rapidapi;

pub use rapidapi::RapidApiProvider;

/// Validated parameters for an upstream most-popular-movies lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamParams {
    /// Release-year filter, always present (defaulted to the current calendar
    /// year before this struct is built)
    pub year: String,
    /// 1-based page number
    pub page: i64,
    /// Genre filter; `None` means unfiltered and is omitted from the request
    pub genre: Option<String>,
}

/// Trait for upstream movie data providers
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fetch one page of most-popular movies matching the given filters
    ///
    /// Fails fast with `AppError::MissingCredentials` before any network
    /// activity when the provider has no credentials configured.
    async fn most_popular(&self, params: &UpstreamParams) -> AppResult<Vec<MovieRecord>>;
}
