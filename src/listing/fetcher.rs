use reqwest::Client as HttpClient;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{FetchMoviesResponse, MovieRecord};

use super::query::MovieQuery;

/// Trait for fetching one page of movies for a query
///
/// The listing controller talks to the proxy service through this seam so
/// tests can count calls and inject failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieFetcher: Send + Sync {
    async fn fetch(&self, query: &MovieQuery) -> AppResult<Vec<MovieRecord>>;
}

/// Wire shape of the proxy request body
///
/// Carries the search term too, exactly as the listing page's original call
/// does; the proxy accepts and ignores it.
#[derive(Debug, Serialize)]
struct FetchRequestBody<'a> {
    page: u32,
    year: Option<i32>,
    genre: &'a str,
    query: &'a str,
}

/// HTTP client for the movie proxy endpoint
#[derive(Clone)]
pub struct ProxyClient {
    http_client: HttpClient,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl MovieFetcher for ProxyClient {
    async fn fetch(&self, query: &MovieQuery) -> AppResult<Vec<MovieRecord>> {
        let url = format!("{}/api/fetchmovies", self.base_url);
        let body = FetchRequestBody {
            page: query.page,
            year: query.year,
            genre: query.wire_genre(),
            query: &query.search,
        };

        let response = self.http_client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status,
                message: format!(
                    "Failed to fetch movies: {}",
                    status.canonical_reason().unwrap_or("unknown status")
                ),
            });
        }

        let payload: FetchMoviesResponse = response.json().await?;
        Ok(payload.movies)
    }
}
