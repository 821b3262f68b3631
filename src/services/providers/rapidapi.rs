/// RapidAPI-hosted movie metadata provider
///
/// Authenticates with the `x-rapidapi-host` / `x-rapidapi-key` header pair
/// and queries the most-popular-movies endpoint with a fixed sort order and
/// page size.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieRecord, UpstreamSearchResponse},
    services::providers::{MovieProvider, UpstreamParams},
};
use reqwest::Client as HttpClient;

const PAGE_SIZE: u32 = 12;
const SORT_ORDER: &str = "year.decr";

#[derive(Clone)]
pub struct RapidApiProvider {
    http_client: HttpClient,
    /// `(host, key)` header pair; `None` when either env var is unset
    credentials: Option<(String, String)>,
    api_url: String,
}

impl RapidApiProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: HttpClient::new(),
            credentials: config.rapidapi_credentials(),
            api_url: config.upstream_api_url.clone(),
        }
    }
}

/// Pulls the `message` field out of an upstream error body, if there is one
fn extract_upstream_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}

#[async_trait::async_trait]
impl MovieProvider for RapidApiProvider {
    async fn most_popular(&self, params: &UpstreamParams) -> AppResult<Vec<MovieRecord>> {
        // Credentials are checked before any other work.
        let (host, key) = self
            .credentials
            .as_ref()
            .ok_or(AppError::MissingCredentials)?;

        let url = format!("{}/imdb/most-popular-movies", self.api_url);
        let mut query = vec![
            ("year", params.year.clone()),
            ("sort", SORT_ORDER.to_string()),
            ("limit", PAGE_SIZE.to_string()),
            ("page", params.page.to_string()),
        ];
        if let Some(genre) = &params.genre {
            query.push(("genre", genre.clone()));
        }

        let response = self
            .http_client
            .get(&url)
            .header("x-rapidapi-host", host)
            .header("x-rapidapi-key", key)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        tracing::info!(url = %response.url(), status = %status, "Upstream request completed");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_upstream_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Upstream request failed")
                    .to_string()
            });
            return Err(AppError::Upstream { status, message });
        }

        let body = response.text().await?;
        let payload: UpstreamSearchResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Internal(format!("Failed to parse upstream response: {}", e)))?;

        // Validate each element instead of trusting the upstream shape;
        // malformed entries are skipped rather than failing the whole page.
        let movies: Vec<MovieRecord> = payload
            .results
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<MovieRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed upstream movie record");
                    None
                }
            })
            .collect();

        tracing::info!(
            results = movies.len(),
            page = params.page,
            "Most popular movies fetched"
        );

        Ok(movies)
    }
}
