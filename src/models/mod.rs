use serde::{Deserialize, Serialize};

/// Normalized movie metadata unit, one per grid cell
///
/// Wire names are camelCase to match the upstream provider payload; records
/// are immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub title: String,
    pub image_url: String,
    pub description: String,
    /// ISO date string, e.g. "2024-07-19"
    pub release_date: String,
    pub imdb_url: String,
    /// MPAA-style rating label, e.g. "R", "PG-13"
    pub rating: String,
}

/// A JSON value that may arrive as a number or a numeric string
///
/// Browser clients send `page` as a number while the documented contract uses
/// strings; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    Text(String),
}

impl NumberOrString {
    /// Parses the value as an integer, `None` if not numeric
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Renders the value as a query-parameter string
    pub fn as_param(&self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s.clone(),
        }
    }
}

/// Request body for the movie proxy endpoint
///
/// Unknown fields (such as the listing page's `query` search term) are
/// accepted and ignored; the upstream endpoint has no search parameter.
#[derive(Debug, Default, Deserialize)]
pub struct FetchMoviesRequest {
    #[serde(default)]
    pub year: Option<NumberOrString>,
    #[serde(default)]
    pub page: Option<NumberOrString>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Success response body for the movie proxy endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchMoviesResponse {
    pub movies: Vec<MovieRecord>,
}

/// Raw upstream payload: a `results` array of loosely-shaped movie objects
///
/// Elements are validated into [`MovieRecord`] one by one at the boundary
/// instead of trusting the upstream shape wholesale.
#[derive(Debug, Deserialize)]
pub struct UpstreamSearchResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}
