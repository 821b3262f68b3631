use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// RapidAPI host header value for the upstream movie provider
    ///
    /// Has no default; a missing credential fails the request at call time.
    #[serde(default)]
    pub rapidapi_host: Option<String>,

    /// RapidAPI key header value for the upstream movie provider
    #[serde(default)]
    pub rapidapi_key: Option<String>,

    /// Upstream movie provider base URL
    #[serde(default = "default_upstream_api_url")]
    pub upstream_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_upstream_api_url() -> String {
    "https://imdb236.p.rapidapi.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Returns the upstream credential pair, or `None` if either half is missing
    pub fn rapidapi_credentials(&self) -> Option<(String, String)> {
        match (&self.rapidapi_host, &self.rapidapi_key) {
            (Some(host), Some(key)) => Some((host.clone(), key.clone())),
            _ => None,
        }
    }
}
