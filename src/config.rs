use serde::Deserialize;

/// Controls how read-path listings fill in movie details.
///
/// `Live` re-fetches every result from the catalog provider (freshest data,
/// one upstream call per result); `Snapshot` serves the attributes stored at
/// import time without touching the provider.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentMode {
    #[default]
    Live,
    Snapshot,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,

    /// Per-request timeout for catalog provider calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Neo4j bolt URI
    pub neo4j_uri: String,

    /// Neo4j username
    pub neo4j_username: String,

    /// Neo4j password
    pub neo4j_password: String,

    /// Enrichment mode for read-path listings
    #[serde(default)]
    pub enrichment_mode: EnrichmentMode,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
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
}
