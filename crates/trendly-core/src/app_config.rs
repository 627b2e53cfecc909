use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Dashboard snapshot written by the CLI.
    pub state_path: PathBuf,
    /// YAML list of competitor usernames for `competitors sync`.
    pub watchlist_path: PathBuf,
    pub rapidapi_key: Option<String>,
    pub rapidapi_host: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub posts_per_profile: usize,
    pub sync_concurrency: usize,
}

impl AppConfig {
    #[must_use]
    pub fn instagram_configured(&self) -> bool {
        self.rapidapi_key.is_some()
    }

    #[must_use]
    pub fn ai_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("state_path", &self.state_path)
            .field("watchlist_path", &self.watchlist_path)
            .field(
                "rapidapi_key",
                &self.rapidapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("rapidapi_host", &self.rapidapi_host)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("posts_per_profile", &self.posts_per_profile)
            .field("sync_concurrency", &self.sync_concurrency)
            .finish()
    }
}
