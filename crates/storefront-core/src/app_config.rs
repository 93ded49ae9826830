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

/// Runtime settings for the storefront, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the CMS server, e.g. `https://cms.example.com`. No trailing slash.
    pub server_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Default page size for collection archives.
    pub archive_limit: u32,
    /// Grace period before an archive shows its loading indicator.
    pub loading_delay_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.env == Environment::Production
    }
}
