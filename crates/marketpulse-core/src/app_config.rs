use crate::TieBreakPolicy;

/// Runtime configuration for one marketpulse process.
///
/// Built once by [`crate::load_app_config`] and passed by reference to every
/// adapter constructor.
#[derive(Clone)]
pub struct AppConfig {
    pub serpapi_api_key: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub serpapi_base_url: String,
    pub market_data_base_url: String,
    pub rss_feed_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    pub tie_break_policy: TieBreakPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("serpapi_api_key", &"[redacted]")
            .field("openai_api_key", &"[redacted]")
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field("market_data_base_url", &self.market_data_base_url)
            .field("rss_feed_url", &self.rss_feed_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("tie_break_policy", &self.tie_break_policy)
            .finish()
    }
}
