use crate::app_config::AppConfig;
use crate::{ConfigError, TieBreakPolicy};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if either API key is missing or a value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if either API key is missing or a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Blank secrets count as missing: an empty key would only fail later at
    // the provider with a less useful message.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let serpapi_api_key = require("SERPAPI_API_KEY")?;
    let openai_api_key = require("OPENAI_API_KEY")?;

    let openai_model = or_default("MARKETPULSE_OPENAI_MODEL", "gpt-4-turbo");
    let openai_base_url = or_default("MARKETPULSE_OPENAI_BASE_URL", "https://api.openai.com/v1");
    let serpapi_base_url = or_default("MARKETPULSE_SERPAPI_BASE_URL", "https://serpapi.com");
    let market_data_base_url = or_default(
        "MARKETPULSE_MARKET_DATA_BASE_URL",
        "https://query1.finance.yahoo.com",
    );
    let rss_feed_url = or_default(
        "MARKETPULSE_RSS_FEED_URL",
        "https://www.cnbc.com/id/100003114/device/rss/rss.html",
    );

    let request_timeout_secs = parse_u64("MARKETPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MARKETPULSE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("MARKETPULSE_USER_AGENT", "marketpulse/0.1 (market-sentiment)");
    let log_level = or_default("MARKETPULSE_LOG_LEVEL", "warn");
    let tie_break_policy = parse_policy(&or_default("MARKETPULSE_TIE_BREAK_POLICY", "three_way"))?;

    Ok(AppConfig {
        serpapi_api_key,
        openai_api_key,
        openai_model,
        openai_base_url,
        serpapi_base_url,
        market_data_base_url,
        rss_feed_url,
        request_timeout_secs,
        user_agent,
        log_level,
        tie_break_policy,
    })
}

fn parse_policy(s: &str) -> Result<TieBreakPolicy, ConfigError> {
    s.parse::<TieBreakPolicy>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "MARKETPULSE_TIE_BREAK_POLICY".to_string(),
            reason,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
