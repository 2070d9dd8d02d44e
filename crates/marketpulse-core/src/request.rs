pub const DEFAULT_INDUSTRY: &str = "Apple";
pub const DEFAULT_LOCATION: &str = "US";
pub const DEFAULT_SCENARIO: &str = "Should I buy Apple stock?";
pub const DEFAULT_TICKER: &str = "AAPL";

/// The form a user submits for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub industry: String,
    pub location: String,
    pub scenario: String,
    /// `None` skips the market-data section.
    pub ticker: Option<String>,
}

impl AnalysisRequest {
    /// Ticker with surrounding whitespace removed, or `None` when blank.
    #[must_use]
    pub fn ticker_symbol(&self) -> Option<&str> {
        self.ticker
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            industry: DEFAULT_INDUSTRY.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            scenario: DEFAULT_SCENARIO.to_string(),
            ticker: Some(DEFAULT_TICKER.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_defaults() {
        let req = AnalysisRequest::default();
        assert_eq!(req.industry, "Apple");
        assert_eq!(req.location, "US");
        assert_eq!(req.scenario, "Should I buy Apple stock?");
        assert_eq!(req.ticker_symbol(), Some("AAPL"));
    }

    #[test]
    fn blank_ticker_is_treated_as_absent() {
        let req = AnalysisRequest {
            ticker: Some("   ".to_string()),
            ..AnalysisRequest::default()
        };
        assert_eq!(req.ticker_symbol(), None);
    }
}
