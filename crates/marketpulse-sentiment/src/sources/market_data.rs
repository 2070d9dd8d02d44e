//! Daily price history from the Yahoo Finance chart API.

use chrono::DateTime;
use marketpulse_core::AppConfig;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::MAX_RESULTS;
use crate::error::SentimentError;
use crate::http::{build_client, join_url, snippet};
use crate::types::PriceBar;

const PROVIDER: &str = "market data";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Client for `GET {base}/v8/finance/chart/{ticker}`.
pub struct MarketDataClient {
    client: Client,
    base_url: String,
}

impl MarketDataClient {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, SentimentError> {
        let client = build_client(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self {
            client,
            base_url: config.market_data_base_url.clone(),
        })
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        Ok(Self {
            client: build_client(timeout_secs, "marketpulse-test/0.1")?,
            base_url: base_url.to_owned(),
        })
    }

    /// Fetch the last five daily OHLCV rows for `ticker`, oldest first.
    ///
    /// Days with any missing field are skipped.
    ///
    /// # Errors
    ///
    /// - [`SentimentError::Http`] on network failure or timeout.
    /// - [`SentimentError::Api`] when the API reports an error (for example an
    ///   unknown symbol) or answers with a non-2xx status.
    /// - [`SentimentError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_recent_prices(&self, ticker: &str) -> Result<Vec<PriceBar>, SentimentError> {
        let url = self.build_url(ticker)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let parsed: Result<ChartEnvelope, _> = serde_json::from_str(&body);
        if let Ok(ChartEnvelope {
            chart: Chart {
                error: Some(err), ..
            },
        }) = &parsed
        {
            let message = err
                .description
                .clone()
                .or_else(|| err.code.clone())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(SentimentError::Api {
                provider: PROVIDER,
                message,
            });
        }
        if !status.is_success() {
            return Err(SentimentError::Api {
                provider: PROVIDER,
                message: format!("status {status}: {}", snippet(&body)),
            });
        }

        let envelope = parsed.map_err(|e| SentimentError::Deserialize {
            context: format!("chart({ticker})"),
            source: e,
        })?;

        let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(Vec::new());
        };
        Ok(to_price_bars(result))
    }

    fn build_url(&self, ticker: &str) -> Result<Url, SentimentError> {
        let mut url = join_url(&self.base_url, "v8/finance/chart")?;
        url.path_segments_mut()
            .map_err(|()| SentimentError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "base URL cannot take path segments".to_string(),
            })?
            .push(&ticker.trim().to_uppercase());
        url.query_pairs_mut()
            .append_pair("range", "5d")
            .append_pair("interval", "1d");
        Ok(url)
    }
}

fn to_price_bars(result: ChartResult) -> Vec<PriceBar> {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let field = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    let mut bars: Vec<PriceBar> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            Some(PriceBar {
                date: DateTime::from_timestamp(ts, 0)?.date_naive(),
                open: field(&quote.open, i)?,
                high: field(&quote.high, i)?,
                low: field(&quote.low, i)?,
                close: field(&quote.close, i)?,
                volume: quote.volume.get(i).copied().flatten()?,
            })
        })
        .collect();

    let excess = bars.len().saturating_sub(MAX_RESULTS);
    bars.drain(..excess);
    bars
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn build_url_uppercases_ticker() {
        let client = MarketDataClient::with_base_url("https://query1.finance.yahoo.com/", 30)
            .expect("client construction should not fail");
        let url = client.build_url(" aapl ").unwrap();
        assert_eq!(
            url.as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/AAPL?range=5d&interval=1d"
        );
    }

    #[test]
    fn rows_with_gaps_are_skipped_and_capped() {
        let result = ChartResult {
            // 2024-09-02 .. 2024-09-08 at 13:30 UTC
            timestamp: (0..7).map(|d| 1_725_283_800 + d * 86_400).collect(),
            indicators: Indicators {
                quote: vec![Quote {
                    open: vec![Some(1.0); 7],
                    high: vec![Some(2.0); 7],
                    low: vec![Some(0.5); 7],
                    close: vec![Some(1.5), None, Some(1.6), Some(1.7), Some(1.8), Some(1.9), Some(2.0)],
                    volume: vec![Some(100); 7],
                }],
            },
        };
        let bars = to_price_bars(result);
        assert_eq!(bars.len(), 5);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 9, 4).unwrap());
        assert!((bars[4].close - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_quote_block_yields_no_rows() {
        let result = ChartResult {
            timestamp: vec![1_725_283_800],
            indicators: Indicators { quote: Vec::new() },
        };
        assert!(to_price_bars(result).is_empty());
    }
}
