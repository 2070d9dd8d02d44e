use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use marketpulse_core::AnalysisRequest;

use crate::error::SentimentError;

/// Sentiment of a single headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// All labels in report order.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = SentimentError;

    /// Parses a model reply such as `"Positive"`, `" negative."` or `"NEUTRAL"`.
    ///
    /// Case, surrounding whitespace, quotes and trailing punctuation are
    /// ignored. Anything else is [`SentimentError::UnrecognizedLabel`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s
            .trim()
            .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(word))
            .ok_or_else(|| SentimentError::UnrecognizedLabel(s.to_string()))
    }
}

/// Ordered headline → label mapping for one run.
///
/// Iteration follows insertion order. Re-inserting a headline that is already
/// present replaces its label but keeps its original position, so duplicate
/// headline text collapses to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentResults {
    entries: Vec<(String, SentimentLabel)>,
}

impl SentimentResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, headline: impl Into<String>, label: SentimentLabel) {
        let headline = headline.into();
        if let Some(entry) = self.entries.iter_mut().find(|(h, _)| *h == headline) {
            entry.1 = label;
        } else {
            self.entries.push((headline, label));
        }
    }

    #[must_use]
    pub fn get(&self, headline: &str) -> Option<SentimentLabel> {
        self.entries
            .iter()
            .find(|(h, _)| h == headline)
            .map(|(_, label)| *label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SentimentLabel)> {
        self.entries.iter().map(|(h, label)| (h.as_str(), *label))
    }

    pub fn labels(&self) -> impl Iterator<Item = SentimentLabel> + '_ {
        self.entries.iter().map(|(_, label)| *label)
    }
}

impl<S: Into<String>> FromIterator<(S, SentimentLabel)> for SentimentResults {
    fn from_iter<I: IntoIterator<Item = (S, SentimentLabel)>>(iter: I) -> Self {
        let mut results = Self::new();
        for (headline, label) in iter {
            results.insert(headline, label);
        }
        results
    }
}

/// The search triple sent to the news search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub industry: String,
    pub location: String,
    pub scenario: String,
}

impl NewsQuery {
    /// Space-joined query text. Blank parts are skipped.
    #[must_use]
    pub fn query_string(&self) -> String {
        [&self.industry, &self.location, &self.scenario]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&AnalysisRequest> for NewsQuery {
    fn from(request: &AnalysisRequest) -> Self {
        Self {
            industry: request.industry.clone(),
            location: request.location.clone(),
            scenario: request.scenario.clone(),
        }
    }
}

/// One entry from the RSS feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Raw `pubDate` text, when the feed provides one.
    pub published: Option<String>,
}

/// One daily OHLCV row.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// What a retrieval adapter produced for one report section.
///
/// Keeps "the source answered with nothing" apart from "the source failed"
/// while letting both render as "nothing to show".
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    Found(Vec<T>),
    Empty,
    Failed(String),
}

impl<T> SourceOutcome<T> {
    /// Convert an adapter result, logging failures against `source`.
    pub fn from_result(source: &'static str, result: Result<Vec<T>, SentimentError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => {
                tracing::info!(source, "source returned no items");
                Self::Empty
            }
            Ok(items) => {
                tracing::debug!(source, count = items.len(), "source returned items");
                Self::Found(items)
            }
            Err(e) => {
                tracing::warn!(source, error = %e, "source fetch failed");
                Self::Failed(e.to_string())
            }
        }
    }

    /// Items found, or an empty slice for `Empty` and `Failed`.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Found(items) => items,
            Self::Empty | Self::Failed(_) => &[],
        }
    }
}
