//! RSS feed adapter with client-side keyword filtering.

use marketpulse_core::AppConfig;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity};
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;
use reqwest::Client;

use super::MAX_RESULTS;
use crate::error::SentimentError;
use crate::http::build_client;
use crate::types::FeedItem;

/// Client for a single configured RSS feed.
pub struct RssFeedClient {
    client: Client,
    feed_url: String,
}

impl RssFeedClient {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, SentimentError> {
        let client = build_client(config.request_timeout_secs, &config.user_agent)?;
        Ok(Self {
            client,
            feed_url: config.rss_feed_url.clone(),
        })
    }

    /// Creates a client for an arbitrary feed URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn with_feed_url(feed_url: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        Ok(Self {
            client: build_client(timeout_secs, "marketpulse-test/0.1")?,
            feed_url: feed_url.to_owned(),
        })
    }

    /// Fetch the feed and keep up to five items whose title mentions `keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] on network failure or a non-2xx status,
    /// or [`SentimentError::Xml`] on a malformed feed.
    pub async fn fetch_matching(&self, keyword: &str) -> Result<Vec<FeedItem>, SentimentError> {
        let body = self
            .client
            .get(&self.feed_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let items = parse_feed_items(&body)?;
        tracing::debug!(
            feed = %self.feed_url,
            total = items.len(),
            "parsed RSS feed"
        );
        Ok(filter_by_keyword(items, keyword, MAX_RESULTS))
    }
}

/// Keep items whose title contains `keyword` (case-insensitive), at most `limit`.
///
/// A blank keyword matches every item.
#[must_use]
pub fn filter_by_keyword(items: Vec<FeedItem>, keyword: &str, limit: usize) -> Vec<FeedItem> {
    let needle = keyword.trim().to_lowercase();
    items
        .into_iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Parse `<item>` elements of an RSS 2.0 document.
///
/// Items without a title are skipped. `<link>` and `<pubDate>` are optional.
///
/// # Errors
///
/// Returns [`SentimentError::Xml`] if the XML is malformed.
pub fn parse_feed_items(xml: &str) -> Result<Vec<FeedItem>, SentimentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut published = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "item" {
                    in_item = true;
                    title.clear();
                    link.clear();
                    published.clear();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let raw = e.name();
                let name = std::str::from_utf8(raw.as_ref()).unwrap_or("");
                if name == "item" && in_item {
                    in_item = false;
                    if !title.is_empty() {
                        items.push(FeedItem {
                            title: title.clone(),
                            link: link.clone(),
                            published: (!published.is_empty()).then(|| published.clone()),
                        });
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = text_content(&e);
                    assign_field(&current_tag, text, &mut title, &mut link, &mut published);
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).trim().to_string();
                    assign_field(&current_tag, text, &mut title, &mut link, &mut published);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SentimentError::Xml(e)),
            _ => {}
        }
    }

    Ok(items)
}

/// Unescaped text, resolving HTML entities such as `&nbsp;` that feeds
/// often carry. Falls back to the raw text if an entity is unknown.
fn text_content(e: &BytesText<'_>) -> String {
    e.unescape_with(|entity| {
        resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
    })
    .map_or_else(
        |_| String::from_utf8_lossy(e.as_ref()).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn assign_field(
    tag: &str,
    text: String,
    title: &mut String,
    link: &mut String,
    published: &mut String,
) {
    match tag {
        "title" => *title = text,
        "link" => *link = text,
        "pubDate" => *published = text,
        _ => {}
    }
}
