//! Remote photo account over a Graph-style media API.

use super::{RemoteSource, SourceError};
use crate::config::RemoteConfig;
use async_trait::async_trait;
use chrono::DateTime;
use gridmuse_engine::{MediaKind, RemoteMedia};
use serde::Deserialize;

/// Fields requested for each media item.
const MEDIA_FIELDS: &str = "id,timestamp,permalink,media_type,media_url,thumbnail_url";

/// Upper bound on followed pages.
const DEFAULT_MAX_PAGES: usize = 50;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Debug, Deserialize)]
struct MediaPage {
    #[serde(default)]
    data: Vec<MediaItem>,
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MediaItem {
    id: String,
    media_type: Option<String>,
    media_url: Option<String>,
    thumbnail_url: Option<String>,
    timestamp: Option<String>,
    #[serde(default)]
    permalink: String,
}

impl MediaItem {
    fn into_media(self) -> RemoteMedia {
        RemoteMedia {
            external_id: self.id,
            media_kind: MediaKind::from(self.media_type.unwrap_or_default()),
            media_url: self.media_url,
            thumbnail_url: self.thumbnail_url,
            timestamp: self.timestamp.as_deref().and_then(parse_timestamp),
            permalink: self.permalink,
        }
    }
}

/// Milliseconds since epoch, `None` when unparseable.
fn parse_timestamp(value: &str) -> Option<i64> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Client for the remote account's media endpoint.
pub struct GraphApiSource {
    client: reqwest::Client,
    config: RemoteConfig,
    max_pages: usize,
}

impl GraphApiSource {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Limit how many pages one fetch follows.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    fn first_page_url(&self) -> Result<url::Url, SourceError> {
        let base = self.config.base_url.trim_end_matches('/');
        let mut url = url::Url::parse(&format!(
            "{}/{}/{}/media",
            base, self.config.api_version, self.config.user_id
        ))
        .map_err(|e| SourceError::Unavailable(format!("invalid remote URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("fields", MEDIA_FIELDS)
            .append_pair("access_token", &self.config.access_token);
        Ok(url)
    }
}

#[async_trait]
impl RemoteSource for GraphApiSource {
    async fn fetch(&self) -> Result<Vec<RemoteMedia>, SourceError> {
        let mut media = Vec::new();
        let mut next = Some(self.first_page_url()?.to_string());
        let mut pages = 0;

        while let Some(url) = next.take() {
            if pages == self.max_pages {
                tracing::warn!(pages, "Remote page limit reached, stopping");
                break;
            }
            pages += 1;

            // Page URLs carry the access token; keep them out of errors.
            let page: MediaPage = self
                .client
                .get(&url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(reqwest::Error::without_url)?
                .json()
                .await
                .map_err(reqwest::Error::without_url)?;

            media.extend(page.data.into_iter().map(MediaItem::into_media));
            next = page.paging.and_then(|p| p.next).filter(|n| !n.is_empty());
        }

        tracing::debug!(pages, count = media.len(), "Fetched remote media");
        Ok(media)
    }
}
