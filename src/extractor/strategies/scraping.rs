// Scraping strategy: pattern matching over the public watch/playlist pages
//
// The pages embed their data as inline script literals, so fields are pulled
// out with regexes over the raw markup rather than through a DOM. Any field
// whose pattern misses falls back to an empty/zero/"Unknown" value.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::extractor::errors::ExtractionError;
use crate::extractor::http::{HttpFetcher, HttpRequest};
use crate::extractor::models::{PlaylistItem, VideoDetail};
use crate::extractor::thumbnail::{thumbnail_url, ThumbnailQuality};
use crate::extractor::traits::PlaylistSource;
use crate::extractor::{duration, utils};

const PAGE_BASE: &str = "https://www.youtube.com";
const UNKNOWN_CHANNEL: &str = "Unknown Channel";
/// Patterns and labels assume the English rendering of the pages
const PAGE_LANGUAGE: &str = "en-US,en;q=0.9";

lazy_static::lazy_static! {
    static ref VIDEO_ID_RE: Regex = Regex::new(r#"videoId":"([^"]+)""#).unwrap();
    static ref TITLE_RE: Regex = Regex::new(r#"title":\{"runs":\[\{"text":"([^"]+)""#).unwrap();
    static ref VIEW_COUNT_RE: Regex =
        Regex::new(r#""viewCount":\{"simpleText":"([^"]+)""#).unwrap();
    static ref LIKES_RE: Regex = Regex::new(r#""likes":"([^"]+)"|"likeCount":"([^"]+)""#).unwrap();
    static ref LENGTH_RE: Regex = Regex::new(r#""lengthSeconds":"([^"]+)""#).unwrap();
    static ref PUBLISH_DATE_RE: Regex = Regex::new(r#""publishDate":"([^"]+)""#).unwrap();
    static ref CHANNEL_RE: Regex = Regex::new(r#""ownerChannelName":"([^"]+)""#).unwrap();
}

pub struct ScrapingStrategy {
    fetcher: Arc<dyn HttpFetcher>,
    relay: Option<String>,
}

impl ScrapingStrategy {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, relay: Option<String>) -> Self {
        Self { fetcher, relay }
    }

    pub fn playlist_page_url(&self, playlist_id: &str) -> String {
        let target = format!("{}/playlist?list={}", PAGE_BASE, playlist_id);
        utils::relay_url(self.relay.as_deref(), &target)
    }

    pub fn watch_page_url(&self, video_id: &str) -> String {
        let target = format!("{}/watch?v={}", PAGE_BASE, video_id);
        utils::relay_url(self.relay.as_deref(), &target)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ExtractionError> {
        let request = HttpRequest::get(url).with_header("Accept-Language", PAGE_LANGUAGE);
        let response = self.fetcher.request(&request).await?;
        if !response.is_success() {
            return Err(ExtractionError::Relay {
                status: response.status,
            });
        }
        Ok(response.body)
    }
}

#[async_trait]
impl PlaylistSource for ScrapingStrategy {
    fn name(&self) -> &'static str {
        "scraping"
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>, ExtractionError> {
        let html = self.fetch_page(&self.playlist_page_url(playlist_id)).await?;
        let items = extract_playlist_items(&html);
        debug!(playlist_id, count = items.len(), "extracted playlist items from page");

        if items.is_empty() {
            return Err(ExtractionError::Parse(
                "no videos found in playlist page".to_string(),
            ));
        }
        Ok(items)
    }

    async fn get_video_detail(&self, item: &PlaylistItem) -> Result<VideoDetail, ExtractionError> {
        let html = self.fetch_page(&self.watch_page_url(&item.video_id)).await?;
        Ok(extract_video_detail(&html, &item.video_id, &item.title))
    }
}

/// Pair every `videoId` with the title at the same index, up to the shorter list
pub fn extract_playlist_items(html: &str) -> Vec<PlaylistItem> {
    let ids = VIDEO_ID_RE.captures_iter(html).map(|c| c[1].to_string());
    let titles = TITLE_RE.captures_iter(html).map(|c| c[1].to_string());
    let published_at = utils::now_rfc3339();

    ids.zip(titles)
        .enumerate()
        .map(|(i, (video_id, title))| PlaylistItem {
            thumbnail_url: thumbnail_url(&video_id, ThumbnailQuality::High),
            video_id,
            title,
            position: i as u32,
            published_at: published_at.clone(),
        })
        .collect()
}

/// Pull the detail fields out of a watch page; never fails
pub fn extract_video_detail(html: &str, video_id: &str, title: &str) -> VideoDetail {
    let views = first_capture(&VIEW_COUNT_RE, html)
        .map(|v| utils::parse_digits(&v))
        .unwrap_or(0);

    let likes = LIKES_RE
        .captures(html)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| utils::parse_digits(m.as_str()))
        .unwrap_or(0);

    let duration_seconds = first_capture(&LENGTH_RE, html)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);

    let published_date = first_capture(&PUBLISH_DATE_RE, html).unwrap_or_else(utils::today_iso_date);
    let channel_title = first_capture(&CHANNEL_RE, html).unwrap_or_else(|| UNKNOWN_CHANNEL.to_string());

    VideoDetail {
        video_id: video_id.to_string(),
        title: title.to_string(),
        views,
        likes,
        duration_seconds,
        duration: duration::format(duration_seconds),
        published_date,
        channel_title,
        description: String::new(),
        thumbnail_url: thumbnail_url(video_id, ThumbnailQuality::High),
    }
}

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
