// Strategy trait definitions and the progress sink

use async_trait::async_trait;

use super::errors::ExtractionError;
use super::models::{PlaylistItem, ProgressEvent, VideoDetail};

/// A strategy that can fail (API, raw scraping)
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Name of the strategy (for logging)
    fn name(&self) -> &'static str;

    /// List the entries of a playlist, in playlist order
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>, ExtractionError>;

    /// Fetch metadata for a single entry
    async fn get_video_detail(&self, item: &PlaylistItem) -> Result<VideoDetail, ExtractionError>;
}

/// A strategy that always produces a value
#[async_trait]
pub trait ResilientSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Never empty
    async fn list_playlist_items(&self, playlist_id: &str) -> Vec<PlaylistItem>;

    /// `title` overrides whatever title the strategy would otherwise derive
    async fn get_video_detail(&self, video_id: &str, title: Option<&str>) -> VideoDetail;
}

/// Receives progress events synchronously, in emission order
pub trait ProgressSink {
    fn emit(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent),
{
    fn emit(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Sink that drops every event
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _event: ProgressEvent) {}
}
