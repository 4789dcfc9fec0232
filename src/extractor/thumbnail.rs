// Thumbnail acquisition, used in place of a real frame capture

use std::sync::Arc;

use tracing::debug;

use super::http::{HttpFetcher, HttpRequest};
use super::models::Screenshot;
use super::utils;

const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

/// Thumbnail size conventions published under `img.youtube.com/vi/<id>/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailQuality {
    /// 1280x720, missing for many older uploads
    MaxRes,
    /// 480x360
    High,
    /// 320x180, always present
    Medium,
    /// 120x90
    Default,
}

impl ThumbnailQuality {
    fn file_name(&self) -> &'static str {
        match self {
            Self::MaxRes => "maxresdefault.jpg",
            Self::High => "hqdefault.jpg",
            Self::Medium => "mqdefault.jpg",
            Self::Default => "default.jpg",
        }
    }
}

pub fn thumbnail_url(video_id: &str, quality: ThumbnailQuality) -> String {
    format!("{}/{}/{}", THUMBNAIL_BASE, video_id, quality.file_name())
}

/// Probes for the max-resolution thumbnail and degrades without ever failing
pub struct ThumbnailProbe {
    fetcher: Arc<dyn HttpFetcher>,
}

impl ThumbnailProbe {
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn screenshot(&self, video_id: &str, title: &str) -> Screenshot {
        Screenshot {
            video_id: video_id.to_string(),
            title: title.to_string(),
            image_url: self.resolve(video_id).await,
            timestamp: utils::now_rfc3339(),
        }
    }

    async fn resolve(&self, video_id: &str) -> String {
        if video_id.is_empty() {
            return thumbnail_url(video_id, ThumbnailQuality::Default);
        }

        let maxres = thumbnail_url(video_id, ThumbnailQuality::MaxRes);
        match self.fetcher.request(&HttpRequest::head(&maxres)).await {
            Ok(response) if response.is_success() => maxres,
            Ok(response) => {
                debug!(video_id, status = response.status, "maxres thumbnail missing");
                thumbnail_url(video_id, ThumbnailQuality::Medium)
            }
            Err(e) => {
                debug!(video_id, error = %e, "thumbnail probe failed");
                thumbnail_url(video_id, ThumbnailQuality::Medium)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::errors::ExtractionError;
    use crate::extractor::http::HttpMethod;
    use crate::extractor::testing::ScriptedFetcher;

    #[tokio::test]
    async fn test_maxres_available() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("maxresdefault", 200, ""));
        let probe = ThumbnailProbe::new(fetcher.clone());

        let shot = probe.screenshot("abc123def45", "Intro").await;

        assert_eq!(shot.image_url, "https://img.youtube.com/vi/abc123def45/maxresdefault.jpg");
        assert_eq!(shot.title, "Intro");
        let requests = fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Head);
    }

    #[tokio::test]
    async fn test_missing_maxres_degrades_to_medium() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("maxresdefault", 404, ""));
        let probe = ThumbnailProbe::new(fetcher.clone());

        let shot = probe.screenshot("abc123def45", "Intro").await;

        assert_eq!(shot.image_url, "https://img.youtube.com/vi/abc123def45/mqdefault.jpg");
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_probe_error_degrades_to_medium() {
        let fetcher = Arc::new(
            ScriptedFetcher::offline()
                .fail("maxresdefault", ExtractionError::Network("reset".to_string())),
        );
        let probe = ThumbnailProbe::new(fetcher);

        let shot = probe.screenshot("abc123def45", "Intro").await;

        assert!(shot.image_url.ends_with("/mqdefault.jpg"));
    }

    #[tokio::test]
    async fn test_empty_id_skips_probe() {
        let fetcher = Arc::new(ScriptedFetcher::offline());
        let probe = ThumbnailProbe::new(fetcher.clone());

        let shot = probe.screenshot("", "Untitled").await;

        assert!(shot.image_url.ends_with("/default.jpg"));
        assert!(fetcher.requests().is_empty());
    }
}
