// API strategy: the official Data API v3 with a pre-shared key

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::extractor::config::ExtractorConfig;
use crate::extractor::duration;
use crate::extractor::errors::ExtractionError;
use crate::extractor::http::{HttpFetcher, HttpRequest, HttpResponse};
use crate::extractor::models::{PlaylistItem, VideoDetail};
use crate::extractor::traits::PlaylistSource;

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

impl Thumbnails {
    fn best_url(&self) -> String {
        self.high
            .as_ref()
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemResource {
    #[serde(default)]
    snippet: PlaylistItemSnippet,
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    position: u32,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResource {
    #[serde(default)]
    snippet: VideoSnippet,
    #[serde(default)]
    content_details: VideoContentDetails,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    published_at: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct VideoContentDetails {
    #[serde(default)]
    duration: String,
}

/// Counts arrive as decimal strings and may be hidden by the uploader
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn count(value: &Option<String>) -> u64 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

pub struct ApiStrategy {
    fetcher: Arc<dyn HttpFetcher>,
    api_key: String,
    api_base: String,
    page_size: u32,
}

impl ApiStrategy {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, api_key: &str, config: &ExtractorConfig) -> Self {
        Self {
            fetcher,
            api_key: api_key.to_string(),
            api_base: config.api_base.clone(),
            page_size: config.page_size,
        }
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<String, ExtractionError> {
        let base = format!("{}/{}", self.api_base, resource);
        let mut all: Vec<(&str, &str)> = params.to_vec();
        all.push(("key", self.api_key.as_str()));

        reqwest::Url::parse_with_params(&base, &all)
            .map(String::from)
            .map_err(|e| ExtractionError::Configuration(format!("Invalid API base {}: {}", base, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ExtractionError> {
        let request = HttpRequest::get(url).with_header("Accept", "application/json");
        let response = self.fetcher.request(&request).await?;
        if !response.is_success() {
            return Err(api_error(&response));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Prefer the API's own `error.message`, else the status reason phrase
fn api_error(response: &HttpResponse) -> ExtractionError {
    let message = serde_json::from_str::<ErrorEnvelope>(&response.body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| {
            reqwest::StatusCode::from_u16(response.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status")
                .to_string()
        });

    ExtractionError::Api {
        status: response.status,
        message,
    }
}

#[async_trait]
impl PlaylistSource for ApiStrategy {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistItem>, ExtractionError> {
        let page_size = self.page_size.to_string();
        let url = self.endpoint(
            "playlistItems",
            &[
                ("part", "snippet,contentDetails"),
                ("maxResults", page_size.as_str()),
                ("playlistId", playlist_id),
            ],
        )?;

        let list: ListResponse<PlaylistItemResource> = self.get_json(&url).await?;
        if list.items.is_empty() {
            return Err(ExtractionError::Api {
                status: 404,
                message: format!("Playlist {} is empty or was not found", playlist_id),
            });
        }

        debug!(playlist_id, count = list.items.len(), "playlist listed via API");
        Ok(list
            .items
            .into_iter()
            .map(|item| PlaylistItem {
                video_id: item.content_details.video_id,
                thumbnail_url: item.snippet.thumbnails.best_url(),
                title: item.snippet.title,
                position: item.snippet.position,
                published_at: item.snippet.published_at,
            })
            .collect())
    }

    async fn get_video_detail(&self, item: &PlaylistItem) -> Result<VideoDetail, ExtractionError> {
        let video_id = item.video_id.as_str();
        let url = self.endpoint(
            "videos",
            &[("part", "snippet,contentDetails,statistics"), ("id", video_id)],
        )?;

        let list: ListResponse<VideoResource> = self.get_json(&url).await?;
        let Some(video) = list.items.into_iter().next() else {
            return Err(ExtractionError::Api {
                status: 404,
                message: format!("Video {} not found", video_id),
            });
        };

        let parsed = duration::parse(&video.content_details.duration);
        Ok(VideoDetail {
            video_id: video_id.to_string(),
            views: count(&video.statistics.view_count),
            likes: count(&video.statistics.like_count),
            duration_seconds: parsed.total_seconds,
            duration: parsed.formatted,
            thumbnail_url: video.snippet.thumbnails.best_url(),
            title: video.snippet.title,
            published_date: video.snippet.published_at,
            channel_title: video.snippet.channel_title,
            description: video.snippet.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::testing::ScriptedFetcher;

    const PLAYLIST_JSON: &str = r#"{"items":[
        {"snippet":{"title":"Pilot","position":0,"publishedAt":"2024-01-02T03:04:05Z",
          "thumbnails":{"default":{"url":"https://i.ytimg.com/vi/v1/default.jpg"},
                        "high":{"url":"https://i.ytimg.com/vi/v1/hqdefault.jpg"}}},
         "contentDetails":{"videoId":"v1"}},
        {"snippet":{"title":"Second","position":1,"publishedAt":"2024-01-09T03:04:05Z",
          "thumbnails":{"default":{"url":"https://i.ytimg.com/vi/v2/default.jpg"}}},
         "contentDetails":{"videoId":"v2"}}
    ]}"#;

    const VIDEO_JSON: &str = r#"{"items":[{
        "snippet":{"title":"Pilot","publishedAt":"2024-01-02T03:04:05Z","channelTitle":"Chan",
                   "description":"About","thumbnails":{"high":{"url":"https://i.ytimg.com/vi/v1/hqdefault.jpg"}}},
        "contentDetails":{"duration":"PT1H2M3S"},
        "statistics":{"viewCount":"1500","likeCount":"42"}}]}"#;

    fn strategy(fetcher: Arc<ScriptedFetcher>) -> ApiStrategy {
        ApiStrategy::new(fetcher, "KEY", &ExtractorConfig::default())
    }

    fn item(video_id: &str) -> PlaylistItem {
        PlaylistItem {
            video_id: video_id.to_string(),
            title: String::new(),
            position: 0,
            thumbnail_url: String::new(),
            published_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_list_playlist_items() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/playlistItems", 200, PLAYLIST_JSON));
        let api = strategy(fetcher.clone());

        let items = api.list_playlist_items("PLabc").await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].video_id, "v1");
        assert_eq!(items[0].thumbnail_url, "https://i.ytimg.com/vi/v1/hqdefault.jpg");
        assert_eq!(items[1].thumbnail_url, "https://i.ytimg.com/vi/v2/default.jpg");
        assert_eq!(items[1].position, 1);

        let url = &fetcher.requests()[0].url;
        assert!(url.starts_with("https://www.googleapis.com/youtube/v3/playlistItems?"));
        assert!(url.contains("maxResults=50"));
        assert!(url.contains("playlistId=PLabc"));
        assert!(url.contains("key=KEY"));
    }

    #[tokio::test]
    async fn test_custom_api_base() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/videos", 200, VIDEO_JSON));
        let config = ExtractorConfig::default().with_api_base("http://127.0.0.1:8080/youtube/v3/");
        let api = ApiStrategy::new(fetcher.clone(), "KEY", &config);

        api.get_video_detail(&item("v1")).await.unwrap();

        let request = &fetcher.requests()[0];
        assert!(request
            .url
            .starts_with("http://127.0.0.1:8080/youtube/v3/videos?part="));
        assert!(request.headers.contains(&("Accept".to_string(), "application/json".to_string())));
    }

    #[tokio::test]
    async fn test_forbidden_uses_api_message() {
        let body = r#"{"error":{"code":403,"message":"The request cannot be completed because you have exceeded your quota."}}"#;
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/playlistItems", 403, body));

        let err = strategy(fetcher).list_playlist_items("PLabc").await.unwrap_err();

        match err {
            ExtractionError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("quota"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_status_reason_without_body() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/playlistItems", 500, ""));

        let err = strategy(fetcher).list_playlist_items("PLabc").await.unwrap_err();

        assert_eq!(
            err,
            ExtractionError::Api {
                status: 500,
                message: "Internal Server Error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_playlist_is_api_error() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/playlistItems", 200, r#"{"items":[]}"#));

        let err = strategy(fetcher).list_playlist_items("PLabc").await.unwrap_err();

        assert!(matches!(err, ExtractionError::Api { .. }));
    }

    #[tokio::test]
    async fn test_video_detail() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/videos", 200, VIDEO_JSON));

        let detail = strategy(fetcher).get_video_detail(&item("v1")).await.unwrap();

        assert_eq!(detail.views, 1500);
        assert_eq!(detail.likes, 42);
        assert_eq!(detail.duration_seconds, 3723);
        assert_eq!(detail.duration, "1:02:03");
        assert_eq!(detail.channel_title, "Chan");
        assert_eq!(detail.description, "About");
    }

    #[tokio::test]
    async fn test_hidden_statistics_default_to_zero() {
        let body = r#"{"items":[{"snippet":{"title":"T"},"contentDetails":{"duration":"PT5M"},"statistics":{}}]}"#;
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/videos", 200, body));

        let detail = strategy(fetcher).get_video_detail(&item("v1")).await.unwrap();

        assert_eq!(detail.views, 0);
        assert_eq!(detail.likes, 0);
        assert_eq!(detail.duration, "5:00");
    }

    #[tokio::test]
    async fn test_oversized_duration_reads_as_zero() {
        let body = r#"{"items":[{"snippet":{"title":"T"},"contentDetails":{"duration":"PT99999999999999999H"},"statistics":{}}]}"#;
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/videos", 200, body));

        let detail = strategy(fetcher).get_video_detail(&item("v1")).await.unwrap();

        assert_eq!(detail.duration_seconds, 0);
        assert_eq!(detail.duration, "0:00");
    }

    #[tokio::test]
    async fn test_unknown_video_is_api_error() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/videos", 200, r#"{"items":[]}"#));

        let err = strategy(fetcher).get_video_detail(&item("nope")).await.unwrap_err();

        assert!(matches!(err, ExtractionError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let fetcher = Arc::new(ScriptedFetcher::offline().route("/videos", 200, "<html>"));

        let err = strategy(fetcher).get_video_detail(&item("v1")).await.unwrap_err();

        assert!(matches!(err, ExtractionError::Parse(_)));
    }
}
