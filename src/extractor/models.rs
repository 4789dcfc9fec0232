// Common data models for the retrieval pipeline

use serde::{Deserialize, Serialize};

/// One entry of a playlist as returned by any strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: String,
    /// Zero-based position inside the playlist
    pub position: u32,
    pub thumbnail_url: String,
    /// RFC 3339 timestamp
    pub published_at: String,
}

/// Per-video metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub video_id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub duration_seconds: u64,
    /// Clock rendering of `duration_seconds` (`M:SS` or `H:MM:SS`)
    pub duration: String,
    /// RFC 3339 timestamp or bare `YYYY-MM-DD` date (scraped pages only carry the date)
    pub published_date: String,
    pub channel_title: String,
    pub description: String,
    pub thumbnail_url: String,
}

/// Thumbnail standing in for a real frame capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub video_id: String,
    pub title: String,
    pub image_url: String,
    /// Capture time, RFC 3339
    pub timestamp: String,
}

/// Aggregate output of one run.
///
/// `videos[i]` and `screenshots[i]` always describe the same playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub videos: Vec<VideoDetail>,
    pub screenshots: Vec<Screenshot>,
    /// Sum of every `videos[i].duration_seconds`
    pub total_duration: u64,
    pub total_videos: usize,
}

/// Progress information handed to the caller's sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub status: String,
    /// Percent, 0..=100
    pub progress: u8,
    pub current_video: Option<String>,
    pub processed: usize,
    pub total: usize,
}

impl ProgressEvent {
    /// Percentage of `done` out of `total`, rounded half up and clamped to 100
    pub fn percent(done: usize, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        let pct = (done as f64 / total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        assert_eq!(ProgressEvent::percent(0, 3), 0);
        assert_eq!(ProgressEvent::percent(1, 3), 33);
        assert_eq!(ProgressEvent::percent(2, 3), 67);
        assert_eq!(ProgressEvent::percent(1, 8), 13);
        assert_eq!(ProgressEvent::percent(3, 3), 100);
        assert_eq!(ProgressEvent::percent(5, 0), 0);
    }

    #[test]
    fn test_camel_case_serialization() {
        let shot = Screenshot {
            video_id: "abc".to_string(),
            title: "t".to_string(),
            image_url: "u".to_string(),
            timestamp: "now".to_string(),
        };
        let json = serde_json::to_value(&shot).unwrap();
        assert_eq!(json["videoId"], "abc");
        assert_eq!(json["imageUrl"], "u");
    }
}
