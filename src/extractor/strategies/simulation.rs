// Simulation strategy: synthetic data, no network, never fails

use async_trait::async_trait;
use rand::Rng;

use crate::extractor::duration;
use crate::extractor::ids::random_video_id;
use crate::extractor::models::{PlaylistItem, VideoDetail};
use crate::extractor::thumbnail::{thumbnail_url, ThumbnailQuality};
use crate::extractor::traits::ResilientSource;
use crate::extractor::utils;

pub const MIN_ITEMS: usize = 5;
pub const MAX_ITEMS: usize = 15;

const SAMPLE_CHANNEL: &str = "Sample Channel";
const SAMPLE_DESCRIPTION: &str = "This is a sample description for a simulated video.";

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationStrategy;

impl SimulationStrategy {
    pub fn new() -> Self {
        Self
    }

    pub fn playlist_items(&self, playlist_id: &str) -> Vec<PlaylistItem> {
        let count = rand::thread_rng().gen_range(MIN_ITEMS..=MAX_ITEMS);
        let short_id = prefix(playlist_id, 6);

        (0..count)
            .map(|i| {
                let video_id = random_video_id();
                PlaylistItem {
                    title: format!("Video {} of Playlist {}", i + 1, short_id),
                    position: i as u32,
                    thumbnail_url: thumbnail_url(&video_id, ThumbnailQuality::Default),
                    published_at: utils::random_instant_within_year(),
                    video_id,
                }
            })
            .collect()
    }

    pub fn video_detail(&self, video_id: &str, title: Option<&str>) -> VideoDetail {
        let mut rng = rand::thread_rng();
        let views = rng.gen_range(1_000..1_001_000);
        let likes = rng.gen_range(100..50_100);
        let duration_seconds = rng.gen_range(120..1_020);

        VideoDetail {
            video_id: video_id.to_string(),
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| format!("Sample Video {}", prefix(video_id, 6))),
            views,
            likes,
            duration_seconds,
            duration: duration::format(duration_seconds),
            published_date: utils::random_instant_within_year(),
            channel_title: SAMPLE_CHANNEL.to_string(),
            description: SAMPLE_DESCRIPTION.to_string(),
            thumbnail_url: thumbnail_url(video_id, ThumbnailQuality::Default),
        }
    }
}

#[async_trait]
impl ResilientSource for SimulationStrategy {
    fn name(&self) -> &'static str {
        "simulation"
    }

    async fn list_playlist_items(&self, playlist_id: &str) -> Vec<PlaylistItem> {
        self.playlist_items(playlist_id)
    }

    async fn get_video_detail(&self, video_id: &str, title: Option<&str>) -> VideoDetail {
        self.video_detail(video_id, title)
    }
}

fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
