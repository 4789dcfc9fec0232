// Composes a fallible source with the simulation strategy into one that cannot fail

use async_trait::async_trait;
use tracing::warn;

use super::simulation::SimulationStrategy;
use crate::extractor::models::{PlaylistItem, VideoDetail};
use crate::extractor::traits::{PlaylistSource, ResilientSource};

/// Runs the wrapped source and substitutes simulated data for any failure
pub struct WithSimulationFallback<S> {
    primary: S,
    simulation: SimulationStrategy,
}

/// The weakest real strategy: page scraping backed by simulation
pub type ScrapingWithSimulationFallback = WithSimulationFallback<super::ScrapingStrategy>;

impl<S: PlaylistSource> WithSimulationFallback<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            simulation: SimulationStrategy::new(),
        }
    }
}

#[async_trait]
impl<S: PlaylistSource> ResilientSource for WithSimulationFallback<S> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn list_playlist_items(&self, playlist_id: &str) -> Vec<PlaylistItem> {
        match self.primary.list_playlist_items(playlist_id).await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                warn!(
                    strategy = self.primary.name(),
                    playlist_id, "no items extracted, falling back to simulation"
                );
                self.simulation.playlist_items(playlist_id)
            }
            Err(e) => {
                warn!(
                    strategy = self.primary.name(),
                    playlist_id,
                    error = %e,
                    "playlist fetch failed, falling back to simulation"
                );
                self.simulation.playlist_items(playlist_id)
            }
        }
    }

    async fn get_video_detail(&self, video_id: &str, title: Option<&str>) -> VideoDetail {
        let item = PlaylistItem {
            video_id: video_id.to_string(),
            title: title.unwrap_or_default().to_string(),
            position: 0,
            thumbnail_url: String::new(),
            published_at: String::new(),
        };

        match self.primary.get_video_detail(&item).await {
            Ok(detail) => detail,
            Err(e) => {
                warn!(
                    strategy = self.primary.name(),
                    video_id,
                    error = %e,
                    "video fetch failed, falling back to simulation"
                );
                self.simulation.video_detail(video_id, title)
            }
        }
    }
}
