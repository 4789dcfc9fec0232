// Orchestrator with tiered fallback: API -> scraping -> simulation
//
// Listing and per-video fetches are strictly sequential so progress always
// reflects one video in flight. A run either returns a complete result or an
// error; partial results are never observable.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::config::ExtractorConfig;
use super::errors::ExtractionError;
use super::http::{HttpFetcher, ReqwestFetcher};
use super::models::{ExtractionResult, PlaylistItem, ProgressEvent, Screenshot, VideoDetail};
use super::strategies::{ApiStrategy, ScrapingStrategy, ScrapingWithSimulationFallback};
use super::thumbnail::ThumbnailProbe;
use super::traits::{PlaylistSource, ProgressSink, ResilientSource};

/// Strategy that produced the playlist listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Api,
    /// Scraping, possibly degraded to simulation internally
    Scraping,
}

/// Accumulated output of the run in progress
#[derive(Default)]
struct RunState {
    videos: Vec<VideoDetail>,
    screenshots: Vec<Screenshot>,
    total_duration: u64,
}

impl RunState {
    fn with_capacity(n: usize) -> Self {
        Self {
            videos: Vec::with_capacity(n),
            screenshots: Vec::with_capacity(n),
            total_duration: 0,
        }
    }

    /// Video and screenshot are pushed together to keep the two sequences aligned
    fn push(&mut self, video: VideoDetail, screenshot: Screenshot) {
        self.total_duration = self.total_duration.saturating_add(video.duration_seconds);
        self.videos.push(video);
        self.screenshots.push(screenshot);
    }

    fn into_result(self) -> ExtractionResult {
        ExtractionResult {
            total_videos: self.videos.len(),
            videos: self.videos,
            screenshots: self.screenshots,
            total_duration: self.total_duration,
        }
    }
}

/// Strategies resolved for a single run
struct Strategies {
    api: Option<ApiStrategy>,
    /// Scraping with simulation behind it in every real run
    scraping: Box<dyn ResilientSource>,
    thumbnails: ThumbnailProbe,
}

pub struct PlaylistExtractor {
    config: ExtractorConfig,
    fetcher: Arc<dyn HttpFetcher>,
}

impl PlaylistExtractor {
    /// Extractor backed by a real HTTP client
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractionError> {
        let fetcher = ReqwestFetcher::new(&config.network)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: ExtractorConfig, fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.config.api_key = Some(key.into());
        info!("API key configured");
    }

    pub fn set_scraping_fallback(&mut self, enabled: bool) {
        self.config.scraping_fallback = enabled;
    }

    /// Extract every video of `playlist_id`, reporting progress to `sink`
    pub async fn process_playlist(
        &self,
        playlist_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ExtractionResult, ExtractionError> {
        match self.run(playlist_id, sink).await {
            Ok(result) => {
                info!(
                    playlist_id,
                    videos = result.total_videos,
                    total_duration = result.total_duration,
                    "playlist processed"
                );
                Ok(result)
            }
            Err(e) => {
                error!(playlist_id, error = %e, "playlist processing failed");
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        playlist_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ExtractionResult, ExtractionError> {
        let strategies = self.resolve_strategies()?;
        self.run_with(&strategies, playlist_id, sink).await
    }

    async fn run_with(
        &self,
        strategies: &Strategies,
        playlist_id: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ExtractionResult, ExtractionError> {
        sink.emit(ProgressEvent {
            status: "Fetching playlist information...".to_string(),
            progress: 0,
            current_video: None,
            processed: 0,
            total: 0,
        });

        let (items, source) = self.list_playlist(strategies, playlist_id).await?;
        if items.is_empty() {
            return Err(ExtractionError::EmptyPlaylist);
        }
        let using_api = source == ListingSource::Api;
        let total = items.len();
        info!(playlist_id, total, source = ?source, "playlist resolved");

        sink.emit(ProgressEvent {
            status: "Playlist found. Starting processing...".to_string(),
            progress: 0,
            current_video: None,
            processed: 0,
            total,
        });

        let mut state = RunState::with_capacity(total);
        for (i, item) in items.iter().enumerate() {
            sink.emit(ProgressEvent {
                status: format!("Processing video {} of {}...", i + 1, total),
                progress: ProgressEvent::percent(i, total),
                current_video: Some(item.title.clone()),
                processed: i,
                total,
            });

            let video = self.video_detail(strategies, item, using_api).await?;
            let screenshot = strategies.thumbnails.screenshot(&item.video_id, &item.title).await;
            state.push(video, screenshot);

            sink.emit(ProgressEvent {
                status: format!("Processed: {}", item.title),
                progress: ProgressEvent::percent(i + 1, total),
                current_video: Some(item.title.clone()),
                processed: i + 1,
                total,
            });
        }

        sink.emit(ProgressEvent {
            status: "Processing complete!".to_string(),
            progress: 100,
            current_video: None,
            processed: total,
            total,
        });

        Ok(state.into_result())
    }

    /// Fails before any network call when no strategy is permitted
    fn resolve_strategies(&self) -> Result<Strategies, ExtractionError> {
        let api_key = self.config.active_api_key();
        if api_key.is_none() && !self.config.scraping_fallback {
            return Err(ExtractionError::Configuration(
                "API key not configured. Provide a YouTube Data API key or enable the scraping fallback."
                    .to_string(),
            ));
        }

        let api = api_key.map(|key| ApiStrategy::new(self.fetcher.clone(), key, &self.config));
        let scraping = ScrapingWithSimulationFallback::new(ScrapingStrategy::new(
            self.fetcher.clone(),
            self.config.relay.clone(),
        ));

        Ok(Strategies {
            api,
            scraping: Box::new(scraping),
            thumbnails: ThumbnailProbe::new(self.fetcher.clone()),
        })
    }

    async fn list_playlist(
        &self,
        strategies: &Strategies,
        playlist_id: &str,
    ) -> Result<(Vec<PlaylistItem>, ListingSource), ExtractionError> {
        let Some(api) = &strategies.api else {
            debug!(playlist_id, "no API key, using scraping");
            let items = strategies.scraping.list_playlist_items(playlist_id).await;
            return Ok((items, ListingSource::Scraping));
        };

        match api.list_playlist_items(playlist_id).await {
            Ok(items) => {
                debug!(playlist_id, "playlist fetched via API");
                Ok((items, ListingSource::Api))
            }
            Err(e) if self.config.scraping_fallback && e.is_recoverable() => {
                warn!(playlist_id, status = ?e.status(), error = %e, "API listing failed, falling back to scraping");
                let items = strategies.scraping.list_playlist_items(playlist_id).await;
                Ok((items, ListingSource::Scraping))
            }
            Err(e) => Err(e),
        }
    }

    /// `using_api` is fixed by the listing call; each API detail call still
    /// falls back to scraping on its own when allowed
    async fn video_detail(
        &self,
        strategies: &Strategies,
        item: &PlaylistItem,
        using_api: bool,
    ) -> Result<VideoDetail, ExtractionError> {
        let api = match &strategies.api {
            Some(api) if using_api => api,
            _ => {
                return Ok(strategies
                    .scraping
                    .get_video_detail(&item.video_id, Some(&item.title))
                    .await)
            }
        };

        match api.get_video_detail(item).await {
            Ok(detail) => Ok(detail),
            Err(e) if self.config.scraping_fallback => {
                warn!(
                    video_id = %item.video_id,
                    status = ?e.status(),
                    error = %e,
                    "API detail failed, falling back to scraping"
                );
                Ok(strategies
                    .scraping
                    .get_video_detail(&item.video_id, Some(&item.title))
                    .await)
            }
            Err(e) => Err(ExtractionError::ExtractionFailure {
                video_id: item.video_id.clone(),
                reason: e.to_string(),
            }),
        }
    }
}
