// Extractor module - multi-strategy playlist retrieval with tiered fallback
//
// Strategies, strongest first:
// - API: official Data API v3, needs a pre-shared key, may fail
// - Scraping: pattern matching over the public pages, optionally via a relay
// - Simulation: synthetic data, never fails
//
// Scraping is always wrapped with simulation, so only the API layer can fail.

pub mod config;
pub mod duration;
pub mod errors;
pub mod http;
pub mod ids;
pub mod models;
pub mod orchestrator;
pub mod strategies;
pub mod thumbnail;
pub mod traits;
pub mod utils;

#[doc(hidden)]
pub mod testing;

pub use config::{ExtractorConfig, NetworkConfig};
pub use errors::ExtractionError;
pub use http::{HttpFetcher, HttpMethod, HttpRequest, HttpResponse, ReqwestFetcher};
pub use models::{ExtractionResult, PlaylistItem, ProgressEvent, Screenshot, VideoDetail};
pub use orchestrator::{ListingSource, PlaylistExtractor};
pub use traits::{NoProgress, PlaylistSource, ProgressSink, ResilientSource};
