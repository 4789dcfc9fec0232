// Runtime configuration for the retrieval pipeline

use std::env;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The API refuses page sizes above this
pub const MAX_PAGE_SIZE: u32 = 50;

/// Network configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// HTTP or SOCKS5 proxy URL (e.g., "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Timeout in seconds
    pub timeout: Option<u32>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(30),
        }
    }
}

/// Configuration for a playlist extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Pre-shared API key; blank means "not configured"
    pub api_key: Option<String>,
    /// Allow degrading API -> scraping -> simulation
    pub scraping_fallback: bool,
    /// Relay prefix; the percent-encoded target URL is appended to it
    pub relay: Option<String>,
    pub network: NetworkConfig,
    pub api_base: String,
    pub page_size: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            scraping_fallback: true,
            relay: None,
            network: NetworkConfig::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ExtractorConfig {
    /// Defaults overridden by `YOUTUBE_API_KEY`, `PLAYLIST_EXTRACTOR_NO_FALLBACK`,
    /// `PLAYLIST_EXTRACTOR_RELAY`, `PLAYLIST_EXTRACTOR_PROXY` and `PLAYLIST_EXTRACTOR_API_BASE`
    pub fn from_env() -> Self {
        let no_fallback = env::var("PLAYLIST_EXTRACTOR_NO_FALLBACK")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let mut config = Self::default()
            .with_api_key(env::var("YOUTUBE_API_KEY").ok())
            .with_scraping_fallback(!no_fallback)
            .with_relay(env::var("PLAYLIST_EXTRACTOR_RELAY").ok());
        config.network.proxy = env::var("PLAYLIST_EXTRACTOR_PROXY").ok();
        if let Ok(base) = env::var("PLAYLIST_EXTRACTOR_API_BASE") {
            config = config.with_api_base(base);
        }
        config
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn with_scraping_fallback(mut self, enabled: bool) -> Self {
        self.scraping_fallback = enabled;
        self
    }

    pub fn with_relay(mut self, relay: Option<String>) -> Self {
        self.relay = relay.filter(|r| !r.trim().is_empty());
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.network.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: u32) -> Self {
        self.network.timeout = Some(seconds);
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// The API key if one is set and non-blank
    pub fn active_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
