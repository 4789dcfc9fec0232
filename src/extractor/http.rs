// HTTP fetch abstraction shared by every strategy

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::config::NetworkConfig;
use super::errors::ExtractionError;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    /// Metadata-only request, used by the thumbnail probe
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Head => write!(f, "HEAD"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: Vec::new(),
        }
    }

    pub fn head(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Head,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything able to perform a single HTTP exchange.
///
/// A non-2xx answer is a successful exchange; only transport failures are `Err`.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn request(&self, request: &HttpRequest) -> Result<HttpResponse, ExtractionError>;
}

/// `HttpFetcher` backed by a shared `reqwest::Client`
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &NetworkConfig) -> Result<Self, ExtractionError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(u64::from(secs)));
        }

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                ExtractionError::Configuration(format!("Invalid proxy URL {}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn request(&self, request: &HttpRequest) -> Result<HttpResponse, ExtractionError> {
        debug!(method = %request.method, url = %redacted(&request.url), "http request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Head => self.client.head(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = match request.method {
            HttpMethod::Head => String::new(),
            HttpMethod::Get => response.text().await?,
        };

        debug!(status, bytes = body.len(), "http response");
        Ok(HttpResponse { status, body })
    }
}

/// `url` with the `key` query parameter masked, for logging
pub fn redacted(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.split('?').next().unwrap_or_default().to_string();
    };
    if !parsed.query_pairs().any(|(name, _)| name == "key") {
        return parsed.into();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" { "***".into() } else { value.into_owned() };
            (name.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}
