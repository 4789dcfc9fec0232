// Scripted HTTP fetcher shared by unit and integration tests

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::errors::ExtractionError;
use super::http::{HttpFetcher, HttpRequest, HttpResponse};

/// Answers by the first route whose pattern occurs in the URL; unmatched URLs fail as offline
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Vec<(String, Result<HttpResponse, ExtractionError>)>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedFetcher {
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            pattern.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        ));
        self
    }

    pub fn fail(mut self, pattern: &str, error: ExtractionError) -> Self {
        self.routes.push((pattern.to_string(), Err(error)));
        self
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.seen().iter().map(|r| r.url.clone()).collect()
    }

    fn seen(&self) -> MutexGuard<'_, Vec<HttpRequest>> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpFetcher for ScriptedFetcher {
    async fn request(&self, request: &HttpRequest) -> Result<HttpResponse, ExtractionError> {
        self.seen().push(request.clone());
        self.routes
            .iter()
            .find(|(pattern, _)| request.url.contains(pattern.as_str()))
            .map(|(_, answer)| answer.clone())
            .unwrap_or_else(|| Err(ExtractionError::Network("offline".to_string())))
    }
}
