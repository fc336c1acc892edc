//! Blocking client for the paper-listing backend.
//!
//! Two endpoints: `GET /papers/categories` and `GET /papers/{category}`.
//! No retries and no pagination; a failed request is reported as-is.

use std::time::Duration;

use papers_model::{CategoriesResponse, CategoryResponse, Paper};
use serde::Deserialize;

use crate::utils::error::{PapersError, PapersResult};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_ENV_VAR: &str = "BETTER_PAPERS_API_URL";

/// Matches the backend's own upstream timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The backend returns a bare list; older deployments wrap it.
#[derive(Deserialize)]
#[serde(untagged)]
enum PapersBody {
    Wrapped(CategoryResponse),
    Bare(Vec<Paper>),
}

impl From<PapersBody> for Vec<Paper> {
    fn from(body: PapersBody) -> Self {
        match body {
            PapersBody::Wrapped(resp) => resp.papers,
            PapersBody::Bare(papers) => papers,
        }
    }
}

impl From<reqwest::Error> for PapersError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PapersError::decode(err.to_string())
        } else {
            PapersError::http(err.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> PapersResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Use `BETTER_PAPERS_API_URL`, falling back to the local backend.
    pub fn from_env() -> PapersResult<Self> {
        let url = std::env::var(API_URL_ENV_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn categories_url(&self) -> String {
        format!("{}/papers/categories", self.base_url)
    }

    pub fn papers_url(&self, category: &str) -> String {
        format!("{}/papers/{}", self.base_url, category.trim())
    }

    pub fn categories(&self) -> PapersResult<Vec<String>> {
        let body: CategoriesResponse = self.get_json(&self.categories_url())?;
        Ok(body.categories)
    }

    pub fn papers(&self, category: &str) -> PapersResult<Vec<Paper>> {
        let body: PapersBody = self.get_json(&self.papers_url(category))?;
        Ok(body.into())
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> PapersResult<T> {
        tracing::debug!(url, "fetching");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "backend request failed");
            return Err(PapersError::status(status.as_u16(), url));
        }
        let text = response.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}
