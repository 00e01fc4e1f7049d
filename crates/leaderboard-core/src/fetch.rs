//! Network fetch capability handed to cell resolvers.
//!
//! Resolvers never reach for ambient I/O. The renderer receives a
//! `&dyn Fetcher` from its caller and passes the same reference into every
//! resolver call, so implementations must tolerate shared, repeated use.
//!
//! Two backends are provided:
//! - `HttpFetcher`: `reqwest` against an `http(s)://` base URL
//! - `FsFetcher`: files under a local directory (prerendered data dumps)
//!
//! An in-memory fake lives in [`crate::fakes`].

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::FetchError;
use crate::metrics::METRICS;

/// Request descriptor: a path relative to the data source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub path: String,
}

impl FetchRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Response returned by a [`Fetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub path: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: 404,
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into `FetchError::Status`.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                path: self.path,
                status: self.status,
            })
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// Request → response capability.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

// ---------------------------------------------------------------------------
// HttpFetcher
// ---------------------------------------------------------------------------

/// Fetches data files over HTTP(S).
pub struct HttpFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, FetchError> {
        if !is_http_source(base_url) {
            return Err(FetchError::InvalidSource(base_url.to_string()));
        }
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(HttpFetcher {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = self.url_for(&request.path);
        debug!(url = %url, "fetching");
        METRICS.inc_fetches();

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(FetchResponse {
            path: request.path.clone(),
            status,
            body,
        })
    }
}

// ---------------------------------------------------------------------------
// FsFetcher
// ---------------------------------------------------------------------------

/// Serves requests from files under a root directory.
///
/// Missing files produce a 404 response rather than an error, mirroring
/// what a static file server would answer.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve_path(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(FetchError::InvalidSource(format!(
                "path escapes data root: {}",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Fetcher for FsFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let file = self.resolve_path(&request.path)?;
        debug!(path = %file.display(), "reading");
        METRICS.inc_fetches();

        match tokio::fs::read(&file).await {
            Ok(body) => Ok(FetchResponse::ok(request.path.clone(), body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(FetchResponse::not_found(request.path.clone()))
            }
            Err(source) => Err(FetchError::Io {
                path: file.display().to_string(),
                source,
            }),
        }
    }
}

/// True when `source` names an `http://` or `https://` location.
pub fn is_http_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Pick a fetcher backend for a data source string.
pub fn fetcher_for(source: &str, user_agent: &str) -> Result<Box<dyn Fetcher>, FetchError> {
    if is_http_source(source) {
        Ok(Box::new(HttpFetcher::new(source, user_agent)?))
    } else {
        Ok(Box::new(FsFetcher::new(source)))
    }
}
