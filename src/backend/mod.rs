//! Client for the external row service (PostgREST-style REST endpoints
//! plus an auth sub-service). The application never owns authoritative
//! state; every read is a fresh fetch and every write goes through here.

pub mod query;

pub use query::Query;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend returned no rows where one was expected")]
    EmptyRepresentation,

    #[error("Missing or malformed Content-Range header")]
    ContentRange,

    #[error("Malformed auth response: {0}")]
    AuthResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.anon_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.anon_key)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(BackendError::Status { status, body })
        }
    }

    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let response = self
            .http
            .get(self.rest_url(table))
            .headers(self.auth_headers())
            .query(&query.to_pairs())
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Like `select`, but resolves to at most one row.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Option<T>, BackendError> {
        let mut rows = self.select(table, &query.clone().limit(1)).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// Count-only query: no row payload, total parsed from Content-Range.
    pub async fn count(&self, table: &str, query: &Query) -> Result<u64, BackendError> {
        let response = self
            .http
            .get(self.rest_url(table))
            .headers(self.auth_headers())
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .query(&query.to_pairs())
            .send()
            .await?;
        let response = Self::check(response).await?;
        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or(BackendError::ContentRange)?;
        content_range
            .rsplit('/')
            .next()
            .and_then(|total| total.parse().ok())
            .ok_or(BackendError::ContentRange)
    }

    /// Insert one row and return the stored representation.
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<R, BackendError> {
        let response = self
            .http
            .post(self.rest_url(table))
            .headers(self.auth_headers())
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let mut rows: Vec<R> = response.json().await?;
        if rows.is_empty() {
            Err(BackendError::EmptyRepresentation)
        } else {
            Ok(rows.remove(0))
        }
    }

    /// Patch matching rows; returns the updated representations. An empty
    /// result means no row matched the filters.
    pub async fn update(
        &self,
        table: &str,
        query: &Query,
        patch: &serde_json::Value,
    ) -> Result<Vec<serde_json::Value>, BackendError> {
        let response = self
            .http
            .patch(self.rest_url(table))
            .headers(self.auth_headers())
            .header("Prefer", "return=representation")
            .query(&query.to_pairs())
            .json(patch)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, table: &str, query: &Query) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.rest_url(table))
            .headers(self.auth_headers())
            .query(&query.to_pairs())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Create an identity + credential pair with the auth sub-service.
    /// Returns the new identity's id.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: serde_json::Value,
    ) -> Result<String, BackendError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/signup", self.base_url))
            .headers(self.auth_headers())
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "data": metadata,
            }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body: serde_json::Value = response.json().await?;
        body.get("id")
            .or_else(|| body.get("user").and_then(|u| u.get("id")))
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| BackendError::AuthResponse(body.to_string()))
    }

    /// Invalidate any server-side session. Best-effort; callers log failures.
    pub async fn sign_out(&self) -> Result<(), BackendError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/logout", self.base_url))
            .headers(self.auth_headers())
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
