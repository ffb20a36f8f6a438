use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::SignatureAndResolution;
use super::error::SignatureError;

/// Minimal async interface used by the orchestrators.
///
/// `Ok(None)` is the "no result" sentinel: the backend ran but produced no
/// usable signature for the file.
pub trait SignatureClient: Send + Sync {
    /// Computes a signature for the scan stored at `file_path`.
    fn generate(
        &self,
        file_path: &str,
    ) -> impl std::future::Future<Output = Result<Option<SignatureAndResolution>, SignatureError>> + Send;
}

#[derive(Serialize)]
struct SignatureRequest<'a> {
    file_path: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignatureResponse {
    pub(crate) signature: Option<Vec<u8>>,
    pub(crate) resolution: Option<f64>,
}

impl SignatureResponse {
    /// Collapses null/empty backend answers into the sentinel.
    pub(crate) fn into_result(self) -> Option<SignatureAndResolution> {
        match (self.signature, self.resolution) {
            (Some(signature), Some(resolution)) if !signature.is_empty() => {
                Some(SignatureAndResolution {
                    signature,
                    resolution,
                })
            }
            _ => None,
        }
    }
}

#[derive(Clone)]
/// HTTP client for the external signature computation backend.
pub struct HttpSignatureClient {
    http: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for HttpSignatureClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSignatureClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpSignatureClient {
    /// Creates a client for `base_url` with the given per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SignatureError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SignatureError::ConnectionFailed {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from engine configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self, SignatureError> {
        Self::new(&config.backend_url, config.request_timeout)
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SignatureClient for HttpSignatureClient {
    async fn generate(
        &self,
        file_path: &str,
    ) -> Result<Option<SignatureAndResolution>, SignatureError> {
        let url = format!("{}/signature", self.base_url);

        debug!(file_path, url, "requesting signature generation");

        let response = self
            .http
            .post(&url)
            .json(&SignatureRequest { file_path })
            .send()
            .await
            .map_err(|e| SignatureError::ConnectionFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        // The backend signals "nothing computable for this scan" with an
        // empty answer rather than an error status.
        if response.status() == StatusCode::NO_CONTENT
            || response.status() == StatusCode::NOT_FOUND
        {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(SignatureError::BackendStatus {
                status: response.status().as_u16(),
                file_path: file_path.to_string(),
            });
        }

        let body: SignatureResponse =
            response
                .json()
                .await
                .map_err(|e| SignatureError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        Ok(body.into_result())
    }
}
