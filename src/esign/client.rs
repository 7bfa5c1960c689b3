//! E-Sign API Client Module
//!
//! This module provides the HTTP client for the remote e-sign REST API. It
//! owns the bearer credentials (built once at construction and reused for
//! every call), resolves the account's regional API access point through the
//! discovery endpoint (cached for the process lifetime), and validates every
//! response against the status code the endpoint is documented to return.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::config::EsignConfig;
use crate::esign::agreement::{AgreementRequest, SigningUrlsResponse};
use crate::esign::error::EsignError;

// ============================================================================
// RESPONSE VALIDATION
// ============================================================================

/// Validates a response against the expected status code.
///
/// On a match the response is passed through untouched for the caller to
/// consume. On a mismatch the body is drained and an error carrying the
/// actual status and body text is returned. This is the sole error-detection
/// mechanism for every outbound call; callers treat any failure as fatal to
/// the current request flow.
pub async fn validate_response(
    response: Response,
    expected: StatusCode,
) -> Result<Response, EsignError> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(EsignError::from_status(status, body))
}

// ============================================================================
// DISCOVERY RESPONSE
// ============================================================================

/// Body of the discovery endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BaseUris {
    api_access_point: String,
}

// ============================================================================
// CLIENT
// ============================================================================

/// HTTP client for the remote e-sign API.
///
/// Cheap to share behind an `Arc`; the resolved base URL is written at most
/// once per process lifetime and all other state is immutable after
/// construction.
pub struct SignClient {
    client: Client,
    discovery_url: String,
    auth_headers: HeaderMap,
    base: OnceCell<String>,
}

impl SignClient {
    /// Creates a new client from the e-sign configuration.
    ///
    /// The `Authorization: Bearer <token>` header is built once here and
    /// reused for every call. An empty or placeholder token is not an error
    /// locally: the remote API reports it as an authorization failure.
    pub fn new(config: &EsignConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let mut auth_headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.integration_key))
            .context("Integration key contains characters not valid in a header")?;
        auth_headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            client,
            discovery_url: config.discovery_url.trim_end_matches('/').to_string(),
            auth_headers,
            base: OnceCell::new(),
        })
    }

    /// Returns the cached authorization headers sent with every call.
    pub fn auth_headers(&self) -> &HeaderMap {
        &self.auth_headers
    }

    /// Returns the account's API base URL, resolving it on first use.
    ///
    /// Resolution performs one authenticated GET against the discovery
    /// endpoint and caches the result for the process lifetime; later calls
    /// return the cached value without re-querying. A failed resolution
    /// caches nothing, so the next call retries. The returned URL always ends
    /// in `/` so callers can concatenate a relative path directly.
    pub async fn base(&self) -> Result<&str, EsignError> {
        self.base
            .get_or_try_init(|| self.resolve_base())
            .await
            .map(String::as_str)
    }

    async fn resolve_base(&self) -> Result<String, EsignError> {
        let url = format!("{}/api/rest/v6/baseUris", self.discovery_url);
        debug!("Resolving API access point via {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers.clone())
            .send()
            .await?;
        let response = validate_response(response, StatusCode::OK).await?;

        let body: BaseUris =
            response
                .json()
                .await
                .map_err(|e| EsignError::MalformedUpstreamResponse {
                    reason: format!("invalid discovery body: {}", e),
                })?;

        let mut base = body.api_access_point;
        if !base.ends_with('/') {
            base.push('/');
        }
        debug!("Resolved API access point: {}", base);
        Ok(base)
    }

    /// Creates an agreement and returns the raw created-agreement body.
    ///
    /// Expects HTTP 201 from the remote API; any other status aborts the
    /// current flow.
    pub async fn create_agreement(
        &self,
        request: &AgreementRequest,
    ) -> Result<serde_json::Value, EsignError> {
        let url = format!("{}api/rest/v6/agreements", self.base().await?);
        debug!("Creating agreement via {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers.clone())
            .json(request)
            .send()
            .await?;
        let response = validate_response(response, StatusCode::CREATED).await?;

        response
            .json()
            .await
            .map_err(|e| EsignError::MalformedUpstreamResponse {
                reason: format!("invalid created-agreement body: {}", e),
            })
    }

    /// Fetches the signing URLs of an agreement.
    ///
    /// Expects HTTP 200. The returned set may still be empty while the remote
    /// API is processing the freshly created agreement; readiness handling is
    /// the workflow's concern.
    pub async fn signing_urls(&self, agreement_id: &str) -> Result<SigningUrlsResponse, EsignError> {
        let url = format!(
            "{}api/rest/v6/agreements/{}/signingUrls",
            self.base().await?,
            agreement_id
        );
        debug!("Fetching signing URLs via {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers.clone())
            .send()
            .await?;
        let response = validate_response(response, StatusCode::OK).await?;

        response
            .json()
            .await
            .map_err(|e| EsignError::MalformedUpstreamResponse {
                reason: format!("invalid signing-URLs body: {}", e),
            })
    }
}
