//! Generic API structures and server implementation
//!
//! This module contains the shared response structure, rejection handling,
//! CORS configuration and the API server wiring the page and e-sign flow
//! routes together.

use anyhow::{Context, Result};
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use warp::{
    http::{Method, StatusCode},
    Filter, Rejection, Reply,
};

use crate::config::Config;
use crate::esign::{AgreementWorkflow, EsignError};

use super::pages;

// ============================================================================
// SHARED REQUEST/RESPONSE STRUCTURES
// ============================================================================

/// Standardized response structure for JSON API endpoints and errors.
///
/// HTML pages are returned directly; everything else (health, error replies
/// from the rejection handler) uses this envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    pub data: Option<T>,
    /// Error message (if failed)
    pub error: Option<String>,
}

// ============================================================================
// WARP FILTER HELPERS
// ============================================================================

/// Creates a warp filter that provides access to the service configuration.
pub fn with_config(
    config: Arc<Config>,
) -> impl Filter<Extract = (Arc<Config>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || config.clone())
}

/// Creates a warp filter that provides access to the agreement workflow.
pub fn with_workflow(
    workflow: Arc<AgreementWorkflow>,
) -> impl Filter<Extract = (Arc<AgreementWorkflow>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || workflow.clone())
}

/// Extracts the raw query string, or an empty string when the request has
/// no query at all (warp's raw query filter rejects in that case).
fn raw_query_or_empty() -> impl Filter<Extract = (String,), Error = Rejection> + Clone {
    warp::query::raw().or_else(|_| async { Ok::<(String,), Rejection>((String::new(),)) })
}

// ============================================================================
// CUSTOM REJECTION TYPES
// ============================================================================

/// Custom rejection carrying an e-sign integration failure.
#[derive(Debug)]
pub struct EsignRejection(pub EsignError);

impl warp::reject::Reject for EsignRejection {}

// ============================================================================
// CORS CONFIGURATION
// ============================================================================

/// Creates a CORS filter based on the configured allowed origins.
fn create_cors_filter(allowed_origins: &[String]) -> warp::cors::Builder {
    let methods = vec![Method::GET, Method::POST, Method::OPTIONS];

    if allowed_origins.contains(&"*".to_string()) {
        warp::cors()
            .allow_any_origin()
            .allow_methods(methods.clone())
            .allow_headers(vec!["content-type"])
    } else {
        let origins: Vec<&str> = allowed_origins.iter().map(|s| s.as_str()).collect();
        warp::cors()
            .allow_origins(origins)
            .allow_methods(methods)
            .allow_headers(vec!["content-type"])
    }
}

// ============================================================================
// REJECTION HANDLER
// ============================================================================

/// Global rejection handler for all API routes.
///
/// Converts rejections into standardized JSON error responses. E-sign
/// integration failures surface as gateway errors: the upstream API failed,
/// not the client's request.
///
/// # Arguments
///
/// * `rej` - The warp rejection to handle
///
/// # Returns
///
/// A warp reply with an error response
pub async fn handle_rejection(rej: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let (status, message) = if let Some(EsignRejection(err)) = rej.find::<EsignRejection>() {
        error!("E-sign flow failed: {}", err);
        let status = match err {
            EsignError::SigningUrlNotReady { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, err.to_string())
    } else if let Some(err) = rej.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid form body: {}", err))
    } else if rej.is_not_found() {
        (StatusCode::NOT_FOUND, "Endpoint not found".to_string())
    } else if rej.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed".to_string(),
        )
    } else {
        error!("Unhandled rejection: {:?}", rej);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        }),
        status,
    ))
}

// ============================================================================
// API SERVER IMPLEMENTATION
// ============================================================================

/// HTTP server for the e-sign gateway.
///
/// Serves the landing forms and confirmation pages, the webform redirect,
/// and the two e-sign flows (direct send and embedded signing).
pub struct ApiServer {
    /// Service configuration
    config: Arc<Config>,
    /// Agreement workflow driving the e-sign flows
    workflow: Arc<AgreementWorkflow>,
}

impl ApiServer {
    /// Creates a new API server with the given components.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    /// * `workflow` - Agreement workflow instance
    pub fn new(config: Config, workflow: AgreementWorkflow) -> Self {
        Self {
            config: Arc::new(config),
            workflow: Arc::new(workflow),
        }
    }

    /// Starts the API server and begins handling HTTP requests.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Server ran to completion
    /// * `Err(anyhow::Error)` - Failed to start server
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting API server on {}:{}",
            self.config.api.host, self.config.api.port
        );

        let routes = self.create_routes();

        let addr: std::net::SocketAddr =
            format!("{}:{}", self.config.api.host, self.config.api.port)
                .parse()
                .context("Failed to parse API server address")?;

        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Creates all API routes for the server.
    ///
    /// # Returns
    ///
    /// A warp filter containing all routes, CORS and rejection handling
    pub(crate) fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        let config = self.config.clone();
        let workflow = self.workflow.clone();

        // Health check endpoint - returns service status
        let health = warp::path("health").and(warp::get()).map(|| {
            warp::reply::json(&ApiResponse::<String> {
                success: true,
                data: Some("E-Sign Gateway is running".to_string()),
                error: None,
            })
        });

        // GET / - landing form posting to the plain confirmation flow
        let index = warp::path::end()
            .and(warp::get())
            .map(|| warp::reply::html(pages::render_form_page("/submitted", "POST", true)));

        // POST /submitted - echo the submitted fields
        let submitted = warp::path("submitted")
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::form())
            .and_then(pages::submitted_handler);

        // GET /webform - landing form variant submitting via query string
        let webform_index = warp::path("webform")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::html(pages::render_form_page("/webform/sign", "GET", false)));

        // GET /webform/sign - build the pre-populated widget URL
        let webform_sign = warp::path("webform")
            .and(warp::path("sign"))
            .and(warp::path::end())
            .and(warp::get())
            .and(raw_query_or_empty())
            .and(with_config(config.clone()))
            .and_then(pages::webform_sign_handler);

        // GET /send - landing form for the direct-send flow
        let send_index = warp::path("send")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::html(pages::render_form_page("/send/submitted", "POST", true)));

        // POST /send/submitted - create the agreement, show the raw body
        let send_submitted = warp::path("send")
            .and(warp::path("submitted"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::form())
            .and(with_workflow(workflow.clone()))
            .and_then(pages::send_submitted_handler);

        // GET /embed - landing form for the embedded-signing flow
        let embed_index = warp::path("embed")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::html(pages::render_form_page("/embed/sign", "POST", true)));

        // POST /embed/sign - create the agreement, frame the signing URL
        let embed_sign = warp::path("embed")
            .and(warp::path("sign"))
            .and(warp::path::end())
            .and(warp::post())
            .and(warp::body::form())
            .and(with_workflow(workflow))
            .and(with_config(config))
            .and_then(pages::embed_sign_handler);

        // GET /embed/submitted - post-sign landing page
        let embed_submitted = warp::path("embed")
            .and(warp::path("submitted"))
            .and(warp::path::end())
            .and(warp::get())
            .map(|| warp::reply::html(pages::render_post_sign_page()));

        // Combine all routes and apply rejection handler
        health
            .or(index)
            .or(submitted)
            .or(webform_index)
            .or(webform_sign)
            .or(send_index)
            .or(send_submitted)
            .or(embed_index)
            .or(embed_sign)
            .or(embed_submitted)
            .with(create_cors_filter(&self.config.api.cors_origins))
            .recover(handle_rejection)
    }

    /// Public method for testing - exposes routes for integration tests
    #[allow(dead_code)] // Used by tests
    pub fn test_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        self.create_routes()
    }
}
