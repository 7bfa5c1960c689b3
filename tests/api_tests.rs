//! Unit tests for the HTTP surface
//!
//! Tests the page endpoints, the webform redirect and the e-sign flow
//! endpoints (with a mocked upstream), plus error handling.

use std::sync::Arc;

use esign_gateway::api::{ApiResponse, ApiServer};
use esign_gateway::esign::{AgreementWorkflow, SignClient};
use warp::http::StatusCode;
use warp::test::request;

#[path = "mod.rs"]
mod test_helpers;
use test_helpers::{
    build_test_config, build_test_config_with_discovery, mount_create_agreement, mount_discovery,
    mount_signing_urls, DUMMY_AGREEMENT_ID, DUMMY_SIGNER_EMAIL, DUMMY_SIGNING_URL,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Create a test API server whose upstream client points at the given
/// discovery host (unreachable host for tests that never call upstream)
fn create_api_server(discovery_url: &str) -> ApiServer {
    let config = build_test_config_with_discovery(discovery_url);
    let client = Arc::new(SignClient::new(&config.esign).unwrap());
    let workflow = AgreementWorkflow::new(client, &config.esign);
    ApiServer::new(config, workflow)
}

fn create_offline_api_server() -> ApiServer {
    let config = build_test_config();
    let client = Arc::new(SignClient::new(&config.esign).unwrap());
    let workflow = AgreementWorkflow::new(client, &config.esign);
    ApiServer::new(config, workflow)
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const FORM_BODY: &str = "email=a%40b.com&firstName=A&lastName=B";

// ============================================================================
// HEALTH ENDPOINT TESTS
// ============================================================================

/// Test that health endpoint returns success
/// What is tested: Basic health check endpoint
/// Why: Ensures service is running and responsive
#[tokio::test]
async fn test_health_endpoint() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request().method("GET").path("/health").reply(&routes).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ApiResponse<String> = serde_json::from_slice(response.body()).unwrap();
    assert!(body.success);
    assert!(body.data.is_some());
}

// ============================================================================
// PAGE ENDPOINT TESTS
// ============================================================================

/// Test that the landing form posts to the confirmation flow
/// What is tested: GET / renders the form with email field
/// Why: The plain flow collects email plus names
#[tokio::test]
async fn test_index_renders_form() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request().method("GET").path("/").reply(&routes).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains("action=\"/submitted\""));
    assert!(html.contains("method=\"POST\""));
    assert!(html.contains("name=\"email\""));
}

/// Test that the webform landing page submits via GET without email
/// What is tested: GET /webform form variant
/// Why: The widget collects the email itself; only names pre-populate
#[tokio::test]
async fn test_webform_index_has_no_email_field() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request().method("GET").path("/webform").reply(&routes).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains("action=\"/webform/sign\""));
    assert!(html.contains("method=\"GET\""));
    assert!(!html.contains("name=\"email\""));
}

/// Test that the confirmation page echoes the submitted fields
/// What is tested: POST /submitted
/// Why: The plain flow renders what the user entered
#[tokio::test]
async fn test_submitted_echoes_fields() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request()
        .method("POST")
        .path("/submitted")
        .header("content-type", FORM_CONTENT_TYPE)
        .body(FORM_BODY)
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains(DUMMY_SIGNER_EMAIL));
    assert!(html.contains("<dd>A</dd>"));
    assert!(html.contains("<dd>B</dd>"));
}

/// Test the post-sign landing page
/// What is tested: GET /embed/submitted
/// Why: The widget redirects here after the participant signs
#[tokio::test]
async fn test_post_sign_landing_page() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request()
        .method("GET")
        .path("/embed/submitted")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains("Successfully submitted"));
}

// ============================================================================
// WEBFORM REDIRECT TESTS
// ============================================================================

/// Test that query parameters end up in the widget URL fragment
/// What is tested: GET /webform/sign?a=1&b=2
/// Why: The externally hosted form pre-populates from the fragment
#[tokio::test]
async fn test_webform_sign_builds_fragment() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request()
        .method("GET")
        .path("/webform/sign?a=1&b=2")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    // '&' is escaped in the rendered HTML attribute
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains("https://w#a=1&amp;b=2"));
}

/// Test that a bare request frames the widget base URL unchanged
/// What is tested: GET /webform/sign without a query string
/// Why: No pre-population pairs means no fragment
#[tokio::test]
async fn test_webform_sign_without_query() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request()
        .method("GET")
        .path("/webform/sign")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains("src=\"https://w\""));
}

// ============================================================================
// E-SIGN FLOW TESTS
// ============================================================================

/// Test the direct-send flow through the HTTP surface
/// What is tested: POST /send/submitted with a mocked upstream
/// Why: End-to-end path from form body to rendered created-agreement page
#[tokio::test]
async fn test_send_flow_through_api() {
    let server = wiremock::MockServer::start().await;
    mount_discovery(&server).await;
    mount_create_agreement(&server, DUMMY_AGREEMENT_ID).await;

    let api_server = create_api_server(&server.uri());
    let routes = api_server.test_routes();

    let response = request()
        .method("POST")
        .path("/send/submitted")
        .header("content-type", FORM_CONTENT_TYPE)
        .body(FORM_BODY)
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains(DUMMY_AGREEMENT_ID));
}

/// Test the embedded flow through the HTTP surface
/// What is tested: POST /embed/sign with a mocked upstream
/// Why: End-to-end path from form body to framed signing URL
#[tokio::test]
async fn test_embed_flow_through_api() {
    let server = wiremock::MockServer::start().await;
    mount_discovery(&server).await;
    mount_create_agreement(&server, DUMMY_AGREEMENT_ID).await;
    mount_signing_urls(&server, DUMMY_AGREEMENT_ID, DUMMY_SIGNING_URL).await;

    let api_server = create_api_server(&server.uri());
    let routes = api_server.test_routes();

    let response = request()
        .method("POST")
        .path("/embed/sign")
        .header("content-type", FORM_CONTENT_TYPE)
        .body(FORM_BODY)
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8_lossy(response.body()).to_string();
    assert!(html.contains(DUMMY_SIGNING_URL));
}

/// Test that an upstream rejection surfaces as a gateway error
/// What is tested: create endpoint returns 500, client sees 502 JSON error
/// Why: Upstream failures are the gateway's fault surface, not the client's
#[tokio::test]
async fn test_upstream_failure_surfaces_as_gateway_error() {
    let server = wiremock::MockServer::start().await;
    mount_discovery(&server).await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/api/rest/v6/agreements"))
        .respond_with(wiremock::ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api_server = create_api_server(&server.uri());
    let routes = api_server.test_routes();

    let response = request()
        .method("POST")
        .path("/send/submitted")
        .header("content-type", FORM_CONTENT_TYPE)
        .body(FORM_BODY)
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: ApiResponse<()> = serde_json::from_slice(response.body()).unwrap();
    assert!(!body.success);
    assert!(body.error.unwrap().contains("500"));
}

// ============================================================================
// ERROR HANDLING TESTS
// ============================================================================

/// Test that unknown endpoints return a JSON 404
#[tokio::test]
async fn test_unknown_endpoint_returns_not_found() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request()
        .method("GET")
        .path("/nonexistent")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ApiResponse<()> = serde_json::from_slice(response.body()).unwrap();
    assert!(!body.success);
}

/// Test that a wrong method on a form endpoint returns 405
#[tokio::test]
async fn test_wrong_method_returns_method_not_allowed() {
    let api_server = create_offline_api_server();
    let routes = api_server.test_routes();

    let response = request()
        .method("GET")
        .path("/submitted")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: ApiResponse<()> = serde_json::from_slice(response.body()).unwrap();
    assert!(!body.success);
}
