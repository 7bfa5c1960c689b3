//! HTTP Server Module
//!
//! This module provides the HTTP surface of the e-sign gateway: the landing
//! forms, the confirmation pages, the webform redirect, and the endpoints
//! driving the direct-send and embedded-signing flows.

// Generic shared code (health, server, CORS, rejection handling)
mod generic;

// Page rendering and form-flow handlers
mod pages;

// Re-export ApiServer for convenience
pub use generic::ApiServer;
// Re-export ApiResponse for testing
#[allow(unused_imports)]
pub use generic::ApiResponse;
