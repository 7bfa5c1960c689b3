//! E-Sign Gateway Library
//!
//! This crate provides a small gateway service that turns submitted web forms
//! into signature agreements against a remote e-sign REST API: it renders the
//! landing and confirmation pages, redirects into an externally hosted
//! signing widget, and drives the create-agreement / fetch-signing-URL
//! workflow.

pub mod api;
pub mod config;
pub mod esign;
pub mod webform;

// Re-export commonly used types
pub use api::{ApiResponse, ApiServer};
pub use config::{ApiConfig, Config, EsignConfig, WebformConfig};
pub use esign::{AgreementWorkflow, EsignError, SignClient};
pub use webform::{build_widget_url, parse_query_pairs, SubmissionForm};
