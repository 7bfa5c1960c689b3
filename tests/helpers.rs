//! Shared test helpers for unit tests
//!
//! This module provides configuration builders, workflow builders and the
//! dummy constants used across test files.

use std::sync::Arc;

use esign_gateway::config::{ApiConfig, Config, EsignConfig, WebformConfig};
use esign_gateway::esign::{AgreementWorkflow, SignClient};
use esign_gateway::webform::SubmissionForm;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Dummy signer email submitted through the landing form
pub const DUMMY_SIGNER_EMAIL: &str = "a@b.com";

/// Dummy countersigner email (configured administrator)
pub const DUMMY_ADMIN_EMAIL: &str = "admin@x.com";

/// Dummy library document template id
pub const DUMMY_TEMPLATE_ID: &str = "T1";

/// Dummy signer first name
pub const DUMMY_FIRST_NAME: &str = "A";

/// Dummy signer last name
pub const DUMMY_LAST_NAME: &str = "B";

/// Dummy agreement id assigned by the mocked upstream
pub const DUMMY_AGREEMENT_ID: &str = "AG1";

/// Dummy embedded signing URL returned by the mocked upstream
pub const DUMMY_SIGNING_URL: &str = "https://sign/1";

/// Dummy integration key (bearer token)
pub const DUMMY_INTEGRATION_KEY: &str = "TESTKEY";

/// Dummy widget base URL for webform redirect tests
pub const DUMMY_WIDGET_BASE: &str = "https://w";

// ============================================================================
// CONFIGURATION BUILDERS
// ============================================================================

/// Creates a test configuration pointing at the given discovery host.
///
/// Retry timing is tightened so readiness-polling tests finish quickly.
pub fn build_test_config_with_discovery(discovery_url: &str) -> Config {
    Config {
        esign: EsignConfig {
            discovery_url: discovery_url.to_string(),
            integration_key: DUMMY_INTEGRATION_KEY.to_string(),
            admin_email: DUMMY_ADMIN_EMAIL.to_string(),
            template_id: DUMMY_TEMPLATE_ID.to_string(),
            agreement_name: "Waiver".to_string(),
            signing_url_attempts: 3,
            signing_url_retry_ms: 10,
        },
        webform: WebformConfig {
            base_url: DUMMY_WIDGET_BASE.to_string(),
        },
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_url: "http://127.0.0.1:3000".to_string(),
            cors_origins: vec!["*".to_string()],
        },
    }
}

/// Creates a test configuration with an unreachable discovery host.
///
/// Suitable for tests that never hit the upstream API.
pub fn build_test_config() -> Config {
    build_test_config_with_discovery("http://127.0.0.1:9")
}

// ============================================================================
// WORKFLOW BUILDERS
// ============================================================================

/// Creates a workflow whose client points at the given discovery host.
pub fn build_test_workflow(discovery_url: &str) -> AgreementWorkflow {
    let config = build_test_config_with_discovery(discovery_url);
    let client = Arc::new(SignClient::new(&config.esign).unwrap());
    AgreementWorkflow::new(client, &config.esign)
}

// ============================================================================
// FORM BUILDERS
// ============================================================================

/// Creates the standard submitted form used across tests.
pub fn submission_form() -> SubmissionForm {
    SubmissionForm {
        email: Some(DUMMY_SIGNER_EMAIL.to_string()),
        first_name: Some(DUMMY_FIRST_NAME.to_string()),
        last_name: Some(DUMMY_LAST_NAME.to_string()),
    }
}
