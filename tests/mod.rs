//! Test module organization
//!
//! This module re-exports test helpers for use in test files.

mod helpers;

#[allow(unused_imports)]
pub use helpers::{
    build_test_config, build_test_config_with_discovery, build_test_workflow, submission_form,
    DUMMY_ADMIN_EMAIL, DUMMY_AGREEMENT_ID, DUMMY_FIRST_NAME, DUMMY_INTEGRATION_KEY,
    DUMMY_LAST_NAME, DUMMY_SIGNER_EMAIL, DUMMY_SIGNING_URL, DUMMY_TEMPLATE_ID, DUMMY_WIDGET_BASE,
};

#[allow(unused_imports)]
pub use helpers_mock_server::{
    mount_create_agreement, mount_discovery, mount_signing_urls, signing_urls_not_ready,
};
