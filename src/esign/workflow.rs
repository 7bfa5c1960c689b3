//! Agreement Workflow Module
//!
//! This module sequences the calls that turn a submitted form into a remote
//! agreement: resolve the API base, create the agreement, and (for the
//! embedded flow) fetch the participant's signing URL once the remote API has
//! finished its asynchronous post-processing.
//!
//! Steps run strictly sequentially within one request; any failure aborts the
//! flow immediately and no later call is attempted.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::EsignConfig;
use crate::esign::agreement::{build_agreement_request, AgreementOptions, PostSignRedirect};
use crate::esign::client::SignClient;
use crate::esign::error::EsignError;
use crate::webform::SubmissionForm;

// ============================================================================
// WORKFLOW ORCHESTRATOR
// ============================================================================

/// Orchestrates the create-agreement and fetch-signing-URL sequence.
///
/// Constructed with its collaborator injected so tests can point the client
/// at a mock upstream.
pub struct AgreementWorkflow {
    client: Arc<SignClient>,
    template_id: String,
    admin_email: String,
    agreement_name: String,
    signing_url_attempts: u32,
    signing_url_retry: Duration,
}

impl AgreementWorkflow {
    /// Creates a new workflow around the given client and e-sign settings.
    pub fn new(client: Arc<SignClient>, config: &EsignConfig) -> Self {
        Self {
            client,
            template_id: config.template_id.clone(),
            admin_email: config.admin_email.clone(),
            agreement_name: config.agreement_name.clone(),
            signing_url_attempts: config.signing_url_attempts,
            signing_url_retry: Duration::from_millis(config.signing_url_retry_ms),
        }
    }

    /// Direct-send flow: create the agreement and surface the raw
    /// created-agreement body.
    ///
    /// The remote API notifies the participants by email; no signing URL is
    /// fetched.
    pub async fn send(&self, form: &SubmissionForm) -> Result<serde_json::Value, EsignError> {
        let request = build_agreement_request(
            form,
            &self.template_id,
            &self.admin_email,
            &self.agreement_name,
            &AgreementOptions::default(),
        );

        let created = self.client.create_agreement(&request).await?;
        info!(
            "Agreement created: {}",
            created.get("id").and_then(|id| id.as_str()).unwrap_or("?")
        );
        Ok(created)
    }

    /// Embedded flow: create the agreement with notification emails
    /// suppressed and a post-sign redirect, then fetch the participant's
    /// signing URL.
    ///
    /// # Arguments
    ///
    /// * `form` - Submitted form fields
    /// * `redirect_url` - Where the widget sends the participant after signing
    ///
    /// # Returns
    ///
    /// The first participant's embedded-signing URL.
    pub async fn embed(
        &self,
        form: &SubmissionForm,
        redirect_url: &str,
    ) -> Result<String, EsignError> {
        let options = AgreementOptions {
            suppress_init_emails: true,
            post_sign_redirect: Some(PostSignRedirect {
                url: redirect_url.to_string(),
                delay_secs: 0,
            }),
        };
        let request = build_agreement_request(
            form,
            &self.template_id,
            &self.admin_email,
            &self.agreement_name,
            &options,
        );

        let created = self.client.create_agreement(&request).await?;
        let agreement_id = created
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| EsignError::MalformedUpstreamResponse {
                reason: "created-agreement body missing id".to_string(),
            })?;
        info!("Agreement created: {}", agreement_id);

        self.wait_for_signing_url(agreement_id).await
    }

    /// Polls the signing-URLs endpoint until the remote API has finished
    /// processing the agreement.
    ///
    /// Agreement creation is asynchronous on the remote side: a fetch
    /// immediately after creation can return 200 with empty URL sets. An
    /// empty set is treated as "not yet ready" and retried after a fixed
    /// delay, up to the configured number of attempts.
    async fn wait_for_signing_url(&self, agreement_id: &str) -> Result<String, EsignError> {
        for attempt in 1..=self.signing_url_attempts {
            let urls = self.client.signing_urls(agreement_id).await?;
            if let Some(url) = urls.first_esign_url() {
                return Ok(url.to_string());
            }

            debug!(
                "Signing URLs for {} not ready (attempt {}/{})",
                agreement_id, attempt, self.signing_url_attempts
            );
            if attempt < self.signing_url_attempts {
                tokio::time::sleep(self.signing_url_retry).await;
            }
        }

        Err(EsignError::SigningUrlNotReady {
            attempts: self.signing_url_attempts,
        })
    }
}
