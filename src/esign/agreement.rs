//! Agreement request and response shapes
//!
//! This module defines the JSON structures exchanged with the e-sign API's
//! `agreements` endpoints and the builder that produces a create-agreement
//! request from submitted form fields. The builder is a pure function: no
//! validation of email syntax is performed locally, and missing form fields
//! pass through as JSON `null`, deferred to the remote API's own validation.

use serde::{Deserialize, Serialize};

use crate::webform::SubmissionForm;

// ============================================================================
// REQUEST STRUCTURES
// ============================================================================

/// Signature type requested for every agreement.
const SIGNATURE_TYPE: &str = "ESIGN";

/// Initial state for every agreement (starts the workflow immediately).
const INITIAL_STATE: &str = "IN_PROCESS";

/// Participant role for both the signer and the countersigner.
const ROLE_SIGNER: &str = "SIGNER";

/// Create-agreement request body.
///
/// Field names follow the remote API's camelCase convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementRequest {
    /// Referenced library document(s) to be signed
    pub file_infos: Vec<FileInfo>,
    /// Display name of the agreement
    pub name: String,
    /// Ordered participant sets (signer first, countersigner second)
    pub participant_sets_info: Vec<ParticipantSetInfo>,
    /// Signature type (always `ESIGN`)
    pub signature_type: String,
    /// Initial agreement state (always `IN_PROCESS`)
    pub state: String,
    /// Merge fields pre-filled into the signing document
    pub merge_field_info: Vec<MergeField>,
    /// Email notification options (embedded flow only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_option: Option<EmailOption>,
    /// Post-sign redirect options (embedded flow only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_sign_option: Option<PostSignOption>,
}

/// Reference to a library document template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub library_document_id: String,
}

/// One ordered group of signers in the agreement's workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSetInfo {
    pub member_infos: Vec<MemberInfo>,
    /// Processing rank: 1 for the signer, 2 for the countersigner
    pub order: u32,
    pub role: String,
}

/// A single participant, identified by email.
///
/// The email is `Option` so a missing form field serializes as `null` and the
/// remote API reports the problem instead of this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberInfo {
    pub email: Option<String>,
}

/// A named placeholder in the signing document with its pre-filled value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeField {
    pub field_name: String,
    pub default_value: Option<String>,
}

/// Email notification options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailOption {
    pub send_options: SendOptions,
}

/// Controls which workflow emails the remote API sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    pub init_emails: String,
}

/// Redirect applied after the participant completes signing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSignOption {
    pub redirect_delay: u32,
    pub redirect_url: String,
}

// ============================================================================
// BUILDER OPTIONS
// ============================================================================

/// Optional additions to the create-agreement request.
///
/// The direct-send flow uses the default (no options); the embedded flow
/// suppresses the initial notification emails and sets a post-sign redirect.
#[derive(Debug, Clone, Default)]
pub struct AgreementOptions {
    /// Suppress the remote API's initial workflow emails
    pub suppress_init_emails: bool,
    /// Redirect the participant here after signing
    pub post_sign_redirect: Option<PostSignRedirect>,
}

/// Post-sign redirect target.
#[derive(Debug, Clone)]
pub struct PostSignRedirect {
    pub url: String,
    pub delay_secs: u32,
}

// ============================================================================
// REQUEST BUILDER
// ============================================================================

/// Builds the fixed-shape create-agreement request from submitted form fields.
///
/// Participant set 1 is the submitting signer, participant set 2 the
/// configured administrator countersigning the document. The form's first and
/// last name are passed through as merge fields pre-filling the document.
///
/// # Arguments
///
/// * `form` - Submitted form fields (email, firstName, lastName)
/// * `template_id` - Configured library document id
/// * `admin_email` - Configured countersigner email
/// * `name` - Display name for the agreement
/// * `options` - Flow-specific additions (see [`AgreementOptions`])
pub fn build_agreement_request(
    form: &SubmissionForm,
    template_id: &str,
    admin_email: &str,
    name: &str,
    options: &AgreementOptions,
) -> AgreementRequest {
    let email_option = options.suppress_init_emails.then(|| EmailOption {
        send_options: SendOptions {
            init_emails: "NONE".to_string(),
        },
    });

    let post_sign_option = options
        .post_sign_redirect
        .as_ref()
        .map(|redirect| PostSignOption {
            redirect_delay: redirect.delay_secs,
            redirect_url: redirect.url.clone(),
        });

    AgreementRequest {
        file_infos: vec![FileInfo {
            library_document_id: template_id.to_string(),
        }],
        name: name.to_string(),
        participant_sets_info: vec![
            ParticipantSetInfo {
                member_infos: vec![MemberInfo {
                    email: form.email.clone(),
                }],
                order: 1,
                role: ROLE_SIGNER.to_string(),
            },
            ParticipantSetInfo {
                member_infos: vec![MemberInfo {
                    email: Some(admin_email.to_string()),
                }],
                order: 2,
                role: ROLE_SIGNER.to_string(),
            },
        ],
        signature_type: SIGNATURE_TYPE.to_string(),
        state: INITIAL_STATE.to_string(),
        merge_field_info: vec![
            MergeField {
                field_name: "firstName".to_string(),
                default_value: form.first_name.clone(),
            },
            MergeField {
                field_name: "lastName".to_string(),
                default_value: form.last_name.clone(),
            },
        ],
        email_option,
        post_sign_option,
    }
}

// ============================================================================
// RESPONSE STRUCTURES
// ============================================================================

/// Response body of the signing-URLs endpoint.
///
/// Both vectors default to empty: while the remote API is still processing a
/// freshly created agreement it may return a body without URL sets, which the
/// workflow treats as "not yet ready".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrlsResponse {
    #[serde(default)]
    pub signing_url_set_infos: Vec<SigningUrlSetInfo>,
}

/// Signing URLs for one participant set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrlSetInfo {
    #[serde(default)]
    pub signing_urls: Vec<SigningUrl>,
}

/// A single participant's embedded-signing URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningUrl {
    pub esign_url: String,
}

impl SigningUrlsResponse {
    /// Returns the first participant's signing URL, if the remote API has
    /// finished producing one.
    pub fn first_esign_url(&self) -> Option<&str> {
        self.signing_url_set_infos
            .first()
            .and_then(|set| set.signing_urls.first())
            .map(|url| url.esign_url.as_str())
    }
}
