//! Page rendering and form-flow handlers
//!
//! This module renders the small set of server-side HTML pages (landing
//! forms, confirmation, embedded sign page) and implements the handlers that
//! drive the e-sign flows from submitted forms.

use std::sync::Arc;
use tracing::debug;
use warp::{Rejection, Reply};

use crate::config::Config;
use crate::esign::AgreementWorkflow;
use crate::webform::{build_widget_url, parse_query_pairs, SubmissionForm};

use super::generic::EsignRejection;

// ============================================================================
// HTML RENDERING
// ============================================================================

/// Escapes a value for interpolation into HTML text or attributes.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the landing form page.
///
/// The same form serves all flows; only the submit target, the HTTP method
/// and the presence of the email field differ.
pub fn render_form_page(action: &str, method: &str, include_email: bool) -> String {
    let email_field = if include_email {
        "    <label>Email <input type=\"email\" name=\"email\"></label><br>\n"
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Sign Waiver</title></head>\n\
         <body>\n\
         <h2>Sign Waiver</h2>\n\
         <form action=\"{}\" method=\"{}\">\n\
         {}\
         \x20   <label>First name <input type=\"text\" name=\"firstName\"></label><br>\n\
         \x20   <label>Last name <input type=\"text\" name=\"lastName\"></label><br>\n\
         \x20   <button type=\"submit\">Submit</button>\n\
         </form>\n\
         </body>\n\
         </html>\n",
        escape_html(action),
        escape_html(method),
        email_field
    )
}

/// Renders the confirmation page echoing the submitted fields.
pub fn render_submitted_page(form: &SubmissionForm) -> String {
    let row = |label: &str, value: &Option<String>| {
        format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            label,
            escape_html(value.as_deref().unwrap_or(""))
        )
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Submitted</title></head>\n\
         <body>\n\
         <h2>Submitted</h2>\n\
         <dl>\n{}{}{}</dl>\n\
         </body>\n\
         </html>\n",
        row("Email", &form.email),
        row("First name", &form.first_name),
        row("Last name", &form.last_name)
    )
}

/// Renders the confirmation page for a created agreement, showing the raw
/// created-agreement body returned by the remote API.
pub fn render_agreement_page(agreement: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(agreement).unwrap_or_else(|_| agreement.to_string());

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Agreement Created</title></head>\n\
         <body>\n\
         <h2>Agreement created</h2>\n\
         <pre>{}</pre>\n\
         </body>\n\
         </html>\n",
        escape_html(&pretty)
    )
}

/// Renders the page framing an external signing URL (embedded widget or
/// pre-populated webform).
pub fn render_sign_page(url: &str) -> String {
    let escaped = escape_html(url);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Sign</title></head>\n\
         <body>\n\
         <iframe src=\"{}\" width=\"100%\" height=\"800\" frameborder=\"0\"></iframe>\n\
         </body>\n\
         </html>\n",
        escaped
    )
}

/// Renders the post-sign landing page.
pub fn render_post_sign_page() -> String {
    "<h2>Successfully submitted</h2>".to_string()
}

// ============================================================================
// FORM-FLOW HANDLERS
// ============================================================================

/// Handler for the plain confirmation flow: echoes the submitted fields.
pub async fn submitted_handler(form: SubmissionForm) -> Result<impl Reply, Rejection> {
    debug!("POST /submitted - form: {:?}", form);
    Ok(warp::reply::html(render_submitted_page(&form)))
}

/// Handler for the webform redirect flow.
///
/// Serializes the incoming query pairs into the widget URL's fragment so the
/// externally hosted form can pre-populate itself client-side.
pub async fn webform_sign_handler(
    raw_query: String,
    config: Arc<Config>,
) -> Result<impl Reply, Rejection> {
    let pairs = parse_query_pairs(&raw_query);
    let url = build_widget_url(&config.webform.base_url, &pairs);
    debug!("GET /webform/sign - widget URL: {}", url);
    Ok(warp::reply::html(render_sign_page(&url)))
}

/// Handler for the direct-send flow.
///
/// Creates the agreement and shows the raw created-agreement body; the remote
/// API emails the participants their signing links.
pub async fn send_submitted_handler(
    form: SubmissionForm,
    workflow: Arc<AgreementWorkflow>,
) -> Result<impl Reply, Rejection> {
    debug!("POST /send/submitted - form: {:?}", form);

    let created = workflow
        .send(&form)
        .await
        .map_err(|e| warp::reject::custom(EsignRejection(e)))?;

    Ok(warp::reply::html(render_agreement_page(&created)))
}

/// Handler for the embedded-signing flow.
///
/// Creates the agreement with notification emails suppressed, fetches the
/// participant's signing URL and frames it in the sign page. After signing,
/// the widget redirects back to this service's post-sign landing page.
pub async fn embed_sign_handler(
    form: SubmissionForm,
    workflow: Arc<AgreementWorkflow>,
    config: Arc<Config>,
) -> Result<impl Reply, Rejection> {
    debug!("POST /embed/sign - form: {:?}", form);

    let redirect_url = format!(
        "{}/embed/submitted",
        config.api.public_url.trim_end_matches('/')
    );
    let signing_url = workflow
        .embed(&form, &redirect_url)
        .await
        .map_err(|e| warp::reject::custom(EsignRejection(e)))?;

    Ok(warp::reply::html(render_sign_page(&signing_url)))
}
