//! Form and Query Adapter Module
//!
//! Maps inbound form/query parameters into the structures the e-sign flows
//! consume, and builds the pre-populated URL for the externally hosted
//! signing widget. The widget reads key/value pairs from the URL fragment on
//! the client side, so the pairs are serialized after a literal `#`.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

// ============================================================================
// SUBMISSION FORM
// ============================================================================

/// Fields submitted by the landing form.
///
/// All fields are optional: a missing field flows through to the agreement
/// request as `null` and the remote API performs the actual validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionForm {
    pub email: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

// ============================================================================
// WIDGET URL CONSTRUCTION
// ============================================================================

/// Parses a raw query string into ordered key/value pairs.
///
/// Order is preserved so the fragment built from the pairs matches the order
/// the caller supplied.
pub fn parse_query_pairs(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

/// Builds the widget URL with the given pairs serialized into the fragment.
///
/// Keys and values are percent-encoded so reserved characters (`&`, `#`, `=`)
/// in a value cannot corrupt the fragment. An empty pair set returns the base
/// URL unchanged.
pub fn build_widget_url(base: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return base.to_string();
    }

    let mut fragment = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        fragment.append_pair(key, value);
    }
    format!("{}#{}", base, fragment.finish())
}
