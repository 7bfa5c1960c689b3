//! Error types for the e-sign integration
//!
//! Every outbound call to the e-sign API is validated against an expected
//! status code. Failures are classified into a small closed set of error
//! kinds, each carrying the original status and body for diagnostics.

use reqwest::StatusCode;
use thiserror::Error;

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

/// Errors produced by the e-sign API integration.
#[derive(Debug, Error)]
pub enum EsignError {
    /// The upstream API rejected the credentials (HTTP 401/403)
    #[error("e-sign API rejected credentials (status {status}): {body}")]
    AuthenticationFailed { status: u16, body: String },

    /// The upstream API returned a status other than the expected one
    #[error("unexpected e-sign API response (status {status}): {body}")]
    UpstreamRejected { status: u16, body: String },

    /// The upstream API could not be reached (connect, timeout, transport)
    #[error("e-sign API unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// The upstream API returned a body that could not be interpreted
    #[error("malformed e-sign API response: {reason}")]
    MalformedUpstreamResponse { reason: String },

    /// The agreement's signing URLs were still empty after all retry attempts
    #[error("signing URLs not ready after {attempts} attempts")]
    SigningUrlNotReady { attempts: u32 },
}

impl EsignError {
    /// Classifies an unexpected upstream status into an error kind.
    ///
    /// 401/403 indicate a credential problem; everything else is a plain
    /// rejection. Both keep the actual status and response body.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AuthenticationFailed {
                status: status.as_u16(),
                body,
            },
            _ => Self::UpstreamRejected {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// Returns the upstream HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. } | Self::UpstreamRejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
