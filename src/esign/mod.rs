//! E-Sign Integration Module
//!
//! Everything that talks to the remote e-signature REST API: credential and
//! base-URL handling, the agreement request builder, and the workflow that
//! sequences agreement creation and signing-URL retrieval.

pub mod agreement;
mod client;
mod error;
mod workflow;

pub use client::{validate_response, SignClient};
pub use error::EsignError;
pub use workflow::AgreementWorkflow;
