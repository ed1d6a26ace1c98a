//! Helpers for using an issued token against protected resources.
//!
//! [`RequestSignerExt`] attaches a token to an outbound request without tying callers to
//! one HTTP client, and [`BearerChallenge`] reads the RFC 6750 `WWW-Authenticate`
//! challenge a resource server sends back when it rejects that token.

pub mod challenge;
pub mod request_signer;

pub use challenge::*;
pub use request_signer::*;
