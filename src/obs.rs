//! Optional observability helpers for token flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauthsrv_client.flow` with the `flow` (grant)
//!   and `stage` (call site) fields, plus one event per finished flow.
//! - Enable `metrics` to increment the `oauthsrv_client_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, provider::GrantType};

/// Flow kinds observed by the requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Password grant.
	Password,
	/// Client Credentials grant.
	ClientCredentials,
	/// Liveness probe.
	HealthCheck,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Password => "password",
			FlowKind::ClientCredentials => "client_credentials",
			FlowKind::HealthCheck => "health_check",
		}
	}
}
impl From<GrantType> for FlowKind {
	fn from(grant: GrantType) -> Self {
		match grant {
			GrantType::Password => FlowKind::Password,
			GrantType::ClientCredentials => FlowKind::ClientCredentials,
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
