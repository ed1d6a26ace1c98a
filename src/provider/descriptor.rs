//! Provider descriptor data structures shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Grant helpers wired into provider descriptors.
pub mod grant;

pub use builder::*;
pub use grant::*;

// self
use crate::{_prelude::*, auth::ProviderId};

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Token endpoint shared by every grant.
	pub token: Url,
	/// Optional liveness endpoint answering `200` when the server is healthy.
	pub health: Option<Url>,
}

/// Immutable provider descriptor consumed by flows.
///
/// Deserialization goes through [`ProviderDescriptorBuilder`], so loaded configuration is
/// validated exactly like a built descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProviderDescriptorBuilder", into = "ProviderDescriptorBuilder")]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Supported grant flags.
	pub supported_grants: SupportedGrants,
}
impl ProviderDescriptor {
	/// Route serving every grant on `oauthsrv`; the grant is selected by the query string.
	pub const OAUTHSRV_TOKEN_PATH: &'static str = "/oauth/v2/auth";
	/// Liveness route on `oauthsrv`.
	pub const OAUTHSRV_HEALTH_PATH: &'static str = "/healthcheck";

	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Describes an unmodified `oauthsrv` deployment rooted at `base`.
	///
	/// Only the `password` grant is enabled: the reference server routes
	/// `client_credentials` but does not implement it. Enable it explicitly through
	/// [`ProviderDescriptor::builder`] once the deployment supports it.
	pub fn oauthsrv(base: Url) -> Result<Self, ProviderDescriptorError> {
		let join = |endpoint: &'static str, path: &str| {
			base.join(path)
				.map_err(|source| ProviderDescriptorError::InvalidEndpoint { endpoint, source })
		};
		let id = ProviderId::new("oauthsrv").map_err(ProviderDescriptorError::from)?;

		Self::builder(id)
			.token_endpoint(join("token", Self::OAUTHSRV_TOKEN_PATH)?)
			.health_endpoint(join("health", Self::OAUTHSRV_HEALTH_PATH)?)
			.support_grant(GrantType::Password)
			.build()
	}

	/// Checks whether the descriptor supports a given grant.
	pub fn supports(&self, grant: GrantType) -> bool {
		self.supported_grants.supports(grant)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn oauthsrv_preset_matches_reference_routes() {
		let descriptor = ProviderDescriptor::oauthsrv(
			Url::parse("http://localhost:8080").expect("Base URL fixture should parse."),
		)
		.expect("Reference descriptor should build.");

		assert_eq!(descriptor.endpoints.token.as_str(), "http://localhost:8080/oauth/v2/auth");
		assert_eq!(
			descriptor.endpoints.health.as_ref().map(Url::as_str),
			Some("http://localhost:8080/healthcheck")
		);
		assert!(descriptor.supports(GrantType::Password));
		assert!(!descriptor.supports(GrantType::ClientCredentials));
	}

	#[test]
	fn oauthsrv_preset_rejects_remote_plain_http() {
		let err = ProviderDescriptor::oauthsrv(
			Url::parse("http://auth.example.com").expect("Base URL fixture should parse."),
		)
		.expect_err("Plain HTTP to a remote host must be rejected.");

		assert!(matches!(err, ProviderDescriptorError::InsecureEndpoint { endpoint: "token", .. }));
	}
}
