// std
use std::iter::IntoIterator;
// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, ProviderId},
	provider::{GrantType, ProviderDescriptor, ProviderEndpoints, SupportedGrants},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// Token endpoint is mandatory for all flows.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// At least one grant must be supported.
	#[error("Descriptor must enable at least one grant type.")]
	NoSupportedGrants,
	/// Endpoints must use HTTPS unless they target a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// An endpoint could not be derived from a base URL.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Descriptor identifier failed validation.
	#[error(transparent)]
	InvalidId(#[from] IdentifierError),
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Token endpoint used by every grant.
	pub token_endpoint: Option<Url>,
	/// Optional liveness endpoint.
	pub health_endpoint: Option<Url>,
	/// Grants enabled for the provider.
	#[serde(default)]
	pub supported_grants: SupportedGrants,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			token_endpoint: None,
			health_endpoint: None,
			supported_grants: SupportedGrants::default(),
		}
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the optional health endpoint.
	pub fn health_endpoint(mut self, url: Url) -> Self {
		self.health_endpoint = Some(url);

		self
	}

	/// Marks a single grant type as supported.
	pub fn support_grant(mut self, grant: GrantType) -> Self {
		self.supported_grants = self.supported_grants.enable(grant);

		self
	}

	/// Marks multiple grants as supported.
	pub fn support_grants<I>(mut self, grants: I) -> Self
	where
		I: IntoIterator<Item = GrantType>,
	{
		for grant in grants.into_iter() {
			self.supported_grants = self.supported_grants.enable(grant);
		}

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let endpoints = ProviderEndpoints { token, health: self.health_endpoint };
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints,
			supported_grants: self.supported_grants,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl TryFrom<ProviderDescriptorBuilder> for ProviderDescriptor {
	type Error = ProviderDescriptorError;

	fn try_from(builder: ProviderDescriptorBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}
impl From<ProviderDescriptor> for ProviderDescriptorBuilder {
	fn from(descriptor: ProviderDescriptor) -> Self {
		Self {
			id: descriptor.id,
			token_endpoint: Some(descriptor.endpoints.token),
			health_endpoint: descriptor.endpoints.health,
			supported_grants: descriptor.supported_grants,
		}
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		if self.supported_grants.is_empty() {
			return Err(ProviderDescriptorError::NoSupportedGrants);
		}

		validate_endpoint("token", &self.endpoints.token)?;

		if let Some(health) = self.endpoints.health.as_ref() {
			validate_endpoint("health", health)?;
		}

		Ok(())
	}
}

/// Enforces the TLS rule: `https` everywhere, plain `http` only for loopback hosts.
pub(crate) fn validate_endpoint(
	name: &'static str,
	url: &Url,
) -> Result<(), ProviderDescriptorError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
