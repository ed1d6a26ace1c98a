//! Grant credentials built on the `oauth2` crate's secret-redacting newtypes.

// crates.io
use oauth2::{ClientId, ClientSecret, ResourceOwnerPassword, ResourceOwnerUsername};
// self
use crate::{error::ConfigError, provider::GrantType};

/// Credentials presented to the token endpoint.
///
/// The variant determines the grant type, so a request can never pair `password`
/// with client credentials (or the reverse). Secrets print as `[redacted]` in `Debug`
/// output.
#[derive(Clone, Debug)]
pub enum Credentials {
	/// End-user credentials for the `password` grant.
	ResourceOwner {
		/// Resource owner username (an email address on `oauthsrv`).
		username: ResourceOwnerUsername,
		/// Resource owner password.
		password: ResourceOwnerPassword,
	},
	/// Pre-registered application credentials for the `client_credentials` grant.
	Client {
		/// Registered client identifier.
		client_id: ClientId,
		/// Secret issued alongside the client identifier.
		client_secret: ClientSecret,
	},
}
impl Credentials {
	/// Builds resource owner credentials, rejecting empty values.
	pub fn resource_owner(
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let username = non_empty("username", username.into())?;
		let password = non_empty("password", password.into())?;

		Ok(Self::ResourceOwner {
			username: ResourceOwnerUsername::new(username),
			password: ResourceOwnerPassword::new(password),
		})
	}

	/// Builds client credentials, rejecting empty values.
	pub fn client(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let client_id = non_empty("client_id", client_id.into())?;
		let client_secret = non_empty("client_secret", client_secret.into())?;

		Ok(Self::Client {
			client_id: ClientId::new(client_id),
			client_secret: ClientSecret::new(client_secret),
		})
	}

	/// Grant type implied by the credential variant.
	pub fn grant_type(&self) -> GrantType {
		match self {
			Self::ResourceOwner { .. } => GrantType::Password,
			Self::Client { .. } => GrantType::ClientCredentials,
		}
	}

	/// Form fields contributed by the credentials, in wire order.
	pub(crate) fn form_fields(&self) -> [(&'static str, &str); 2] {
		match self {
			Self::ResourceOwner { username, password } =>
				[("username", username.as_str()), ("password", password.secret().as_str())],
			Self::Client { client_id, client_secret } =>
				[("client_id", client_id.as_str()), ("client_secret", client_secret.secret().as_str())],
		}
	}
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
	if value.is_empty() { Err(ConfigError::EmptyCredential { field }) } else { Ok(value) }
}
