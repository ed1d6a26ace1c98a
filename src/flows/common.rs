//! Request model shared by every grant.

// self
use crate::{_prelude::*, auth::Credentials, error::ConfigError, provider::GrantType};

/// A single token request: where to send it, who is asking, and what scope to ask for.
///
/// The grant type is derived from the [`Credentials`] variant, so a request always carries
/// exactly the credential fields its grant needs.
#[derive(Clone, Debug)]
pub struct TokenRequest {
	/// Token endpoint receiving the POST.
	pub endpoint: Url,
	/// Grant credentials.
	pub credentials: Credentials,
	/// Opaque scope string (`*` asks `oauthsrv` for every scope).
	pub scope: Option<String>,
}
impl TokenRequest {
	/// Builds a `password` grant request.
	pub fn password(
		endpoint: Url,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			endpoint,
			credentials: Credentials::resource_owner(username, password)?,
			scope: None,
		})
	}

	/// Builds a `client_credentials` grant request.
	pub fn client_credentials(
		endpoint: Url,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		scope: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			endpoint,
			credentials: Credentials::client(client_id, client_secret)?,
			scope: Some(scope.into()),
		})
	}

	/// Grant type selected by the credentials.
	pub fn grant_type(&self) -> GrantType {
		self.credentials.grant_type()
	}

	/// Form body fields in wire order: credentials first, then `scope` when present.
	pub(crate) fn form_fields(&self) -> Vec<(&'static str, &str)> {
		let mut fields = self.credentials.form_fields().to_vec();

		if let Some(scope) = self.scope.as_deref() {
			fields.push(("scope", scope));
		}

		fields
	}
}
