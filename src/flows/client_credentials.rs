//! Client Credentials grant for machine-to-machine tokens.
//!
//! The reference `oauthsrv` deployment routes this grant but does not implement it, so
//! descriptors must opt in with `support_grant(GrantType::ClientCredentials)`. Without
//! the flag the call fails locally with `ConfigError::UnsupportedGrant` and nothing is
//! sent.

// self
use crate::{
	_prelude::*,
	auth::TokenResponse,
	flows::{Requester, TokenRequest},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
};

impl<C, M> Requester<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges registered client credentials for an access token.
	///
	/// Sends `POST <token endpoint>?grant_type=client_credentials` with a form body of
	/// exactly `client_id`, `client_secret`, and `scope` (`*` asks for every scope).
	pub async fn request_client_credentials_token(
		&self,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		scope: impl Into<String>,
	) -> Result<TokenResponse> {
		let request = TokenRequest::client_credentials(
			self.descriptor.endpoints.token.clone(),
			client_id,
			client_secret,
			scope,
		)?;

		self.exchange(request, "client_credentials").await
	}
}
