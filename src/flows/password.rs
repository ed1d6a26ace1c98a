//! Resource Owner Password Credentials grant.

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
	/// Exchanges end-user credentials for an access token.
	///
	/// Sends `POST <token endpoint>?grant_type=password` with a form body of exactly
	/// `username` and `password`, then requires `200` and a non-empty `access_token`.
	pub async fn request_password_token(
		&self,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<TokenResponse> {
		let request =
			TokenRequest::password(self.descriptor.endpoints.token.clone(), username, password)?;

		self.exchange(request, "password").await
	}
}
