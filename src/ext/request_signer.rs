//! Request signing contracts that attach issued tokens to arbitrary HTTP clients.

// std
#[cfg(feature = "reqwest")] use std::convert::Infallible;
// crates.io
use oauth2::{
	AccessToken, HttpRequest,
	http::{
		HeaderValue,
		header::{AUTHORIZATION, InvalidHeaderValue},
	},
};

/// Describes how to attach an [`AccessToken`] to an outbound request without
/// constraining the HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects authorization state derived from `token`.
	fn attach_token(&self, request: Request, token: &AccessToken) -> Result<Request, Error>;
}

/// Signer that sets `Authorization: Bearer <token>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerSigner;
impl BearerSigner {
	/// Renders the `Authorization` header value, marked sensitive so it is never printed.
	pub fn header_value(token: &AccessToken) -> Result<HeaderValue, InvalidHeaderValue> {
		let mut value = HeaderValue::from_str(&format!("Bearer {}", token.secret()))?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl RequestSignerExt<HttpRequest, InvalidHeaderValue> for BearerSigner {
	fn attach_token(
		&self,
		mut request: HttpRequest,
		token: &AccessToken,
	) -> Result<HttpRequest, InvalidHeaderValue> {
		request.headers_mut().insert(AUTHORIZATION, Self::header_value(token)?);

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, Infallible> for BearerSigner {
	fn attach_token(
		&self,
		request: reqwest::RequestBuilder,
		token: &AccessToken,
	) -> Result<reqwest::RequestBuilder, Infallible> {
		Ok(request.bearer_auth(token.secret()))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn bearer_signer_sets_sensitive_authorization_header() {
		let token = AccessToken::new("abc123".into());
		let request = oauth2::http::Request::builder()
			.uri("http://localhost:8080/api/groups")
			.body(Vec::new())
			.expect("Request fixture should build.");
		let signed = BearerSigner.attach_token(request, &token).expect("Token should attach.");
		let header =
			signed.headers().get(AUTHORIZATION).expect("Authorization header should be set.");

		assert_eq!(header.to_str().ok(), Some("Bearer abc123"));
		assert!(header.is_sensitive());
	}

	#[test]
	fn header_value_rejects_control_characters() {
		let token = AccessToken::new("bad\ntoken".into());

		assert!(BearerSigner::header_value(&token).is_err());
	}
}
