//! Validated token endpoint responses.

// crates.io
use oauth2::{AccessToken, RefreshToken};
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Successful token endpoint response.
///
/// Construction enforces the response envelope: the status is `200` and the JSON body
/// maps `access_token` to a non-empty string. Every other field is kept verbatim and
/// can be read through the typed helpers or [`TokenResponse::field`]. `Debug` output
/// redacts the token and lists only the body keys.
#[derive(Clone)]
pub struct TokenResponse {
	status: u16,
	access_token: AccessToken,
	body: Map<String, Value>,
}
impl TokenResponse {
	/// Name of the field carrying the issued token.
	pub const ACCESS_TOKEN: &'static str = "access_token";

	/// Validates a decoded response body.
	pub fn new(status: u16, body: Map<String, Value>) -> Result<Self> {
		if status != 200 {
			let preview = crate::oauth::body_preview(Value::Object(body).to_string().as_bytes());

			return Err(Error::UnexpectedStatus { status, body: preview });
		}

		let access_token = match body.get(Self::ACCESS_TOKEN) {
			Some(Value::String(token)) if !token.is_empty() => AccessToken::new(token.to_owned()),
			_ => return Err(Error::MissingField { name: Self::ACCESS_TOKEN }),
		};

		Ok(Self { status, access_token, body })
	}

	/// HTTP status code of the response (always `200`).
	pub fn status(&self) -> u16 {
		self.status
	}

	/// Issued access token. Callers must avoid logging the secret.
	pub fn access_token(&self) -> &AccessToken {
		&self.access_token
	}

	/// `token_type` field, typically `bearer`.
	pub fn token_type(&self) -> Option<&str> {
		self.body.get("token_type").and_then(Value::as_str)
	}

	/// `expires_in` field as a positive duration.
	pub fn expires_in(&self) -> Option<Duration> {
		let secs = self.body.get("expires_in").and_then(Value::as_i64)?;

		if secs > 0 { Some(Duration::seconds(secs)) } else { None }
	}

	/// `refresh_token` field when the server issued a non-empty one.
	pub fn refresh_token(&self) -> Option<RefreshToken> {
		self.body
			.get("refresh_token")
			.and_then(Value::as_str)
			.filter(|token| !token.is_empty())
			.map(|token| RefreshToken::new(token.to_owned()))
	}

	/// `scope` field granted by the server.
	pub fn scope(&self) -> Option<&str> {
		self.body.get("scope").and_then(Value::as_str)
	}

	/// Raw access to any body field.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.body.get(name)
	}

	/// Full response body, including the unredacted token.
	pub fn body(&self) -> &Map<String, Value> {
		&self.body
	}
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenResponse")
			.field("status", &self.status)
			.field("access_token", &self.access_token)
			.field("fields", &self.body.keys().collect::<Vec<_>>())
			.finish()
	}
}
