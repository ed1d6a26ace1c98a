//! RFC 6750 `WWW-Authenticate: Bearer` challenge parsing.

// std
use std::{iter::Peekable, str::Chars};
// crates.io
use oauth2::http::{HeaderMap, header::WWW_AUTHENTICATE};

/// Error code carried by a bearer challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BearerError {
	/// The request was malformed, typically because no token was supplied.
	InvalidRequest,
	/// The token is expired, revoked, malformed, or failed verification.
	InvalidToken,
	/// The token lacks the scopes the resource requires.
	InsufficientScope,
	/// Any other error code, verbatim.
	Other(String),
}
impl BearerError {
	fn from_code(code: String) -> Self {
		match code.as_str() {
			"invalid_request" => Self::InvalidRequest,
			"invalid_token" => Self::InvalidToken,
			"insufficient_scope" => Self::InsufficientScope,
			_ => Self::Other(code),
		}
	}
}

/// Parsed `Bearer` challenge from a resource server's `WWW-Authenticate` header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BearerChallenge {
	/// `error` parameter.
	pub error: Option<BearerError>,
	/// `error_description` parameter.
	pub error_description: Option<String>,
	/// `realm` parameter.
	pub realm: Option<String>,
	/// `scope` parameter listing the scopes the resource requires.
	pub scope: Option<String>,
}
impl BearerChallenge {
	/// Parses a single header value; returns `None` for other schemes or malformed input.
	pub fn parse(header: &str) -> Option<Self> {
		let header = header.trim();
		let (scheme, params) = match header.split_once(char::is_whitespace) {
			Some((scheme, params)) => (scheme, params),
			None => (header, ""),
		};

		if !scheme.eq_ignore_ascii_case("bearer") {
			return None;
		}

		let mut challenge = Self::default();

		for (key, value) in parse_params(params)? {
			match key.to_ascii_lowercase().as_str() {
				"error" => challenge.error = Some(BearerError::from_code(value)),
				"error_description" => challenge.error_description = Some(value),
				"realm" => challenge.realm = Some(value),
				"scope" => challenge.scope = Some(value),
				_ => {},
			}
		}

		Some(challenge)
	}

	/// Returns the first parsable `Bearer` challenge among the `WWW-Authenticate` headers.
	pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
		headers
			.get_all(WWW_AUTHENTICATE)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.find_map(Self::parse)
	}
}

fn parse_params(input: &str) -> Option<Vec<(String, String)>> {
	let mut chars = input.chars().peekable();
	let mut params = Vec::new();

	loop {
		skip_while(&mut chars, |c| c.is_whitespace() || c == ',');

		if chars.peek().is_none() {
			return Some(params);
		}

		let key = take_while(&mut chars, |c| c != '=' && c != ',' && !c.is_whitespace());

		skip_while(&mut chars, char::is_whitespace);

		if key.is_empty() || chars.next() != Some('=') {
			return None;
		}

		skip_while(&mut chars, char::is_whitespace);

		let value = if chars.peek() == Some(&'"') {
			chars.next();

			parse_quoted(&mut chars)?
		} else {
			take_while(&mut chars, |c| c != ',' && !c.is_whitespace())
		};

		params.push((key, value));
	}
}

fn parse_quoted(chars: &mut Peekable<Chars>) -> Option<String> {
	let mut value = String::new();

	while let Some(c) = chars.next() {
		match c {
			'"' => return Some(value),
			'\\' => value.push(chars.next()?),
			_ => value.push(c),
		}
	}

	// Unterminated quoted string.
	None
}

fn take_while(chars: &mut Peekable<Chars>, keep: impl Fn(char) -> bool) -> String {
	let mut buf = String::new();

	while let Some(&c) = chars.peek() {
		if !keep(c) {
			break;
		}

		buf.push(c);
		chars.next();
	}

	buf
}

fn skip_while(chars: &mut Peekable<Chars>, skip: impl Fn(char) -> bool) {
	while chars.next_if(|&c| skip(c)).is_some() {}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parses_oauthsrv_challenges() {
		assert_eq!(
			BearerChallenge::parse("Bearer error=\"invalid_request\""),
			Some(BearerChallenge {
				error: Some(BearerError::InvalidRequest),
				..Default::default()
			})
		);
		assert_eq!(
			BearerChallenge::parse("Bearer error=\"insufficient_scope\"")
				.and_then(|challenge| challenge.error),
			Some(BearerError::InsufficientScope)
		);
	}

	#[test]
	fn parses_all_known_parameters() {
		let challenge = BearerChallenge::parse(
			"bearer realm=\"groups\", error=invalid_token, \
			 error_description=\"The token \\\"abc\\\" expired\", scope=\"groups:read\"",
		)
		.expect("Challenge should parse.");

		assert_eq!(challenge.realm.as_deref(), Some("groups"));
		assert_eq!(challenge.error, Some(BearerError::InvalidToken));
		assert_eq!(challenge.error_description.as_deref(), Some("The token \"abc\" expired"));
		assert_eq!(challenge.scope.as_deref(), Some("groups:read"));
	}

	#[test]
	fn bare_scheme_and_unknown_codes() {
		assert_eq!(BearerChallenge::parse("Bearer"), Some(BearerChallenge::default()));
		assert_eq!(
			BearerChallenge::parse("Bearer error=\"temporarily_unavailable\"")
				.and_then(|challenge| challenge.error),
			Some(BearerError::Other("temporarily_unavailable".into()))
		);
	}

	#[test]
	fn rejects_other_schemes_and_malformed_params() {
		assert_eq!(BearerChallenge::parse("Basic realm=\"x\""), None);
		assert_eq!(BearerChallenge::parse("Bearer error=\"unterminated"), None);
		assert_eq!(BearerChallenge::parse("Bearer =value"), None);
		assert_eq!(BearerChallenge::parse("Bearer error"), None);
	}

	#[test]
	fn from_headers_picks_the_bearer_challenge() {
		let mut headers = HeaderMap::new();

		headers.append(
			WWW_AUTHENTICATE,
			"Basic realm=\"legacy\"".parse().expect("Header should parse."),
		);
		headers.append(
			WWW_AUTHENTICATE,
			"Bearer error=\"invalid_token\"".parse().expect("Header should parse."),
		);

		assert_eq!(
			BearerChallenge::from_headers(&headers).and_then(|challenge| challenge.error),
			Some(BearerError::InvalidToken)
		);
	}
}
