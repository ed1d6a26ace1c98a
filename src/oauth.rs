//! Token endpoint wire codec and transport error mapping.
//!
//! Every grant shares one wire shape: `POST <endpoint>?grant_type=<grant>` with an
//! `application/x-www-form-urlencoded` body holding only the grant's fields. Responses are
//! checked for status before the body is parsed, so a failing server never reports a
//! missing field.

pub use oauth2;

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request, StatusCode,
		header::{ACCEPT, CONTENT_TYPE},
	},
};
use serde_json::{Map, Value};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::TokenResponse,
	error::{ConfigError, TransportError},
	flows::TokenRequest,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";
const GRANT_TYPE_PARAM: &str = "grant_type";
const BODY_PREVIEW_LIMIT: usize = 256;

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(&self, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(message),
			_ => map_generic_transport_error("unrecognized HTTP client failure".into()),
		}
	}
}

/// Encodes a token request as `POST <endpoint>?grant_type=<grant>` with a form body.
///
/// Any `grant_type` already present in the endpoint's query is replaced; other query
/// parameters are preserved.
pub fn encode_token_request(request: &TokenRequest) -> Result<HttpRequest> {
	let mut url = request.endpoint.clone();
	let retained = url
		.query_pairs()
		.filter(|(key, _)| key != GRANT_TYPE_PARAM)
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect::<Vec<_>>();

	url.query_pairs_mut()
		.clear()
		.extend_pairs(retained)
		.append_pair(GRANT_TYPE_PARAM, request.grant_type().as_str());

	let body = form_urlencoded::Serializer::new(String::new())
		.extend_pairs(request.form_fields())
		.finish();

	Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_CONTENT_TYPE)
		.body(body.into_bytes())
		.map_err(|e| ConfigError::from(e).into())
}

/// Encodes a bodiless `GET` used for liveness probes.
pub fn encode_health_request(endpoint: &Url) -> Result<HttpRequest> {
	Request::builder()
		.method(Method::GET)
		.uri(endpoint.as_str())
		.body(Vec::new())
		.map_err(|e| ConfigError::from(e).into())
}

/// Decodes a token endpoint response, enforcing `200` and a non-empty `access_token`.
pub fn decode_token_response(response: HttpResponse) -> Result<TokenResponse> {
	let status = response.status();

	ensure_ok(status, response.body())?;

	let mut deserializer = serde_json::Deserializer::from_slice(response.body());
	let body: Map<String, Value> = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Parse { source, status: status.as_u16() })?;

	// Trailing bytes after the object are a parse failure at the document root.
	deserializer.end().map_err(|e| Error::Parse {
		source: serde_path_to_error::Error::new(serde_path_to_error::Track::new().path(), e),
		status: status.as_u16(),
	})?;

	TokenResponse::new(status.as_u16(), body)
}

/// Fails with [`Error::UnexpectedStatus`] unless `status` is `200 OK`.
pub fn ensure_ok(status: StatusCode, body: &[u8]) -> Result<()> {
	if status == StatusCode::OK {
		Ok(())
	} else {
		Err(Error::UnexpectedStatus { status: status.as_u16(), body: body_preview(body) })
	}
}

/// Lossy UTF-8 preview of a response body, capped at 256 characters.
pub(crate) fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	if text.chars().count() <= BODY_PREVIEW_LIMIT {
		return text.into_owned();
	}

	let mut buf = text.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}

fn map_generic_transport_error(message: String) -> Error {
	TransportError::Network { source: message.into() }.into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn endpoint(value: &str) -> Url {
		Url::parse(value).expect("Endpoint fixture should parse.")
	}

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be valid.");

		response
	}

	fn form_pairs(request: &HttpRequest) -> Vec<(String, String)> {
		form_urlencoded::parse(request.body()).into_owned().collect()
	}

	fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs.iter().map(|(key, value)| ((*key).to_owned(), (*value).to_owned())).collect()
	}

	#[test]
	fn password_request_uses_query_grant_and_exact_form() {
		let request = TokenRequest::password(
			endpoint("http://localhost:8080/oauth/v2/auth"),
			"test@email.com",
			"root",
		)
		.expect("Password request should build.");
		let encoded = encode_token_request(&request).expect("Password request should encode.");

		assert_eq!(*encoded.method(), Method::POST);
		assert_eq!(
			encoded.uri().to_string(),
			"http://localhost:8080/oauth/v2/auth?grant_type=password"
		);
		assert_eq!(
			encoded.headers().get(CONTENT_TYPE).and_then(|value| value.to_str().ok()),
			Some(FORM_CONTENT_TYPE)
		);
		assert_eq!(
			form_pairs(&encoded),
			owned(&[("username", "test@email.com"), ("password", "root")])
		);
		assert_eq!(encoded.body().as_slice(), b"username=test%40email.com&password=root");
	}

	#[test]
	fn client_credentials_request_uses_query_grant_and_exact_form() {
		let request = TokenRequest::client_credentials(
			endpoint("http://localhost:8080/oauth/v2/auth"),
			"<MY-CLIENT-ID>",
			"<MY-CLIENT-PASSWORD>",
			"*",
		)
		.expect("Client credentials request should build.");
		let encoded =
			encode_token_request(&request).expect("Client credentials request should encode.");

		assert_eq!(
			encoded.uri().to_string(),
			"http://localhost:8080/oauth/v2/auth?grant_type=client_credentials"
		);
		assert_eq!(
			form_pairs(&encoded),
			owned(&[
				("client_id", "<MY-CLIENT-ID>"),
				("client_secret", "<MY-CLIENT-PASSWORD>"),
				("scope", "*"),
			])
		);
	}

	#[test]
	fn existing_query_is_kept_and_grant_type_replaced() {
		let request = TokenRequest::password(
			endpoint("https://auth.example.com/token?tenant=a&grant_type=code"),
			"user",
			"pass",
		)
		.expect("Password request should build.");
		let encoded = encode_token_request(&request).expect("Password request should encode.");

		assert_eq!(
			encoded.uri().to_string(),
			"https://auth.example.com/token?tenant=a&grant_type=password"
		);
	}

	#[test]
	fn health_request_is_bodiless_get() {
		let encoded = encode_health_request(&endpoint("http://localhost:8080/healthcheck"))
			.expect("Health request should encode.");

		assert_eq!(*encoded.method(), Method::GET);
		assert!(encoded.body().is_empty());
	}

	#[test]
	fn decode_accepts_token_body() {
		let token = decode_token_response(response(
			200,
			"{\"access_token\":\"abc123\",\"token_type\":\"bearer\"}",
		))
		.expect("Token body should decode.");

		assert_eq!(token.access_token().secret(), "abc123");
		assert_eq!(token.token_type(), Some("bearer"));
	}

	#[test]
	fn decode_checks_status_before_body() {
		let err = decode_token_response(response(401, "Nope\n"))
			.expect_err("Unauthorized responses must fail.");

		match err {
			Error::UnexpectedStatus { status, body } => {
				assert_eq!(status, 401);
				assert_eq!(body, "Nope\n");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn decode_reports_missing_token() {
		let err = decode_token_response(response(200, "{\"jwt\":\"test\"}"))
			.expect_err("Bodies without access_token must fail.");

		assert!(matches!(err, Error::MissingField { name: "access_token" }));
	}

	#[test]
	fn decode_reports_malformed_json() {
		for body in [
			"Ok!",
			"[\"access_token\"]",
			"",
			"{\"access_token\":\"abc\"} trailing-garbage",
		] {
			let err = decode_token_response(response(200, body))
				.expect_err("Non-object bodies must fail to parse.");

			assert!(matches!(err, Error::Parse { status: 200, .. }), "{body:?} => {err:?}");
		}
	}

	#[test]
	fn body_preview_is_bounded() {
		let long = "x".repeat(BODY_PREVIEW_LIMIT + 10);
		let preview = body_preview(long.as_bytes());

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
		assert_eq!(body_preview(b"short"), "short");
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn generic_transport_failures_map_to_network_errors() {
		let err = ReqwestTransportErrorMapper
			.map_transport_error(HttpClientError::Other("connection reset".into()));

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));

		let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
		let err = ReqwestTransportErrorMapper.map_transport_error(HttpClientError::Io(io));

		assert!(matches!(err, Error::Transport(TransportError::Io(_))));
	}
}
