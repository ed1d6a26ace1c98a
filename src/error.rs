//! Client-level error types shared across flows, providers, and transports.

// self
use crate::{_prelude::*, provider::ProviderDescriptorError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Server answered with a status other than `200 OK`.
	#[error("Token endpoint returned HTTP {status}, expected 200.")]
	UnexpectedStatus {
		/// HTTP status code returned by the server.
		status: u16,
		/// Bounded preview of the response body.
		body: String,
	},
	/// Successful response lacks a required field (or carries an empty value).
	#[error("Token endpoint response is missing the `{name}` field.")]
	MissingField {
		/// Name of the absent field.
		name: &'static str,
	},
	/// Successful response body is not a JSON object.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code that accompanied the body.
		status: u16,
	},
}

/// Configuration and validation failures raised before any request leaves the process.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] ProviderDescriptorError),

	/// Descriptor does not enable the requested grant.
	#[error("Descriptor `{descriptor}` does not enable the {grant} grant.")]
	UnsupportedGrant {
		/// Provider identifier string.
		descriptor: String,
		/// Disabled grant label.
		grant: &'static str,
	},
	/// A credential value was empty.
	#[error("The `{field}` credential cannot be empty.")]
	EmptyCredential {
		/// Form field the credential maps to.
		field: &'static str,
	},
	/// Health probe requested but the descriptor has no health endpoint.
	#[error("Descriptor `{descriptor}` does not declare a health endpoint.")]
	MissingHealthEndpoint {
		/// Provider identifier string.
		descriptor: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request timed out while calling the token endpoint.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn display_messages_name_the_failure() {
		let err = Error::UnexpectedStatus { status: 500, body: "{}".into() };

		assert_eq!(err.to_string(), "Token endpoint returned HTTP 500, expected 200.");

		let err = Error::MissingField { name: "access_token" };

		assert_eq!(err.to_string(), "Token endpoint response is missing the `access_token` field.");

		let err: Error = ConfigError::EmptyCredential { field: "username" }.into();

		assert_eq!(err.to_string(), "The `username` credential cannot be empty.");
	}

	#[test]
	fn io_failures_become_transport_errors() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err: Error = TransportError::from(io).into();

		assert!(matches!(err, Error::Transport(TransportError::Io(_))));
	}
}
