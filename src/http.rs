//! Transport primitives for token requests.
//!
//! [`TokenHttpClient`] is the crate's only dependency on an HTTP stack. The flows encode
//! requests as [`oauth2::HttpRequest`] values and hand them to a short-lived
//! [`AsyncHttpClient`] handle, so tests and downstream crates can swap the transport
//! without touching request or response handling.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
#[cfg(feature = "reqwest")] use oauth2::{HttpRequest, HttpResponse};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Abstraction over HTTP transports capable of executing token requests.
///
/// Implementations must be `Send + Sync + 'static` so a requester can be shared across
/// tasks, and the handles they return must own whatever state their request futures need
/// so those futures remain `Send`.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single request.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] carrying the per-request timeout.
///
/// Token endpoints answer directly, so clients built by [`ReqwestHttpClient::new`] do not
/// follow redirects; a redirect surfaces as an unexpected status instead. Configure any
/// custom [`ReqwestClient`] passed to [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	timeout: Duration,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Timeout applied to every request unless overridden.
	pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(10);

	/// Builds a client with redirects disabled and the default timeout.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self::with_client(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, timeout: Self::DEFAULT_TIMEOUT }
	}

	/// Overrides the per-request timeout; non-positive values restore the default.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = if timeout.is_positive() { timeout } else { Self::DEFAULT_TIMEOUT };

		self
	}

	/// Per-request timeout currently applied.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle { client: self.client.clone(), timeout: self.timeout.unsigned_abs() }
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle {
	client: ReqwestClient,
	timeout: std::time::Duration,
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();
		let timeout = self.timeout;

		Box::pin(async move {
			let mut request: reqwest::Request = request.try_into().map_err(Box::new)?;

			*request.timeout_mut() = Some(timeout);

			let response = client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
