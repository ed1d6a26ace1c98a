//! Token flows driven by a [`Requester`].

pub mod common;

mod client_credentials;
mod exchange;
mod health;
mod password;

pub use common::*;

// crates.io
use oauth2::{AsyncHttpClient, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome},
	provider::ProviderDescriptor,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Requester specialized for the crate's default reqwest transport stack.
pub type ReqwestRequester = Requester<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Issues token requests against a single authorization server descriptor.
///
/// Each operation is one atomic cycle: encode the request, send it once, validate the
/// response. Nothing is cached or retried and no state survives between calls, so a
/// requester can be cloned and shared across tasks freely.
#[derive(Clone)]
pub struct Requester<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Descriptor that defines endpoints and enabled grants.
	pub descriptor: ProviderDescriptor,
}
impl<C, M> Requester<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a requester that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self { http_client: http_client.into(), transport_mapper: mapper.into(), descriptor }
	}

	pub(crate) async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
		let handle = self.http_client.handle();

		handle.call(request).await.map_err(|err| self.transport_mapper.map_transport_error(err))
	}
}
#[cfg(feature = "reqwest")]
impl Requester<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new requester for the provided descriptor.
	///
	/// The requester provisions its own reqwest-backed transport with redirects disabled
	/// and [`ReqwestHttpClient::DEFAULT_TIMEOUT`] applied to every request.
	pub fn new(descriptor: ProviderDescriptor) -> Result<Self> {
		Ok(Self::with_http_client(
			descriptor,
			ReqwestHttpClient::new()?,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}
}
impl<C, M> Debug for Requester<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Requester").field("descriptor", &self.descriptor).finish()
	}
}

fn record_outcome<T>(kind: FlowKind, result: &Result<T>) {
	let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

	obs::record_flow_outcome(kind, outcome);
	obs::trace_flow_result(kind, result);
}
