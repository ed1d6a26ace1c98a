//! Liveness probe against the server's health endpoint.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	flows::{self, Requester},
	http::TokenHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C, M> Requester<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends `GET <health endpoint>` and succeeds only on `200`.
	pub async fn health_check(&self) -> Result<()> {
		const KIND: FlowKind = FlowKind::HealthCheck;

		let span = FlowSpan::new(KIND, "health_check");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				let endpoint = self.descriptor.endpoints.health.as_ref().ok_or_else(|| {
					ConfigError::MissingHealthEndpoint { descriptor: self.descriptor.id.to_string() }
				})?;
				let response = self.dispatch(oauth::encode_health_request(endpoint)?).await?;

				oauth::ensure_ok(response.status(), response.body())
			})
			.await;

		flows::record_outcome(KIND, &result);

		result
	}
}
