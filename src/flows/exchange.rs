//! Shared request/validate cycle behind every grant.

// self
use crate::{
	_prelude::*,
	auth::TokenResponse,
	error::ConfigError,
	flows::{self, Requester, TokenRequest},
	http::TokenHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{GrantType, descriptor::builder},
};

impl<C, M> Requester<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends `request` to its own endpoint and validates the response envelope.
	///
	/// Fails with [`ConfigError::UnsupportedGrant`] before any network I/O when the
	/// descriptor does not enable the request's grant, and with
	/// [`ConfigError::InvalidDescriptor`] when the endpoint is plain `http` on a
	/// non-loopback host.
	pub async fn request_token(&self, request: TokenRequest) -> Result<TokenResponse> {
		self.exchange(request, "request_token").await
	}

	pub(crate) async fn exchange(
		&self,
		request: TokenRequest,
		stage: &'static str,
	) -> Result<TokenResponse> {
		let kind = FlowKind::from(request.grant_type());
		let span = FlowSpan::new(kind, stage);

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				self.ensure_grant_supported(request.grant_type())?;
				builder::validate_endpoint("token", &request.endpoint)
					.map_err(ConfigError::from)?;

				let http_request = oauth::encode_token_request(&request)?;
				let response = self.dispatch(http_request).await?;

				oauth::decode_token_response(response)
			})
			.await;

		flows::record_outcome(kind, &result);

		result
	}

	fn ensure_grant_supported(&self, grant: GrantType) -> Result<()> {
		if self.descriptor.supports(grant) {
			Ok(())
		} else {
			Err(ConfigError::UnsupportedGrant {
				descriptor: self.descriptor.id.to_string(),
				grant: grant.as_str(),
			}
			.into())
		}
	}
}
