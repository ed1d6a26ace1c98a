// self
use crate::{_prelude::*, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by token flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauthsrv_client.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits one event describing how a flow finished (when tracing is enabled).
///
/// Only status codes and error messages are recorded; tokens and credentials never reach
/// the subscriber.
pub fn trace_flow_result<T>(kind: FlowKind, result: &Result<T>) {
	#[cfg(feature = "tracing")]
	{
		match result {
			Ok(_) => tracing::debug!(flow = kind.as_str(), "token flow succeeded"),
			Err(Error::UnexpectedStatus { status, .. }) => tracing::warn!(
				flow = kind.as_str(),
				status = *status,
				"authorization server returned an unexpected status"
			),
			Err(err) => tracing::warn!(flow = kind.as_str(), error = %err, "token flow failed"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, result);
	}
}
