// self
use crate::{_prelude::*, http::Method, obs::LockoutReason, rate_limit::RateLimitInfo};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by the request loop.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the provided method + route template.
	pub fn new(method: Method, route: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("tatsu_api.request", method = method.as_str(), route);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, route);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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

/// Logs the rate-limit headers seen on one attempt.
pub fn trace_rate_limit(status: u16, attempt: u32, info: &RateLimitInfo) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			status,
			attempt,
			limit = ?info.limit,
			remaining = ?info.remaining,
			reset = ?info.reset,
			"Rate limit info."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, attempt, info);
	}
}

/// Logs a lockout imposed on the client's gate.
pub fn trace_lockout(reason: LockoutReason, delay: StdDuration) {
	#[cfg(feature = "tracing")]
	{
		match reason {
			LockoutReason::Exhausted => tracing::info!(
				delay_secs = delay.as_secs_f64(),
				"Emptied the rate limit; locking out until reset."
			),
			LockoutReason::RateLimited => tracing::info!(
				delay_secs = delay.as_secs_f64(),
				"Hit a rate limit; locking out until reset."
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (reason, delay);
	}
}

/// Logs that a request gave up after every attempt was rate limited.
pub fn trace_retries_exhausted(attempts: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(attempts, "Reached maximum number of retries.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = attempts;
	}
}
