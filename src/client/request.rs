//! Rate-limited request loop shared by every endpoint helper.
//!
//! Each attempt holds a gate permit for exactly the duration of the remote call. Lockouts
//! derived from the response are imposed *before* the permit is released, so the next
//! queued caller already observes them.

// self
use crate::{
	_prelude::*,
	client::Client,
	error::{ApiError, DecodeError, TransportError},
	http::{ApiRequest, ApiResponse, ApiTransport},
	obs::{self, LockoutReason, RequestOutcome, RequestSpan},
	rate_limit::RateLimitInfo,
	route::Route,
};

const TOO_MANY_REQUESTS: u16 = 429;

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Sends `route` and returns the raw body of the first success response.
	///
	/// `429` responses lock the gate until the advertised reset and are retried up to
	/// [`ClientConfig::max_attempts`](crate::ClientConfig::max_attempts) times in total. Any
	/// other non-success status is returned as an [`ApiError`] immediately.
	pub async fn request(&self, route: &Route) -> Result<Vec<u8>> {
		let span = RequestSpan::new(route.method, route.template);

		obs::record_request_outcome(route.template, RequestOutcome::Attempt);

		let result = span.instrument(self.dispatch(route)).await;

		match &result {
			Ok(_) => obs::record_request_outcome(route.template, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(route.template, RequestOutcome::Failure),
		}

		result
	}

	/// Sends `route` and decodes the success body as JSON.
	pub async fn request_json<D>(&self, route: &Route) -> Result<D>
	where
		D: DeserializeOwned,
	{
		let body = self.request(route).await?;

		decode(route.template, &body)
	}

	async fn dispatch(&self, route: &Route) -> Result<Vec<u8>> {
		let max_attempts = self.config.max_attempts.max(1);
		let mut last_limited = None;

		for attempt in 1..=max_attempts {
			let permit = self.gate.acquire().await;
			let response = self
				.transport
				.send(self.build_request(route))
				.await
				.map_err(TransportError::network)?;
			let info = &response.rate_limit;

			obs::trace_rate_limit(response.status, attempt, info);

			let reset = self.observe_reset(info.reset);

			if response.status != TOO_MANY_REQUESTS && info.is_exhausted() {
				self.lock_out(LockoutReason::Exhausted, self.lockout_delay(info, reset));
			}
			if response.is_success() {
				return Ok(response.body);
			}
			if response.status != TOO_MANY_REQUESTS {
				return Err(api_error(&response).into());
			}

			let delay = self.lockout_delay(info, reset);

			self.lock_out(
				LockoutReason::RateLimited,
				if delay.is_zero() { self.config.fallback_backoff } else { delay },
			);
			last_limited = Some(api_error(&response));

			drop(permit);
		}

		obs::trace_retries_exhausted(max_attempts);

		Err(last_limited
			.unwrap_or_else(|| {
				ApiError::from_response(TOO_MANY_REQUESTS, Some("Too Many Requests"), &[])
			})
			.into())
	}

	fn build_request(&self, route: &Route) -> ApiRequest {
		ApiRequest {
			method: route.method,
			url: route.url.clone(),
			query: route.query.clone(),
			headers: vec![
				("Authorization".into(), self.token.clone()),
				("User-Agent".into(), self.config.user_agent.clone()),
			],
			body: route.body.clone(),
		}
	}

	/// Folds `reset` into the latest reset timestamp seen by this client and returns it.
	fn observe_reset(&self, reset: Option<OffsetDateTime>) -> Option<OffsetDateTime> {
		let mut latest = self.latest_reset.lock();

		if let Some(reset) = reset
			&& latest.is_none_or(|current| current < reset)
		{
			*latest = Some(reset);
		}

		*latest
	}

	fn lockout_delay(&self, info: &RateLimitInfo, reset: Option<OffsetDateTime>) -> StdDuration {
		RateLimitInfo { reset, ..info.clone() }.delay_from(OffsetDateTime::now_utc())
	}

	fn lock_out(&self, reason: LockoutReason, delay: StdDuration) {
		self.gate.lockout_for(delay);

		obs::trace_lockout(reason, delay);
		obs::record_lockout(reason);
	}
}

fn api_error(response: &ApiResponse) -> ApiError {
	ApiError::from_response(response.status, response.reason.as_deref(), &response.body)
}

pub(crate) fn decode<D>(route: &'static str, body: &[u8]) -> Result<D>
where
	D: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError { route, source }.into())
}
