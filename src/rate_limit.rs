//! Rate-limit hints carried by Tatsu API responses.
//!
//! Tatsu reports its budget through `X-RateLimit-Limit`, `X-RateLimit-Remaining`, and
//! `X-RateLimit-Reset` (Unix seconds). Proxies in front of it may add a standard
//! `Retry-After` header instead, so both are understood.

// crates.io
use time::format_description::well_known::Rfc2822;
// self
use crate::_prelude::*;

/// Header carrying the request budget of the current window.
pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
/// Header carrying the number of requests left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Header carrying the Unix timestamp at which the window resets.
pub const RESET_HEADER: &str = "x-ratelimit-reset";
/// Standard HTTP retry hint.
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// Rate-limit metadata captured from a single response.
///
/// Every field is optional; headers that are missing or malformed are left unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
	/// Requests allowed per window.
	pub limit: Option<u64>,
	/// Requests left in the current window.
	pub remaining: Option<u64>,
	/// Instant the current window resets.
	pub reset: Option<OffsetDateTime>,
	/// Retry hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl RateLimitInfo {
	/// Collects rate-limit metadata from `(name, value)` header pairs.
	///
	/// Header names are matched case-insensitively.
	pub fn from_headers<'a, I>(headers: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let mut info = Self::default();

		for (name, value) in headers {
			let value = value.trim();

			if name.eq_ignore_ascii_case(LIMIT_HEADER) {
				info.limit = value.parse().ok();
			} else if name.eq_ignore_ascii_case(REMAINING_HEADER) {
				info.remaining = value.parse().ok();
			} else if name.eq_ignore_ascii_case(RESET_HEADER) {
				info.reset = parse_reset(value);
			} else if name.eq_ignore_ascii_case(RETRY_AFTER_HEADER) {
				info.retry_after = parse_retry_after(value, OffsetDateTime::now_utc());
			}
		}

		info
	}

	/// Returns `true` when the window has no requests left.
	pub fn is_exhausted(&self) -> bool {
		self.remaining == Some(0)
	}

	/// Computes how long callers should stay away, measured from `now`.
	///
	/// Prefers the reset timestamp when it lies in the future, then `Retry-After`, and
	/// otherwise yields zero.
	pub fn delay_from(&self, now: OffsetDateTime) -> StdDuration {
		self.reset
			.and_then(|reset| positive(reset - now))
			.or_else(|| self.retry_after.and_then(positive))
			.unwrap_or(StdDuration::ZERO)
	}
}

fn parse_reset(raw: &str) -> Option<OffsetDateTime> {
	let secs = raw.parse::<f64>().ok()?;

	if !secs.is_finite() {
		return None;
	}

	OffsetDateTime::from_unix_timestamp_nanos((secs * 1_000_000_000.) as i128).ok()
}

fn parse_retry_after(raw: &str, now: OffsetDateTime) -> Option<Duration> {
	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - now;

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

fn positive(delta: Duration) -> Option<StdDuration> {
	if delta.is_positive() { StdDuration::try_from(delta).ok() } else { None }
}
