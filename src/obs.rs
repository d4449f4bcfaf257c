//! Optional observability helpers for API requests and gate lockouts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `tatsu_api.request` with the `method` and
//!   `route` fields, plus events for rate-limit observations, lockouts, and retry exhaustion.
//! - Enable `metrics` to increment the `tatsu_api_request_total` counter for every
//!   attempt/success/failure, labeled by `route` + `outcome`, and the
//!   `tatsu_api_lockout_total` counter labeled by `reason`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each logical request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to the request loop.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Why the client locked its gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockoutReason {
	/// A response reported zero remaining requests.
	Exhausted,
	/// The API answered `429 Too Many Requests`.
	RateLimited,
}
impl LockoutReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			LockoutReason::Exhausted => "exhausted",
			LockoutReason::RateLimited => "rate_limited",
		}
	}
}
impl Display for LockoutReason {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
