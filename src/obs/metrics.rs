// self
use crate::obs::{LockoutReason, RequestOutcome};

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(route: &'static str, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"tatsu_api_request_total",
			"route" => route,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (route, outcome);
	}
}

/// Records a gate lockout via the global metrics recorder (when enabled).
pub fn record_lockout(reason: LockoutReason) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("tatsu_api_lockout_total", "reason" => reason.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = reason;
	}
}
