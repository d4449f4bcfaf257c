//! Plugs a hand-written transport into the client and shows concurrent callers being admitted
//! one at a time, in arrival order, once a `429` lockout expires.
//!
//! 1. Implement [`ApiTransport`] for any type that can turn an [`ApiRequest`] into an
//!    [`ApiResponse`].
//! 2. Pass it to [`Client::with_transport`].
//! 3. Share the client; every clone funnels through the same lockout gate.

// std
use std::{
	convert::Infallible,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::{Duration, Instant},
};
// crates.io
use color_eyre::Result;
// self
use tatsu_api::{
	Client, ClientConfig,
	http::{ApiRequest, ApiResponse, ApiTransport, TransportFuture},
	model::{GuildId, UserId},
	rate_limit::RateLimitInfo,
};

/// Answers the very first call with `429 Retry-After: 1` and every later call with a balance.
#[derive(Default)]
struct CannedTransport {
	calls: AtomicUsize,
}
impl ApiTransport for CannedTransport {
	type TransportError = Infallible;

	fn send(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		let call = self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			println!("-> {} {} (call {call})", request.method, request.url.path());

			if call == 0 {
				return Ok(ApiResponse {
					status: 429,
					reason: Some("Too Many Requests".into()),
					rate_limit: RateLimitInfo {
						remaining: Some(0),
						retry_after: Some(time::Duration::SECOND),
						..Default::default()
					},
					body: Vec::new(),
				});
			}

			Ok(ApiResponse {
				status: 200,
				reason: Some("OK".into()),
				rate_limit: RateLimitInfo { remaining: Some(59), ..Default::default() },
				body: br#"{"guild_id":"1","points":42,"rank":1,"user_id":"2"}"#.to_vec(),
			})
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = Client::<CannedTransport>::with_transport(
		"demo-api-key",
		Arc::new(CannedTransport::default()),
		ClientConfig::default(),
	);
	let started = Instant::now();
	let tasks = (0..3)
		.map(|caller| {
			let client = client.clone();

			tokio::spawn(async move {
				let points = client.get_member_points(&GuildId::from(1), &UserId::from(2)).await?;

				println!("caller {caller} saw {} points after {:?}", points.points, started.elapsed());

				Ok::<_, tatsu_api::error::Error>(())
			})
		})
		.collect::<Vec<_>>();

	for task in tasks {
		task.await??;
	}

	assert!(started.elapsed() >= Duration::from_secs(1));

	Ok(())
}
