//! Fetches a Tatsu profile through the default reqwest transport against a local mock server
//! that reports an exhausted rate-limit window, then shows the gate holding the next caller.

// std
use std::time::Instant;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use tatsu_api::{Client, ClientConfig, http::ReqwestTransport, model::UserId};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/users/158646501696864256/profile");
			then.status(200)
				.header("content-type", "application/json")
				.header("X-RateLimit-Limit", "60")
				.header("X-RateLimit-Remaining", "0")
				.header("Retry-After", "1")
				.body(
					r#"{"avatar_hash":"","avatar_url":"","credits":1200,"discriminator":"0001","id":"158646501696864256","info_box":"","reputation":3,"subscription_type":0,"title":"","tokens":4,"username":"thanos","xp":98000}"#,
				);
		})
		.await;
	let config = ClientConfig::default().with_base_url(server.url("/v1"))?;
	let client = Client::with_transport("demo-api-key", ReqwestTransport::new()?, config);
	let user_id = UserId::from(158646501696864256);
	let user = client.get_user(&user_id).await?;

	println!("{} has {} xp and {} credits.", user.username, user.xp, user.credits);
	println!("Gate locked after exhausting the window: {}.", client.gate().is_locked());

	let started = Instant::now();
	let user = client.get_user(&user_id).await?;

	println!("Fetched {} again after waiting {:?}.", user.username, started.elapsed());

	profile_mock.assert_calls_async(2).await;

	Ok(())
}
