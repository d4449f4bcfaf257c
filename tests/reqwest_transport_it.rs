#![cfg(feature = "reqwest")]

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use tatsu_api::{
	Client, ClientConfig,
	error::ApiErrorKind,
	http::{ApiRequest, ApiTransport, Method, ReqwestTransport},
	model::{GuildId, RankingPeriod, SubscriptionType, UserId},
	url::Url,
};

const TOKEN: &str = "reqwest-api-key";
const PROFILE: &str = r#"{
	"avatar_hash": "a_1f2e",
	"avatar_url": "https://cdn.discordapp.com/avatars/158646501696864256/a_1f2e.webp",
	"credits": 1200,
	"discriminator": "0001",
	"id": "158646501696864256",
	"info_box": "hello",
	"reputation": 3,
	"subscription_type": 1,
	"title": "",
	"tokens": 4,
	"username": "thanos",
	"xp": 98000
}"#;

fn build_client(server: &MockServer, config: ClientConfig) -> Client<ReqwestTransport> {
	let config = config
		.with_base_url(server.url("/v1"))
		.expect("Mock server URL should be a valid base URL.");
	let transport = ReqwestTransport::new().expect("Reqwest transport should build.");

	Client::with_transport(TOKEN, transport, config)
}

#[tokio::test]
async fn profile_round_trips_through_reqwest() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/users/158646501696864256/profile")
				.header("authorization", TOKEN)
				.header_exists("user-agent");
			then.status(200)
				.header("content-type", "application/json")
				.header("X-RateLimit-Limit", "60")
				.header("X-RateLimit-Remaining", "59")
				.body(PROFILE);
		})
		.await;
	let client = build_client(&server, ClientConfig::default());
	let user = client
		.get_user(&UserId::from(158646501696864256))
		.await
		.expect("Profile request should succeed.");

	mock.assert_async().await;

	assert_eq!(user.username, "thanos");
	assert_eq!(user.subscription_type, SubscriptionType::Supporter1);
	assert_eq!(user.subscription_renewal, None);
	assert!(!client.gate().is_locked());
}

#[tokio::test]
async fn transport_reports_status_and_rate_limit_headers() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/guilds/1/rankings/all").query_param("offset", "0");
			then.status(404)
				.header("X-RateLimit-Limit", "60")
				.header("X-RateLimit-Remaining", "12")
				.header("X-RateLimit-Reset", "1700000000.5")
				.body(r#"{"code":10004,"message":"Unknown guild"}"#);
		})
		.await;
	let transport = ReqwestTransport::new().expect("Reqwest transport should build.");
	let response = transport
		.send(ApiRequest {
			method: Method::Get,
			url: Url::parse(&server.url("/v1/guilds/1/rankings/all"))
				.expect("Mock URL should parse."),
			query: vec![("offset".into(), "0".into())],
			headers: Vec::new(),
			body: None,
		})
		.await
		.expect("Non-success statuses are still responses.");

	mock.assert_async().await;

	assert_eq!(response.status, 404);
	assert_eq!(response.reason.as_deref(), Some("Not Found"));
	assert_eq!(response.rate_limit.limit, Some(60));
	assert_eq!(response.rate_limit.remaining, Some(12));
	assert_eq!(
		response.rate_limit.reset.map(|reset| reset.unix_timestamp_nanos()),
		Some(1_700_000_000_500_000_000)
	);

	let client = build_client(&server, ClientConfig::default());
	let err = client
		.get_guild_rankings(&GuildId::from(1), RankingPeriod::All, 1, None)
		.await
		.expect_err("Unknown guilds must be an error.");
	let api = err.as_api().expect("404 should map to an API error.");

	assert_eq!(api.kind, ApiErrorKind::NotFound);
	assert_eq!(api.code, 10004);
	assert_eq!(err.to_string(), "404 Not Found (error code: 10004): Unknown guild");
}

#[tokio::test]
async fn persistent_rate_limit_gives_up_after_max_attempts() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(PATCH)
				.path("/v1/guilds/1/members/2/points")
				.header("content-type", "application/json")
				.json_body(serde_json::json!({ "action": 0, "amount": 5 }));
			then.status(429).header("X-RateLimit-Remaining", "0").body("Too many requests");
		})
		.await;
	let client = build_client(
		&server,
		ClientConfig::default()
			.with_max_attempts(2)
			.with_fallback_backoff(Duration::from_millis(20)),
	);
	let err = client
		.update_member_points(&GuildId::from(1), &UserId::from(2), 5)
		.await
		.expect_err("Rate limiting on every attempt must fail.");

	mock.assert_calls_async(2).await;

	assert_eq!(err.as_api().map(|e| e.kind), Some(ApiErrorKind::RateLimited));
	assert_eq!(err.as_api().map(|e| e.message.as_str()), Some("Too many requests"));
}
