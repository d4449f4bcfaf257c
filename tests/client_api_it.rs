mod common;

// self
use common::*;
use tatsu_api::{
	ClientConfig,
	error::{ArgumentError, Error},
	http::Method,
	model::{CurrencyType, GuildId, ListingId, RankingPeriod, UserId},
};

const GUILD: u64 = 173184118492889089;
const MEMBER: u64 = 158646501696864256;

fn rankings_page(ranks: std::ops::RangeInclusive<u64>) -> String {
	let rankings = ranks
		.map(|rank| {
			serde_json::json!({ "rank": rank, "score": 10_000 - rank as i64, "user_id": rank.to_string() })
		})
		.collect::<Vec<_>>();

	serde_json::json!({ "guild_id": GUILD.to_string(), "rankings": rankings }).to_string()
}

#[tokio::test(start_paused = true)]
async fn guild_rankings_page_and_filter_the_window() {
	let transport = ScriptedTransport::new();

	transport.push(ok(&rankings_page(150..=249))).push(ok(&rankings_page(250..=349)));

	let client = client(&transport, ClientConfig::default());
	let rankings = client
		.get_guild_rankings(&GuildId::from(GUILD), RankingPeriod::Week, 150, Some(260))
		.await
		.expect("Rankings window should load.");
	let calls = transport.recorded();

	assert_eq!(rankings.guild_id, GuildId::from(GUILD));
	assert_eq!(rankings.rankings.len(), 111);
	assert_eq!(rankings.rankings.first().map(|r| r.rank), Some(150));
	assert_eq!(rankings.rankings.last().map(|r| r.rank), Some(260));
	assert_eq!(calls.len(), 2);
	assert_eq!(
		calls[0].request.url.as_str(),
		"https://api.tatsu.gg/v1/guilds/173184118492889089/rankings/week"
	);
	assert_eq!(calls[0].request.query, [("offset".to_owned(), "149".to_owned())]);
	assert_eq!(calls[1].request.query, [("offset".to_owned(), "249".to_owned())]);
}

#[tokio::test(start_paused = true)]
async fn guild_rankings_fetch_the_page_holding_the_last_rank() {
	let transport = ScriptedTransport::new();

	transport.push(ok(&rankings_page(1..=100))).push(ok(&rankings_page(101..=200)));

	let client = client(&transport, ClientConfig::default());
	let rankings = client
		.get_guild_rankings(&GuildId::from(GUILD), RankingPeriod::All, 1, Some(101))
		.await
		.expect("Rankings window should load.");
	let calls = transport.recorded();

	assert_eq!(calls.len(), 2);
	assert_eq!(calls[1].request.query, [("offset".to_owned(), "100".to_owned())]);
	assert_eq!(rankings.rankings.len(), 101);
	assert_eq!(rankings.rankings.last().map(|r| r.rank), Some(101));
}

#[tokio::test(start_paused = true)]
async fn guild_rankings_without_end_fetch_one_page() {
	let transport = ScriptedTransport::new();

	transport.push(ok(&rankings_page(1..=100)));

	let client = client(&transport, ClientConfig::default());
	let rankings = client
		.get_guild_rankings(&GuildId::from(GUILD), RankingPeriod::default(), 1, None)
		.await
		.expect("First page should load.");

	assert_eq!(rankings.rankings.len(), 100);
	assert_eq!(transport.recorded()[0].request.query, [("offset".to_owned(), "0".to_owned())]);
}

#[tokio::test(start_paused = true)]
async fn invalid_arguments_send_nothing() {
	let transport = ScriptedTransport::new();
	let client = client(&transport, ClientConfig::default());
	let guild = GuildId::from(GUILD);
	let member = UserId::from(MEMBER);
	let err = client
		.update_member_points(&guild, &member, 0)
		.await
		.expect_err("Zero amounts must be rejected.");

	assert!(matches!(
		err,
		Error::InvalidArgument(ArgumentError::AmountOutOfRange { field: "points", amount: 0, .. })
	));

	let err = client
		.update_member_score(&guild, &member, -100_001)
		.await
		.expect_err("Oversized amounts must be rejected.");

	assert!(matches!(
		err,
		Error::InvalidArgument(ArgumentError::AmountOutOfRange { field: "score", .. })
	));

	let err = client
		.get_guild_rankings(&guild, RankingPeriod::All, 10, Some(3))
		.await
		.expect_err("Inverted windows must be rejected.");

	assert!(matches!(err, Error::InvalidArgument(ArgumentError::RankingEnd { start: 10, end: 3 })));
	assert_eq!(transport.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn balance_updates_patch_with_action_and_magnitude() {
	let transport = ScriptedTransport::new();

	transport
		.push(ok(&format!(
			r#"{{"guild_id":"{GUILD}","points":750,"rank":4,"user_id":"{MEMBER}"}}"#
		)))
		.push(ok(&format!(r#"{{"guild_id":"{GUILD}","score":20,"user_id":"{MEMBER}"}}"#)));

	let client = client(&transport, ClientConfig::default());
	let guild = GuildId::from(GUILD);
	let member = UserId::from(MEMBER);
	let points = client
		.update_member_points(&guild, &member, -250)
		.await
		.expect("Points update should succeed.");
	let score =
		client.update_member_score(&guild, &member, 20).await.expect("Score update should succeed.");
	let calls = transport.recorded();

	assert_eq!(points.points, 750);
	assert_eq!(points.rank, 4);
	assert_eq!(score.score, 20);
	assert_eq!(calls[0].request.method, Method::Patch);
	assert_eq!(
		calls[0].request.url.as_str(),
		format!("https://api.tatsu.gg/v1/guilds/{GUILD}/members/{MEMBER}/points")
	);
	assert_eq!(calls[0].request.body.as_deref(), Some(br#"{"action":1,"amount":250}"#.as_slice()));
	assert_eq!(calls[1].request.body.as_deref(), Some(br#"{"action":0,"amount":20}"#.as_slice()));
	assert!(calls[1].request.url.path().ends_with("/score"));
}

#[tokio::test(start_paused = true)]
async fn member_lookups_hit_their_routes() {
	let transport = ScriptedTransport::new();

	transport
		.push(ok(&format!(
			r#"{{"guild_id":"{GUILD}","points":10,"rank":1,"user_id":"{MEMBER}"}}"#
		)))
		.push(ok(&format!(
			r#"{{"guild_id":"{GUILD}","rank":7,"score":321,"user_id":"{MEMBER}"}}"#
		)));

	let client = client(&transport, ClientConfig::default());
	let guild = GuildId::from(GUILD);
	let member = UserId::from(MEMBER);

	client.get_member_points(&guild, &member).await.expect("Points should load.");

	let ranking = client
		.get_member_ranking(&guild, &member, RankingPeriod::Month)
		.await
		.expect("Ranking should load.");
	let calls = transport.recorded();

	assert_eq!(ranking.rank, 7);
	assert_eq!(calls[0].request.method, Method::Get);
	assert!(calls[0].request.body.is_none());
	assert_eq!(
		calls[1].request.url.path(),
		format!("/v1/guilds/{GUILD}/rankings/members/{MEMBER}/month")
	);
}

#[tokio::test(start_paused = true)]
async fn store_listing_defaults_optional_fields() {
	let transport = ScriptedTransport::new();

	transport.push(ok(r#"{
		"id": "furni_1x1_antique_chair",
		"name": "Antique Chair",
		"summary": "A chair.",
		"description": "A very old chair.",
		"new": false,
		"prices": [{ "currency": 0, "amount": 1500.0 }]
	}"#));

	let client = client(&transport, ClientConfig::default());
	let listing = client
		.get_store_listing(
			&ListingId::new("furni_1x1_antique_chair").expect("Listing fixture should be valid."),
		)
		.await
		.expect("Listing should load.");

	assert_eq!(listing.preview, None);
	assert!(listing.categories.is_empty() && listing.tags.is_empty());
	assert_eq!(listing.prices[0].currency, CurrencyType::Credits);
	assert_eq!(
		transport.recorded()[0].request.url.path(),
		"/v1/store/listings/furni_1x1_antique_chair"
	);
}

#[tokio::test(start_paused = true)]
async fn mismatched_bodies_surface_decode_errors() {
	let transport = ScriptedTransport::new();

	transport.push(ok(r#"{"id":"1","username":42}"#));

	let client = client(&transport, ClientConfig::default());
	let err = client
		.get_user(&UserId::from(MEMBER))
		.await
		.expect_err("A malformed profile must not decode.");
	let Error::Decode(decode) = err else {
		panic!("Expected a decode error, got {err:?}.");
	};

	assert_eq!(decode.route, "/users/{user_id}/profile");
	assert!(!decode.source.path().to_string().is_empty());
}

#[tokio::test(start_paused = true)]
async fn caller_lockouts_hold_back_api_calls() {
	let transport = ScriptedTransport::new();

	transport.push(ok(&format!(
		r#"{{"guild_id":"{GUILD}","points":10,"rank":1,"user_id":"{MEMBER}"}}"#
	)));

	let client = client(&transport, ClientConfig::default());
	let started = tokio::time::Instant::now();

	client.gate().lockout_for(std::time::Duration::from_secs(5));
	client
		.get_member_points(&GuildId::from(GUILD), &UserId::from(MEMBER))
		.await
		.expect("Points should load after the lockout.");

	assert!(transport.recorded()[0].at - started >= std::time::Duration::from_secs(5));
}
