// self
use crate::{
	_prelude::*,
	client::Client,
	error::ArgumentError,
	http::{ApiTransport, Method},
	model::{
		ActionType, BalanceChange, GuildId, GuildMemberPoints, GuildMemberRanking,
		GuildMemberScore, GuildRankings, RankingPeriod, UserId,
	},
	route::Route,
};

/// Largest magnitude a single points or score modification may carry.
pub const MAX_BALANCE_CHANGE: u32 = 100_000;
/// Number of entries the API returns per guild rankings page.
pub const RANKINGS_PAGE_SIZE: u64 = 100;

const MEMBER_POINTS: &str = "/guilds/{guild_id}/members/{member_id}/points";
const MEMBER_SCORE: &str = "/guilds/{guild_id}/members/{member_id}/score";
const MEMBER_RANKING: &str = "/guilds/{guild_id}/rankings/members/{user_id}/{time_range}";
const GUILD_RANKINGS: &str = "/guilds/{guild_id}/rankings/{time_range}";

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches the points balance of `member` in `guild`.
	pub async fn get_member_points(
		&self,
		guild: &GuildId,
		member: &UserId,
	) -> Result<GuildMemberPoints> {
		let route = self.member_route(Method::Get, MEMBER_POINTS, guild, member)?;

		self.request_json(&route).await
	}

	/// Adds (positive `amount`) or removes (negative `amount`) points from `member`.
	///
	/// `amount` must be non-zero and at most [`MAX_BALANCE_CHANGE`] in magnitude; otherwise
	/// no request is sent.
	pub async fn update_member_points(
		&self,
		guild: &GuildId,
		member: &UserId,
		amount: i64,
	) -> Result<GuildMemberPoints> {
		let change = balance_change("points", amount)?;
		let route = self
			.member_route(Method::Patch, MEMBER_POINTS, guild, member)?
			.with_json_body(&change)?;

		self.request_json(&route).await
	}

	/// Adds or removes score from `member`, with the same limits as
	/// [`update_member_points`](Self::update_member_points).
	pub async fn update_member_score(
		&self,
		guild: &GuildId,
		member: &UserId,
		amount: i64,
	) -> Result<GuildMemberScore> {
		let change = balance_change("score", amount)?;
		let route = self
			.member_route(Method::Patch, MEMBER_SCORE, guild, member)?
			.with_json_body(&change)?;

		self.request_json(&route).await
	}

	/// Fetches the rank of `member` in `guild` over `period`.
	pub async fn get_member_ranking(
		&self,
		guild: &GuildId,
		member: &UserId,
		period: RankingPeriod,
	) -> Result<GuildMemberRanking> {
		let route = Route::new(
			&self.config.base_url,
			Method::Get,
			MEMBER_RANKING,
			&[
				("guild_id", guild.as_ref()),
				("user_id", member.as_ref()),
				("time_range", period.as_str()),
			],
		)?;

		self.request_json(&route).await
	}

	/// Fetches the leaderboard of `guild` over `period`, starting at rank `start`.
	///
	/// Without `end` a single page is returned as-is. With `end`, pages are fetched one after
	/// another and the result holds exactly the ranks in `start..=end` the API knows about.
	pub async fn get_guild_rankings(
		&self,
		guild: &GuildId,
		period: RankingPeriod,
		start: u64,
		end: Option<u64>,
	) -> Result<GuildRankings> {
		let offsets = ranking_offsets(start, end)?;
		let mut rankings = Vec::new();

		for offset in offsets {
			let route = Route::new(
				&self.config.base_url,
				Method::Get,
				GUILD_RANKINGS,
				&[("guild_id", guild.as_ref()), ("time_range", period.as_str())],
			)?
			.with_query("offset", offset);
			let page: GuildRankings = self.request_json(&route).await?;

			rankings.extend(page.rankings);
		}

		if let Some(end) = end {
			rankings.retain(|ranking| (start..=end).contains(&ranking.rank));
		}

		Ok(GuildRankings { guild_id: guild.clone(), rankings })
	}

	fn member_route(
		&self,
		method: Method,
		template: &'static str,
		guild: &GuildId,
		member: &UserId,
	) -> Result<Route> {
		Ok(Route::new(
			&self.config.base_url,
			method,
			template,
			&[("guild_id", guild.as_ref()), ("member_id", member.as_ref())],
		)?)
	}
}

fn balance_change(field: &'static str, amount: i64) -> Result<BalanceChange, ArgumentError> {
	let magnitude = u32::try_from(amount.unsigned_abs())
		.ok()
		.filter(|magnitude| (1..=MAX_BALANCE_CHANGE).contains(magnitude))
		.ok_or(ArgumentError::AmountOutOfRange { field, amount, max: MAX_BALANCE_CHANGE })?;
	let action = if amount > 0 { ActionType::Add } else { ActionType::Remove };

	Ok(BalanceChange { action, amount: magnitude })
}

fn ranking_offsets(
	start: u64,
	end: Option<u64>,
) -> Result<impl Iterator<Item = u64>, ArgumentError> {
	if start < 1 {
		return Err(ArgumentError::RankingStart { start });
	}

	let first = start - 1;
	// Exclusive bound on zero-based offsets; rank `end` sits at offset `end - 1`.
	let last = match end {
		Some(end) if end < 1 || end <= start => return Err(ArgumentError::RankingEnd { start, end }),
		Some(end) => end,
		// One page starting at `first`.
		None => first + 1,
	};

	Ok((first..last).step_by(RANKINGS_PAGE_SIZE as usize))
}
