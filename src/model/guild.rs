//! Guild member balances and rankings.

// self
use crate::{
	_prelude::*,
	model::{ActionType, GuildId, UserId},
};

/// Points balance of a guild member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMemberPoints {
	/// Guild the balance belongs to.
	pub guild_id: GuildId,
	/// Current points.
	pub points: i64,
	/// Rank of the member ordered by points.
	pub rank: u64,
	/// Member the balance belongs to.
	pub user_id: UserId,
}

/// Score balance of a guild member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMemberScore {
	/// Guild the score belongs to.
	pub guild_id: GuildId,
	/// Current score.
	pub score: i64,
	/// Member the score belongs to.
	pub user_id: UserId,
}

/// Ranking of a single guild member over some period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMemberRanking {
	/// Guild the ranking belongs to.
	pub guild_id: GuildId,
	/// Rank of the member.
	pub rank: u64,
	/// Score the rank is based on.
	pub score: i64,
	/// Ranked member.
	pub user_id: UserId,
}

/// One entry of a guild leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
	/// Rank of the member.
	pub rank: u64,
	/// Score the rank is based on.
	pub score: i64,
	/// Ranked member.
	pub user_id: UserId,
}

/// Guild leaderboard over some period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildRankings {
	/// Guild the leaderboard belongs to.
	pub guild_id: GuildId,
	/// Entries ordered by rank.
	#[serde(default)]
	pub rankings: Vec<Ranking>,
}

/// Body of a points or score modification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct BalanceChange {
	pub action: ActionType,
	pub amount: u32,
}
