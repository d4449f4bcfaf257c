//! Tatsu user profiles.

// self
use crate::{
	_prelude::*,
	model::{SubscriptionType, UserId},
};

/// Tatsu profile of a Discord user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// Discord avatar hash.
	pub avatar_hash: String,
	/// Discord avatar URL.
	pub avatar_url: String,
	/// Credits balance.
	pub credits: i64,
	/// Legacy four digit discriminator.
	pub discriminator: String,
	/// Discord ID.
	pub id: UserId,
	/// Text of the profile info box.
	pub info_box: String,
	/// Reputation points.
	pub reputation: i64,
	/// Subscription tier.
	pub subscription_type: SubscriptionType,
	/// Renewal time of the subscription, if the user has one.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub subscription_renewal: Option<OffsetDateTime>,
	/// Profile title.
	pub title: String,
	/// Tokens balance.
	pub tokens: i64,
	/// Discord username.
	pub username: String,
	/// Experience points.
	pub xp: i64,
}
