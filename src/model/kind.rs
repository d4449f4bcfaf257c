//! Integer-coded enumerations used by request and response bodies.

// self
use crate::_prelude::*;

macro_rules! def_coded_enum {
	(
		$(#[$meta:meta])*
		$name:ident, $kind:literal {
			$($(#[$vmeta:meta])* $variant:ident = $code:literal,)+
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "u8", into = "u8")]
		pub enum $name {
			$($(#[$vmeta])* $variant = $code,)+
		}
		impl From<$name> for u8 {
			fn from(value: $name) -> Self {
				value as u8
			}
		}
		impl TryFrom<u8> for $name {
			type Error = UnknownCode;

			fn try_from(value: u8) -> Result<Self, Self::Error> {
				match value {
					$($code => Ok(Self::$variant),)+
					_ => Err(UnknownCode { kind: $kind, code: value }),
				}
			}
		}
	};
}

/// Integer that does not name any variant of the target enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown {kind} code {code}.")]
pub struct UnknownCode {
	/// Enum being decoded.
	pub kind: &'static str,
	/// Rejected integer.
	pub code: u8,
}

def_coded_enum! {
	/// Direction of a points or score modification.
	ActionType, "action" {
		/// Increase the balance.
		Add = 0,
		/// Decrease the balance.
		Remove = 1,
	}
}

def_coded_enum! {
	/// Tatsu subscription tier of a user.
	SubscriptionType, "subscription" {
		/// No subscription.
		None = 0,
		/// Supporter tier 1.
		Supporter1 = 1,
		/// Supporter tier 2.
		Supporter2 = 2,
		/// Supporter tier 3.
		Supporter3 = 3,
	}
}

def_coded_enum! {
	/// Currency a store price is expressed in.
	CurrencyType, "currency" {
		/// Tatsu credits.
		Credits = 0,
		/// Tatsu tokens.
		Tokens = 1,
		/// Emeralds.
		Emeralds = 2,
		/// Seasonal candy canes.
		CandyCane = 3,
		/// US dollars.
		Usd = 4,
		/// Seasonal candy corn.
		CandyCorn = 5,
	}
}

/// Time window a ranking is computed over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPeriod {
	/// All-time ranking.
	#[default]
	All,
	/// Last month.
	Month,
	/// Last week.
	Week,
}
impl RankingPeriod {
	/// Path segment used by the API.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Month => "month",
			Self::Week => "week",
		}
	}
}
impl Display for RankingPeriod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
