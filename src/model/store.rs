//! Tatsu store listings.

// self
use crate::{
	_prelude::*,
	model::{CurrencyType, ListingId},
};

/// Price of a store item in one currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorePrice {
	/// Currency of the price.
	pub currency: CurrencyType,
	/// Cost in that currency.
	pub amount: f64,
}

/// Listing of a Tatsu store item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreListing {
	/// Listing identifier.
	pub id: ListingId,
	/// Item name.
	pub name: String,
	/// Short summary.
	pub summary: String,
	/// Long description.
	pub description: String,
	/// Whether the item is new in the store.
	pub new: bool,
	/// URL of a preview image.
	#[serde(default)]
	pub preview: Option<String>,
	/// Prices, one per accepted currency.
	#[serde(default)]
	pub prices: Vec<StorePrice>,
	/// Store categories.
	#[serde(default)]
	pub categories: Vec<String>,
	/// Search tags.
	#[serde(default)]
	pub tags: Vec<String>,
}
