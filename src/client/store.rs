// self
use crate::{
	_prelude::*,
	client::Client,
	http::{ApiTransport, Method},
	model::{ListingId, StoreListing},
	route::Route,
};

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches a single store listing.
	pub async fn get_store_listing(&self, listing: &ListingId) -> Result<StoreListing> {
		let route = Route::new(
			&self.config.base_url,
			Method::Get,
			"/store/listings/{listing_id}",
			&[("listing_id", listing.as_ref())],
		)?;

		self.request_json(&route).await
	}
}
