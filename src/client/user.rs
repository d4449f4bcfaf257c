// self
use crate::{
	_prelude::*,
	client::Client,
	http::{ApiTransport, Method},
	model::{User, UserId},
	route::Route,
};

impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Fetches the Tatsu profile of `user`.
	pub async fn get_user(&self, user: &UserId) -> Result<User> {
		let route = Route::new(
			&self.config.base_url,
			Method::Get,
			"/users/{user_id}/profile",
			&[("user_id", user.as_ref())],
		)?;

		self.request_json(&route).await
	}
}
