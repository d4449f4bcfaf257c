//! Route templates expanded against the configured API base URL.

// self
use crate::{_prelude::*, error::ConfigError, http::Method};

/// Fully expanded API call: method, URL, query string, and optional JSON body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
	/// HTTP method.
	pub method: Method,
	/// Template the URL was expanded from, e.g. `/users/{user_id}/profile`.
	pub template: &'static str,
	/// Absolute URL of the endpoint.
	pub url: Url,
	/// Query parameters.
	pub query: Vec<(String, String)>,
	/// Encoded JSON body.
	pub body: Option<Vec<u8>>,
}
impl Route {
	/// Expands `template` under `base`.
	///
	/// Every `{name}` path segment is replaced by the matching value from `params`,
	/// percent-encoded as a single segment. A placeholder without a value is an error.
	pub fn new(
		base: &Url,
		method: Method,
		template: &'static str,
		params: &[(&str, &str)],
	) -> Result<Self, ConfigError> {
		let mut segments = Vec::new();

		for segment in template.split('/').filter(|s| !s.is_empty()) {
			match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
				Some(name) => {
					let value = params
						.iter()
						.find_map(|(key, value)| (*key == name).then_some(*value))
						.ok_or_else(|| ConfigError::RouteTemplate {
							template,
							placeholder: name.to_owned(),
						})?;

					segments.push(value);
				},
				None => segments.push(segment),
			}
		}

		let mut url = base.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::UnsupportedBaseUrl { url: base.to_string() })?
			.pop_if_empty()
			.extend(segments);

		Ok(Self { method, template, url, query: Vec::new(), body: None })
	}

	/// Appends a query parameter.
	pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.query.push((key.into(), value.to_string()));

		self
	}

	/// Attaches `body` encoded as JSON.
	pub fn with_json_body<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body)?);

		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base() -> Url {
		Url::parse("https://api.tatsu.gg/v1").expect("Base fixture should parse.")
	}

	#[test]
	fn placeholders_expand_in_order() {
		let route = Route::new(
			&base(),
			Method::Get,
			"/guilds/{guild_id}/rankings/members/{user_id}/{time_range}",
			&[("guild_id", "1"), ("user_id", "2"), ("time_range", "week")],
		)
		.expect("Route should expand.");

		assert_eq!(route.url.as_str(), "https://api.tatsu.gg/v1/guilds/1/rankings/members/2/week");
		assert_eq!(route.template, "/guilds/{guild_id}/rankings/members/{user_id}/{time_range}");
	}

	#[test]
	fn values_are_encoded_as_single_segments() {
		let trailing = Url::parse("https://proxy.example.com/tatsu/v1/").expect("Base should parse.");
		let route = Route::new(
			&trailing,
			Method::Get,
			"/store/listings/{listing_id}",
			&[("listing_id", "chair/../admin?x")],
		)
		.expect("Route should expand.");

		assert_eq!(
			route.url.as_str(),
			"https://proxy.example.com/tatsu/v1/store/listings/chair%2F..%2Fadmin%3Fx"
		);
	}

	#[test]
	fn missing_placeholder_is_rejected() {
		let err = Route::new(&base(), Method::Get, "/users/{user_id}/profile", &[])
			.expect_err("Missing values must be rejected.");

		assert!(matches!(
			err,
			ConfigError::RouteTemplate { placeholder, .. } if placeholder == "user_id"
		));
	}

	#[test]
	fn query_and_body_are_attached() {
		let route = Route::new(&base(), Method::Patch, "/guilds/{guild_id}", &[("guild_id", "1")])
			.expect("Route should expand.")
			.with_query("offset", 100)
			.with_json_body(&serde_json::json!({ "amount": 5 }))
			.expect("Body should encode.");

		assert_eq!(route.query, [("offset".to_owned(), "100".to_owned())]);
		assert_eq!(route.body.as_deref(), Some(br#"{"amount":5}"#.as_slice()));
	}
}
