//! Transport primitives for Tatsu API calls.
//!
//! The module exposes [`ApiTransport`] alongside the [`ApiRequest`] and [`ApiResponse`]
//! envelopes so downstream crates can plug in their own HTTP clients. Implementations only
//! move bytes: they report the status, the reason phrase, and the parsed [`RateLimitInfo`],
//! while retries, lockouts, and error classification stay in the client.

// self
use crate::{_prelude::*, rate_limit::RateLimitInfo};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`ApiTransport::send`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing Tatsu API calls.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can be shared by every clone of a client,
/// and the futures they return must be `Send` so requests can hop executors.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves once the full response body is available.
	///
	/// Non-success statuses are *not* errors at this layer; only failures to obtain a
	/// response at all are.
	fn send(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// HTTP methods used by the Tatsu API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the method name as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully resolved outbound request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL without the query string.
	pub url: Url,
	/// Query parameters appended to `url`.
	pub query: Vec<(String, String)>,
	/// Request headers.
	pub headers: Vec<(String, String)>,
	/// JSON body, if any.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Returns the first header value named `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
	}
}

/// Response envelope produced by an [`ApiTransport`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// HTTP reason phrase, when known.
	pub reason: Option<String>,
	/// Rate-limit metadata parsed from the response headers.
	pub rate_limit: RateLimitInfo,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for `2xx` statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// API responses are returned directly; [`ReqwestTransport::new`] disables redirect
/// following so a misrouted call surfaces as an error instead of silently hitting another
/// host with the API key attached.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport backed by a fresh reqwest client that does not follow redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	type TransportError = ReqwestError;

	fn send(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client.request(reqwest_method(request.method), request.url);

			if !request.query.is_empty() {
				builder = builder.query(&request.query);
			}
			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.header(reqwest::header::CONTENT_TYPE, "application/json").body(body);
			}

			let response = builder.send().await?;
			let status = response.status();
			let rate_limit = RateLimitInfo::from_headers(
				response
					.headers()
					.iter()
					.filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?))),
			);
			let body = response.bytes().await?.to_vec();

			Ok::<_, ReqwestError>(ApiResponse {
				status: status.as_u16(),
				reason: status.canonical_reason().map(ToOwned::to_owned),
				rate_limit,
				body,
			})
		})
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: Method) -> reqwest::Method {
	match method {
		Method::Get => reqwest::Method::GET,
		Method::Post => reqwest::Method::POST,
		Method::Put => reqwest::Method::PUT,
		Method::Patch => reqwest::Method::PATCH,
		Method::Delete => reqwest::Method::DELETE,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_the_2xx_range() {
		let ok = ApiResponse { status: 204, ..Default::default() };
		let limited = ApiResponse { status: 429, ..Default::default() };

		assert!(ok.is_success());
		assert!(!limited.is_success());
	}

	#[test]
	fn request_header_lookup_ignores_case() {
		let request = ApiRequest {
			method: Method::Get,
			url: Url::parse("https://api.tatsu.gg/v1/users/1/profile")
				.expect("Fixture URL should parse."),
			query: Vec::new(),
			headers: vec![("Authorization".into(), "key".into())],
			body: None,
		};

		assert_eq!(request.header("authorization"), Some("key"));
		assert_eq!(request.header("user-agent"), None);
		assert_eq!(Method::Patch.to_string(), "PATCH");
	}
}
