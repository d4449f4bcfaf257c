//! Client-level error types shared across requests, routes, and models.

// self
use crate::{_prelude::*, model::IdentifierError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The API answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A success response could not be decoded into the expected model.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A call argument was rejected before any request was sent.
	#[error(transparent)]
	InvalidArgument(#[from] ArgumentError),
	/// An identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),
}
impl Error {
	/// Returns the API error, if this is one.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(e) => Some(e),
			_ => None,
		}
	}

	/// HTTP status behind the error, when the API produced it.
	pub fn status(&self) -> Option<u16> {
		self.as_api().map(|e| e.status)
	}
}

/// Category of a non-success API response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
	/// `400`: the request was malformed.
	BadRequest,
	/// `403`: the API key may not access the resource.
	Forbidden,
	/// `404`: the resource does not exist.
	NotFound,
	/// `429`: the rate limit stayed exhausted for every attempt.
	RateLimited,
	/// `5xx`: the API failed on its side.
	Server,
	/// Any other non-success status.
	Other,
}
impl ApiErrorKind {
	/// Classifies an HTTP status code.
	pub const fn from_status(status: u16) -> Self {
		match status {
			400 => Self::BadRequest,
			403 => Self::Forbidden,
			404 => Self::NotFound,
			429 => Self::RateLimited,
			500.. => Self::Server,
			_ => Self::Other,
		}
	}

	/// Returns a stable label suitable for logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::BadRequest => "bad_request",
			Self::Forbidden => "forbidden",
			Self::NotFound => "not_found",
			Self::RateLimited => "rate_limited",
			Self::Server => "server",
			Self::Other => "other",
		}
	}
}
impl Display for ApiErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Non-success response returned by the Tatsu API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{status} {reason} (error code: {code}){}", message_suffix(.message))]
pub struct ApiError {
	/// Category derived from the status code.
	pub kind: ApiErrorKind,
	/// HTTP status code.
	pub status: u16,
	/// HTTP reason phrase.
	pub reason: String,
	/// Tatsu-specific error code, `0` when absent.
	pub code: i64,
	/// Tatsu-specific error text, empty when absent.
	pub message: String,
}
impl ApiError {
	/// Builds an error from a response status, reason phrase, and raw body.
	///
	/// A JSON object body supplies `code` and `message`; a JSON string or any other text
	/// becomes the message as-is.
	pub fn from_response(status: u16, reason: Option<&str>, body: &[u8]) -> Self {
		let (code, message) = match serde_json::from_slice::<serde_json::Value>(body) {
			Ok(serde_json::Value::Object(map)) => (
				map.get("code").and_then(serde_json::Value::as_i64).unwrap_or(0),
				map.get("message").and_then(serde_json::Value::as_str).unwrap_or_default().to_owned(),
			),
			Ok(serde_json::Value::String(text)) => (0, text),
			_ => (0, String::from_utf8_lossy(body).trim().to_owned()),
		};

		Self {
			kind: ApiErrorKind::from_status(status),
			status,
			reason: reason.unwrap_or("Unknown").to_owned(),
			code,
			message,
		}
	}
}

fn message_suffix(message: &str) -> String {
	if message.is_empty() { String::new() } else { format!(": {message}") }
}

/// Response body that did not match the expected model.
#[derive(Debug, ThisError)]
#[error("Response from `{route}` could not be decoded.")]
pub struct DecodeError {
	/// Route template the response came from.
	pub route: &'static str,
	/// Structured parsing failure naming the offending field path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL parsed but cannot carry API paths.
	#[error("Base URL `{url}` must be an http(s) URL that can carry a path.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Route template references a parameter that was not supplied.
	#[error("Route `{template}` is missing a value for `{placeholder}`.")]
	RouteTemplate {
		/// Route template being expanded.
		template: &'static str,
		/// Placeholder without a value.
		placeholder: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be encoded.")]
	BodyEncode(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Arguments rejected before contacting the API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ArgumentError {
	/// Points or score change is zero or exceeds the per-call maximum.
	#[error(
		"The {field} amount to add or remove cannot be 0 and cannot be more than {max} in either direction, got {amount}."
	)]
	AmountOutOfRange {
		/// Which balance the call modifies (`points` or `score`).
		field: &'static str,
		/// Rejected amount.
		amount: i64,
		/// Largest permitted magnitude.
		max: u32,
	},
	/// First requested rank is below 1.
	#[error("Start rank must be greater than or equal to 1, got {start}.")]
	RankingStart {
		/// Rejected start rank.
		start: u64,
	},
	/// Last requested rank is below 1 or not after the first.
	#[error("End rank must be at least 1 and greater than start {start}, got {end}.")]
	RankingEnd {
		/// Start rank of the window.
		start: u64,
		/// Rejected end rank.
		end: u64,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Tatsu API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Tatsu API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
