//! Tatsu API client: configuration, the rate-limited request loop, and typed endpoints.
//!
//! Every endpoint helper funnels into [`Client::request`], which acquires the client's
//! [`LockoutGate`] before each attempt and imposes lockouts derived from the rate-limit
//! headers, so concurrent callers sharing one client never burst past the upstream budget.

mod guild;
mod request;
mod store;
mod user;

pub use guild::*;

// self
use crate::{_prelude::*, error::ConfigError, gate::LockoutGate, http::ApiTransport};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Default Tatsu API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.tatsu.gg/v1";

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestTransport>;

/// Settings shared by every request a [`Client`] sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// API root every route template is appended to.
	pub base_url: Url,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Attempts per logical request while the API keeps answering `429`.
	pub max_attempts: u32,
	/// Lockout applied after a `429` that carries no usable reset hint.
	pub fallback_backoff: StdDuration,
}
impl ClientConfig {
	const DEFAULT_FALLBACK_BACKOFF: StdDuration = StdDuration::from_secs(1);
	const DEFAULT_MAX_ATTEMPTS: u32 = 5;

	/// Overrides the API root.
	///
	/// The URL must use `http` or `https` and be able to carry a path.
	pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
		let raw = base_url.as_ref();
		let url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
			return Err(ConfigError::UnsupportedBaseUrl { url: raw.to_owned() });
		}

		self.base_url = url;

		Ok(self)
	}

	/// Overrides the `User-Agent` header.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Overrides the number of attempts per request (clamped to at least one).
	pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
		self.max_attempts = max_attempts.max(1);

		self
	}

	/// Overrides the lockout used when a `429` carries no reset hint.
	pub fn with_fallback_backoff(mut self, backoff: StdDuration) -> Self {
		self.fallback_backoff = backoff;

		self
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: Url::parse(DEFAULT_BASE_URL).expect("Default base URL must parse."),
			user_agent: format!(
				"{}/{} (+{})",
				env!("CARGO_PKG_NAME"),
				env!("CARGO_PKG_VERSION"),
				env!("CARGO_PKG_REPOSITORY")
			),
			max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
			fallback_backoff: Self::DEFAULT_FALLBACK_BACKOFF,
		}
	}
}

/// Async client for the Tatsu API.
///
/// Cloning is cheap: clones share the transport, the lockout gate, and the latest reset
/// timestamp, so rate limiting is coordinated across all of them.
pub struct Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<T>,
	config: ClientConfig,
	token: String,
	gate: LockoutGate,
	latest_reset: Arc<Mutex<Option<OffsetDateTime>>>,
}
impl<T> Client<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		token: impl Into<String>,
		transport: impl Into<Arc<T>>,
		config: ClientConfig,
	) -> Self {
		Self {
			transport: transport.into(),
			config,
			token: token.into(),
			gate: LockoutGate::new(),
			latest_reset: Default::default(),
		}
	}

	/// Gate every request passes through; callers may impose their own lockouts on it.
	pub fn gate(&self) -> &LockoutGate {
		&self.gate
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client for `token` backed by a fresh reqwest transport and default settings.
	pub fn new(token: impl Into<String>) -> Result<Self> {
		Ok(Self::with_transport(token, ReqwestTransport::new()?, ClientConfig::default()))
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			config: self.config.clone(),
			token: self.token.clone(),
			gate: self.gate.clone(),
			latest_reset: self.latest_reset.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("gate", &self.gate)
			.field("token_set", &!self.token.is_empty())
			.finish()
	}
}
