//! In-process transport that replays scripted responses and records what it was sent.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
use tokio::time::Instant;
// self
use tatsu_api::{
	Client, ClientConfig,
	http::{ApiRequest, ApiResponse, ApiTransport, TransportFuture},
	rate_limit::RateLimitInfo,
};

pub const TOKEN: &str = "test-api-key";

#[derive(Debug)]
pub enum ScriptedError {
	ConnectionReset,
	Exhausted,
}
impl Display for ScriptedError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset by peer."),
			Self::Exhausted => write!(f, "No scripted response left."),
		}
	}
}
impl StdError for ScriptedError {}

#[derive(Clone, Debug)]
pub struct Recorded {
	pub at: Instant,
	pub request: ApiRequest,
}

#[derive(Clone, Default)]
pub struct ScriptedTransport {
	script: Arc<Mutex<VecDeque<Result<ApiResponse, ScriptedError>>>>,
	recorded: Arc<Mutex<Vec<Recorded>>>,
}
impl ScriptedTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&self, response: ApiResponse) -> &Self {
		self.script.lock().push_back(Ok(response));

		self
	}

	pub fn push_error(&self, error: ScriptedError) -> &Self {
		self.script.lock().push_back(Err(error));

		self
	}

	pub fn recorded(&self) -> Vec<Recorded> {
		self.recorded.lock().clone()
	}

	pub fn calls(&self) -> usize {
		self.recorded.lock().len()
	}
}
impl ApiTransport for ScriptedTransport {
	type TransportError = ScriptedError;

	fn send(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		self.recorded.lock().push(Recorded { at: Instant::now(), request });

		let next = self.script.lock().pop_front().unwrap_or(Err(ScriptedError::Exhausted));

		Box::pin(async move { next })
	}
}

pub fn client(transport: &ScriptedTransport, config: ClientConfig) -> Client<ScriptedTransport> {
	Client::with_transport(TOKEN, transport.clone(), config)
}

pub fn ok(body: &str) -> ApiResponse {
	ApiResponse {
		status: 200,
		reason: Some("OK".into()),
		rate_limit: RateLimitInfo { limit: Some(60), remaining: Some(59), ..Default::default() },
		body: body.as_bytes().to_vec(),
	}
}

pub fn exhausted(body: &str, retry_after_secs: i64) -> ApiResponse {
	ApiResponse {
		rate_limit: RateLimitInfo {
			limit: Some(60),
			remaining: Some(0),
			reset: None,
			retry_after: Some(time::Duration::seconds(retry_after_secs)),
		},
		..ok(body)
	}
}

pub fn too_many_requests(retry_after_secs: Option<i64>) -> ApiResponse {
	ApiResponse {
		status: 429,
		reason: Some("Too Many Requests".into()),
		rate_limit: RateLimitInfo {
			limit: Some(60),
			remaining: Some(0),
			reset: None,
			retry_after: retry_after_secs.map(time::Duration::seconds),
		},
		body: br#"{"code":429,"message":"You are being rate limited."}"#.to_vec(),
	}
}

pub fn status(status: u16, reason: &str, body: &str) -> ApiResponse {
	ApiResponse {
		status,
		reason: Some(reason.into()),
		rate_limit: RateLimitInfo::default(),
		body: body.as_bytes().to_vec(),
	}
}
