//! Transport primitives for ProgressDB requests.
//!
//! The module exposes [`ApiHttpClient`] alongside the transport-neutral [`ApiRequest`] and
//! [`ApiResponse`] shapes so downstream crates can plug in their own HTTP stack. The client
//! assembles every header, path, and body itself; transports only move bytes and report the
//! status, content type, and body of whatever came back.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::CONTENT_TYPE;
// self
use crate::{_prelude::*, auth::headers, error::TransportError};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing ProgressDB requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back several
/// clients, and the futures they return must be `Send` so client operations can hop executors.
/// Non-2xx statuses are not transport failures: return them as an [`ApiResponse`] and let the
/// client classify them.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves to the raw response.
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse>;
}

/// HTTP verbs used by the ProgressDB API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}

	/// Whether the client ever attaches a body for this method.
	pub const fn allows_body(self) -> bool {
		matches!(self, HttpMethod::Post | HttpMethod::Put)
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered header collection with case-insensitive lookup.
///
/// Credential-bearing headers are redacted from the [`Debug`] output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderSet(Vec<(&'static str, String)>);
impl HeaderSet {
	/// Creates an empty header set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a header, keeping the original position on replacement.
	pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(name)) {
			Some(slot) => slot.1 = value,
			None => self.0.push((name, value)),
		}
	}

	/// Returns the value of `name`, if present.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(existing, _)| existing.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Returns `true` if `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Iterates headers in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.0.iter().map(|(name, value)| (*name, value.as_str()))
	}

	/// Number of headers in the set.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no headers are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for HeaderSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut map = f.debug_map();

		for (name, value) in &self.0 {
			if headers::is_sensitive(name) {
				map.entry(name, &"<redacted>");
			} else {
				map.entry(name, value);
			}
		}

		map.finish()
	}
}

/// Fully assembled request handed to an [`ApiHttpClient`].
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute URL including any query string.
	pub url: Url,
	/// Headers to send, in order.
	pub headers: HeaderSet,
	/// Serialized JSON body, if any.
	pub body: Option<Vec<u8>>,
}

/// Raw response surfaced by an [`ApiHttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// `Content-Type` header value, if present.
	pub content_type: Option<String>,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` for `204 No Content`.
	pub fn is_no_content(&self) -> bool {
		self.status == 204
	}

	/// Returns `true` when the content type announces JSON.
	pub fn is_json(&self) -> bool {
		self.content_type
			.as_deref()
			.is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
	}

	/// Lossy UTF-8 view of the body.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Converts the response into a content-type aware payload.
	pub fn into_payload(self) -> ApiPayload {
		if self.is_no_content() {
			return ApiPayload::Empty;
		}

		let parsed =
			self.is_json().then(|| serde_json::from_slice::<Value>(&self.body).ok()).flatten();

		match parsed {
			Some(value) => ApiPayload::Json(value),
			None => ApiPayload::Text(self.text()),
		}
	}
}

/// Untyped success payload returned by [`Client::request_raw`](crate::client::Client::request_raw).
#[derive(Clone, Debug, PartialEq)]
pub enum ApiPayload {
	/// JSON body.
	Json(Value),
	/// Any other body, as text.
	Text(String),
	/// `204 No Content`.
	Empty,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapped client carries the request timeout; build it through
/// [`ReqwestHttpClient::with_timeout`] or configure a custom client yourself.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests fail once `timeout` elapses.
	pub fn with_timeout(timeout: Duration) -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().timeout(timeout.unsigned_abs()).build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				HttpMethod::Get => reqwest::Method::GET,
				HttpMethod::Post => reqwest::Method::POST,
				HttpMethod::Put => reqwest::Method::PUT,
				HttpMethod::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in request.headers.iter() {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let content_type = response
				.headers()
				.get(CONTENT_TYPE)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned);
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, content_type, body })
		})
	}
}
