//! Client-level error types shared across transports, signing, and resource operations.

// self
use crate::{_prelude::*, http::ApiResponse};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The signing endpoint could not produce a user signature.
	#[error(transparent)]
	Sign(#[from] crate::sign::SignError),
	/// A caller-supplied identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
	/// A list query failed local validation.
	#[error(transparent)]
	Query(#[from] crate::model::QueryError),

	/// The service answered with a non-2xx status.
	#[error("ProgressDB responded with HTTP {status}: {body}.")]
	Api {
		/// Non-2xx HTTP status code.
		status: u16,
		/// Parsed JSON or raw text body.
		body: ApiErrorBody,
	},
	/// A success response could not be decoded into the expected shape.
	#[error("Response body (HTTP {status}) could not be decoded.")]
	Decode {
		/// Structured parsing failure including the failing field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// The request body could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	Encode(#[source] serde_json::Error),
	/// The service returned no content where a body was required.
	#[error("ProgressDB returned an empty response (HTTP {status}) where a body was expected.")]
	UnexpectedEmpty {
		/// HTTP status code of the response.
		status: u16,
	},
}
impl Error {
	/// Returns the HTTP status associated with the failure, when one was observed.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. }
			| Self::Decode { status, .. }
			| Self::UnexpectedEmpty { status } => Some(*status),
			Self::Sign(err) => err.status(),
			_ => None,
		}
	}
}

/// Body attached to an HTTP error response.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiErrorBody {
	/// JSON payload, typically `{"error": "...", "message": "..."}`.
	Json(Value),
	/// Non-JSON payload returned verbatim.
	Text(String),
	/// The response carried no body.
	Empty,
}
impl ApiErrorBody {
	/// Captures the body of an error response, honoring its content type.
	pub fn from_response(response: &ApiResponse) -> Self {
		if response.body.is_empty() {
			return Self::Empty;
		}

		let parsed = response
			.is_json()
			.then(|| serde_json::from_slice::<Value>(&response.body).ok())
			.flatten();

		match parsed {
			Some(value) => Self::Json(value),
			None => Self::Text(response.text()),
		}
	}

	/// Human-readable summary, preferring the service's `error`/`message` fields.
	pub fn message(&self) -> String {
		match self {
			Self::Json(value) => {
				let error = value.get("error").and_then(Value::as_str);
				let message = value.get("message").and_then(Value::as_str);

				match (error, message) {
					(Some(error), Some(message)) => format!("{error}: {message}"),
					(Some(error), None) => error.to_owned(),
					(None, Some(message)) => message.to_owned(),
					(None, None) => value.to_string(),
				}
			},
			Self::Text(text) => text.clone(),
			Self::Empty => "<empty body>".into(),
		}
	}
}
impl Display for ApiErrorBody {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.message())
	}
}

/// Configuration and validation failures raised while building a client.
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
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value supplied by the caller.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than HTTP(S).
	#[error("Base URL `{url}` must use http or https.")]
	UnsupportedScheme {
		/// Offending URL.
		url: String,
	},
	/// Backend mode authenticates with a bearer key, so one must be configured.
	#[error("The {mode} mode requires an API key.")]
	MissingApiKey {
		/// Mode label.
		mode: &'static str,
	},
	/// Unknown authentication mode label.
	#[error("Unknown client mode `{value}`; expected `frontend` or `backend`.")]
	UnknownMode {
		/// Raw value supplied by the caller.
		value: String,
	},
	/// Request timeout must be positive.
	#[error("Request timeout must be positive.")]
	NonPositiveTimeout,
	/// Signature TTL must be positive.
	#[error("Signature cache TTL must be positive.")]
	NonPositiveSignatureTtl,
	/// Configured endpoint path is not absolute.
	#[error("The {name} path `{path}` must start with `/`.")]
	InvalidPath {
		/// Which path failed validation.
		name: &'static str,
		/// Offending value.
		path: String,
	},
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

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling ProgressDB.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete within the configured timeout.
	#[error("Request to ProgressDB timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling ProgressDB.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}
