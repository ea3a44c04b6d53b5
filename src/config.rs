//! Client configuration: where the service lives, how to authenticate, and request bounds.
//!
//! Build a [`ClientConfig`] through [`ClientConfig::builder`]; validation happens once in
//! [`ClientConfigBuilder::build`] so a constructed client never carries an unusable setup.

/// Builder API for assembling client configuration.
pub mod builder;
/// Endpoint path scheme of the target deployment.
pub mod paths;

pub use builder::*;
pub use paths::*;

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, AuthMode, UserId, UserSignature},
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::seconds(10);

/// Immutable, validated client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Service base URL; paths are appended to it.
	pub base_url: Url,
	/// Frontend API key or backend bearer key.
	pub api_key: Option<ApiKey>,
	/// Authentication scheme.
	pub mode: AuthMode,
	/// User applied when a call does not name one.
	pub default_user_id: Option<UserId>,
	/// Signature applied when a call does not supply one and none is minted.
	pub default_user_signature: Option<UserSignature>,
	/// Upper bound on each HTTP exchange.
	pub timeout: Duration,
	/// Lifetime of cached user signatures.
	pub signature_ttl: Duration,
	/// Whether backend-mode requests for a user obtain a signature automatically.
	pub auto_sign: bool,
	/// Endpoint path scheme.
	pub paths: ApiPaths,
}
impl ClientConfig {
	/// Creates a builder seeded with defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::new()
	}

	/// Shorthand for a frontend configuration.
	pub fn frontend(
		base_url: impl Into<String>,
		api_key: impl Into<ApiKey>,
	) -> Result<Self, crate::error::ConfigError> {
		Self::builder().base_url(base_url).api_key(api_key).mode(AuthMode::Frontend).build()
	}

	/// Shorthand for a backend configuration.
	pub fn backend(
		base_url: impl Into<String>,
		api_key: impl Into<ApiKey>,
	) -> Result<Self, crate::error::ConfigError> {
		Self::builder().base_url(base_url).api_key(api_key).mode(AuthMode::Backend).build()
	}
}
