// self
use crate::{
	_prelude::*,
	auth::{ApiKey, AuthMode, UserId, UserSignature},
	cache::DEFAULT_SIGNATURE_TTL,
	config::{ApiPaths, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
	error::ConfigError,
};

/// Builder for [`ClientConfig`] values.
///
/// Deserializable so settings can be loaded from a file; omitted fields keep their defaults and
/// durations are read as integer milliseconds (`timeout_ms`, `signature_ttl_ms`).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClientConfigBuilder {
	/// Raw base URL; parsed during [`build`](Self::build).
	pub base_url: String,
	/// Frontend API key or backend bearer key.
	pub api_key: Option<ApiKey>,
	/// Authentication scheme.
	pub mode: AuthMode,
	/// Fallback user.
	pub default_user_id: Option<UserId>,
	/// Fallback signature.
	pub default_user_signature: Option<UserSignature>,
	/// Request timeout.
	#[serde(rename = "timeout_ms", deserialize_with = "millis::deserialize")]
	pub timeout: Duration,
	/// Signature cache TTL.
	#[serde(rename = "signature_ttl_ms", deserialize_with = "millis::deserialize")]
	pub signature_ttl: Duration,
	/// Automatic backend signing toggle.
	pub auto_sign: bool,
	/// Endpoint path scheme.
	pub paths: ApiPaths,
}
impl ClientConfigBuilder {
	/// Creates a builder seeded with defaults.
	pub fn new() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.into(),
			api_key: None,
			mode: AuthMode::default(),
			default_user_id: None,
			default_user_signature: None,
			timeout: DEFAULT_TIMEOUT,
			signature_ttl: DEFAULT_SIGNATURE_TTL,
			auto_sign: true,
			paths: ApiPaths::default(),
		}
	}

	/// Sets the service base URL.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Sets the API key.
	pub fn api_key(mut self, key: impl Into<ApiKey>) -> Self {
		self.api_key = Some(key.into());

		self
	}

	/// Sets the authentication mode.
	pub fn mode(mut self, mode: AuthMode) -> Self {
		self.mode = mode;

		self
	}

	/// Sets the fallback user.
	pub fn default_user_id(mut self, user: UserId) -> Self {
		self.default_user_id = Some(user);

		self
	}

	/// Sets the fallback signature.
	pub fn default_user_signature(mut self, signature: impl Into<UserSignature>) -> Self {
		self.default_user_signature = Some(signature.into());

		self
	}

	/// Overrides the request timeout (defaults to 10 seconds).
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the signature cache TTL (defaults to 5 minutes).
	pub fn signature_ttl(mut self, ttl: Duration) -> Self {
		self.signature_ttl = ttl;

		self
	}

	/// Enables or disables automatic backend signing.
	pub fn auto_sign(mut self, enabled: bool) -> Self {
		self.auto_sign = enabled;

		self
	}

	/// Overrides the endpoint path scheme.
	pub fn paths(mut self, paths: ApiPaths) -> Self {
		self.paths = paths;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let raw = self.base_url.trim().trim_end_matches('/');
		let base_url = Url::parse(raw)
			.map_err(|source| ConfigError::InvalidBaseUrl { url: raw.to_owned(), source })?;

		if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
			return Err(ConfigError::UnsupportedScheme { url: base_url.to_string() });
		}
		if self.mode == AuthMode::Backend && self.api_key.is_none() {
			return Err(ConfigError::MissingApiKey { mode: self.mode.as_str() });
		}
		if !self.timeout.is_positive() {
			return Err(ConfigError::NonPositiveTimeout);
		}
		if !self.signature_ttl.is_positive() {
			return Err(ConfigError::NonPositiveSignatureTtl);
		}

		self.paths.validate()?;

		Ok(ClientConfig {
			base_url,
			api_key: self.api_key,
			mode: self.mode,
			default_user_id: self.default_user_id,
			default_user_signature: self.default_user_signature,
			timeout: self.timeout,
			signature_ttl: self.signature_ttl,
			auto_sign: self.auto_sign,
			paths: self.paths,
		})
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

mod millis {
	// crates.io
	use serde::Deserializer;
	// self
	use crate::_prelude::*;

	pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		i64::deserialize(deserializer).map(Duration::milliseconds)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_target_local_frontend() {
		let config = ClientConfig::builder().build().expect("Default configuration should build.");

		assert_eq!(config.base_url.as_str(), "http://localhost:8080/");
		assert_eq!(config.mode, AuthMode::Frontend);
		assert!(config.api_key.is_none());
		assert_eq!(config.timeout, Duration::seconds(10));
		assert_eq!(config.signature_ttl, Duration::minutes(5));
		assert_eq!(config.paths.sign, "/backend/v1/sign");
	}

	#[test]
	fn backend_mode_requires_api_key() {
		let err = ClientConfig::builder()
			.mode(AuthMode::Backend)
			.build()
			.expect_err("Backend mode without a key should be rejected.");

		assert!(matches!(err, ConfigError::MissingApiKey { mode: "backend" }));
		ClientConfig::backend("https://db.example.com", "sk-backend")
			.expect("Backend mode with a key should build.");
	}

	#[test]
	fn rejects_bad_urls_bounds_and_paths() {
		assert!(matches!(
			ClientConfig::builder().base_url("not a url").build(),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			ClientConfig::builder().base_url("ftp://db.example.com").build(),
			Err(ConfigError::UnsupportedScheme { .. })
		));
		assert!(matches!(
			ClientConfig::builder().timeout(Duration::ZERO).build(),
			Err(ConfigError::NonPositiveTimeout)
		));
		assert!(matches!(
			ClientConfig::builder().signature_ttl(Duration::milliseconds(-1)).build(),
			Err(ConfigError::NonPositiveSignatureTtl)
		));

		let paths = ApiPaths { sign: "backend/v1/sign".into(), ..ApiPaths::default() };

		assert!(matches!(
			ClientConfig::builder().paths(paths).build(),
			Err(ConfigError::InvalidPath { name: "sign", .. })
		));
	}

	#[test]
	fn trailing_slashes_are_trimmed() {
		let config = ClientConfig::frontend("https://db.example.com/api/", "pk")
			.expect("Frontend configuration should build.");

		assert_eq!(config.base_url.as_str(), "https://db.example.com/api");
	}

	#[test]
	fn paths_deserialize_with_defaults() {
		let paths: ApiPaths = serde_json::from_str("{\"frontend_prefix\":\"/v1\"}")
			.expect("Partial path configuration should deserialize.");

		assert_eq!(paths.frontend_prefix, "/v1");
		assert_eq!(paths.readyz, "/readyz");
	}

	#[test]
	fn builder_loads_from_json_settings() {
		let builder: ClientConfigBuilder = serde_json::from_str(
			r#"{
				"base_url": "https://db.example.com",
				"api_key": "sk-backend",
				"mode": "backend",
				"default_user_id": "user-1",
				"timeout_ms": 2500,
				"paths": { "frontend_prefix": "/v1" }
			}"#,
		)
		.expect("Settings should deserialize into a builder.");
		let config = builder.auto_sign(false).build().expect("Loaded settings should build.");

		assert_eq!(config.base_url.as_str(), "https://db.example.com/");
		assert_eq!(config.mode, AuthMode::Backend);
		assert_eq!(config.api_key.as_ref().map(|key| key.expose()), Some("sk-backend"));
		assert_eq!(config.default_user_id.as_ref().map(UserId::as_str), Some("user-1"));
		assert_eq!(config.timeout, Duration::milliseconds(2500));
		assert_eq!(config.signature_ttl, DEFAULT_SIGNATURE_TTL);
		assert!(!config.auto_sign);
		assert_eq!(config.paths.frontend_prefix, "/v1");
		assert_eq!(config.paths.sign, "/backend/v1/sign");
	}

	#[test]
	fn loaded_settings_are_still_validated() {
		let builder: ClientConfigBuilder =
			serde_json::from_str(r#"{ "mode": "backend", "signature_ttl_ms": 0 }"#)
				.expect("Settings should deserialize into a builder.");

		assert!(matches!(builder.build(), Err(ConfigError::MissingApiKey { mode: "backend" })));

		let invalid_user = serde_json::from_str::<ClientConfigBuilder>(r#"{ "default_user_id": " " }"#);

		assert!(invalid_user.is_err());
	}
}
