// self
use crate::_prelude::*;

/// Endpoint paths of the target deployment.
///
/// Deployments disagree on the prefix (`/v1`, `/frontend/v1`), so every path is configurable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiPaths {
	/// Prefix for thread and message routes.
	pub frontend_prefix: String,
	/// Backend signing route.
	pub sign: String,
	/// Liveness route.
	pub healthz: String,
	/// Readiness route.
	pub readyz: String,
}
impl ApiPaths {
	pub(crate) fn validate(&self) -> Result<(), crate::error::ConfigError> {
		for (name, path) in [
			("frontend_prefix", &self.frontend_prefix),
			("sign", &self.sign),
			("healthz", &self.healthz),
			("readyz", &self.readyz),
		] {
			if !path.starts_with('/') {
				return Err(crate::error::ConfigError::InvalidPath { name, path: path.clone() });
			}
		}

		Ok(())
	}
}
impl Default for ApiPaths {
	fn default() -> Self {
		Self {
			frontend_prefix: "/frontend/v1".into(),
			sign: "/backend/v1/sign".into(),
			healthz: "/healthz".into(),
			readyz: "/readyz".into(),
		}
	}
}
