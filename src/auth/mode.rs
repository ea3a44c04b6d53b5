//! Client authentication modes.

// self
use crate::{_prelude::*, error::ConfigError};

/// Authentication scheme the client speaks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
	/// End-user clients: `X-API-Key` plus caller-provided signatures.
	#[default]
	Frontend,
	/// Trusted servers: `Authorization: Bearer` and signatures minted through the sign endpoint.
	Backend,
}
impl AuthMode {
	/// Returns a stable label suitable for logs and errors.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthMode::Frontend => "frontend",
			AuthMode::Backend => "backend",
		}
	}

	/// Whether user signatures come from the signing endpoint.
	pub const fn mints_signatures(self) -> bool {
		matches!(self, AuthMode::Backend)
	}
}
impl Display for AuthMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AuthMode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"frontend" => Ok(AuthMode::Frontend),
			"backend" => Ok(AuthMode::Backend),
			_ => Err(ConfigError::UnknownMode { value: s.to_owned() }),
		}
	}
}
