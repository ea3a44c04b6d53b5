// self
use crate::_prelude::*;

/// Liveness probe body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Healthz {
	/// Reported status, `ok` on a healthy node.
	pub status: String,
}

/// Readiness probe body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readyz {
	/// Reported status, `ready` once the node serves traffic.
	pub status: String,
	/// Server build version, when advertised.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
}
