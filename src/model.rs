//! Typed request and response bodies exchanged with the service.
//!
//! Response structs are lenient: optional fields default when absent, and fields this crate does
//! not model are preserved in `extra` so newer servers do not break older clients.

/// Liveness and readiness bodies.
pub mod health;
/// Message bodies.
pub mod message;
/// Page metadata.
pub mod pagination;
pub mod query;
/// Thread bodies.
pub mod thread;

pub use health::*;
pub use message::*;
pub use pagination::*;
pub use query::*;
pub use thread::*;

// self
use crate::_prelude::*;

/// `{ "key": ... }` body returned by create, update, and delete operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyResponse {
	/// Key of the affected resource.
	pub key: String,
}
