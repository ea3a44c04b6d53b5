//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `progressdb_client.op` with the `op`
//!   (operation) and `stage` (call site) fields, plus debug events for signature cache lookups.
//! - Enable `metrics` to increment the `progressdb_client_op_total` counter for every
//!   attempt/success/failure, labeled by `op` + `outcome`, and the
//!   `progressdb_client_signature_cache_total` counter labeled by `outcome` (`hit`/`miss`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// `GET /healthz`.
	Healthz,
	/// `GET /readyz`.
	Readyz,
	/// Thread creation.
	CreateThread,
	/// Thread listing.
	ListThreads,
	/// Single thread lookup.
	GetThread,
	/// Thread update.
	UpdateThread,
	/// Thread deletion.
	DeleteThread,
	/// Message creation.
	CreateMessage,
	/// Message listing.
	ListMessages,
	/// Single message lookup.
	GetMessage,
	/// Message update.
	UpdateMessage,
	/// Message deletion.
	DeleteMessage,
	/// Uncached backend signing call.
	SignUser,
	/// Caller-assembled request.
	Raw,
}
impl OpKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpKind::Healthz => "healthz",
			OpKind::Readyz => "readyz",
			OpKind::CreateThread => "create_thread",
			OpKind::ListThreads => "list_threads",
			OpKind::GetThread => "get_thread",
			OpKind::UpdateThread => "update_thread",
			OpKind::DeleteThread => "delete_thread",
			OpKind::CreateMessage => "create_message",
			OpKind::ListMessages => "list_messages",
			OpKind::GetMessage => "get_message",
			OpKind::UpdateMessage => "update_message",
			OpKind::DeleteMessage => "delete_message",
			OpKind::SignUser => "sign_user",
			OpKind::Raw => "raw",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Failure => "failure",
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Result of a signature cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheOutcome {
	/// A fresh entry was served without I/O.
	Hit,
	/// The entry was absent or stale and the issuer was called.
	Miss,
}
impl CacheOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CacheOutcome::Hit => "hit",
			CacheOutcome::Miss => "miss",
		}
	}
}
