//! Per-call user context that decides which user a request acts for.

// self
use crate::{
	_prelude::*,
	auth::{UserId, UserSignature},
};

/// User identity and optional signature attached to a single request.
///
/// Unset fields fall back to the client's configured defaults. In backend mode a resolved user
/// without an explicit signature is signed through the client's signature cache.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserContext {
	/// User sent as `X-User-ID`.
	pub user_id: Option<UserId>,
	/// Signature sent as `X-User-Signature`.
	pub signature: Option<UserSignature>,
}
impl UserContext {
	/// Context that relies entirely on the client's defaults.
	pub fn from_defaults() -> Self {
		Self::default()
	}

	/// Context acting for `user_id`.
	pub fn user(user_id: UserId) -> Self {
		Self { user_id: Some(user_id), signature: None }
	}

	/// Attaches an explicit signature, bypassing the signature cache.
	pub fn with_signature(mut self, signature: impl Into<UserSignature>) -> Self {
		self.signature = Some(signature.into());

		self
	}
}
impl From<UserId> for UserContext {
	fn from(user_id: UserId) -> Self {
		Self::user(user_id)
	}
}
