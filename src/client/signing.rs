//! Backend signing and signature cache management.

// self
use crate::{
	_prelude::*,
	auth::UserId,
	cache::CacheStats,
	client::{self, Client},
	http::ApiHttpClient,
	obs::OpKind,
	sign::SignResponse,
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Requests a fresh signature for `user`, bypassing and not updating the cache.
	pub async fn sign_user(&self, user: &UserId) -> Result<SignResponse> {
		client::observe(OpKind::SignUser, "sign_user", async move {
			Ok(self.signer.sign(user).await?)
		})
		.await
	}

	/// Drops the cached signature for `user`, or every cached signature when `None`.
	pub fn clear_signature_cache(&self, user: Option<&UserId>) {
		self.signatures.clear(user);
	}

	/// Snapshot of the signature cache.
	pub fn signature_cache_stats(&self) -> CacheStats {
		self.signatures.stats()
	}
}
