//! Per-client signature cache with TTL expiry.
//!
//! [`SignatureCache`] remembers the signature most recently issued for each user so backend
//! requests do not call the signing endpoint every time. Entries are never evicted proactively;
//! freshness is checked on read with a strict `now < expires_at` comparison, so an entry is
//! refreshed exactly at its expiry instant.
//!
//! Lookups take a read lock only. The entry map is locked for a single read or write and never
//! across the signing call, so concurrent misses for one user may both reach the issuer; the
//! last completed write wins.

mod clock;

pub use clock::*;

// self
use crate::{
	_prelude::*,
	auth::{UserId, UserSignature},
	obs::{self, CacheOutcome},
	sign::{SignError, SignatureIssuer},
};

/// Signature lifetime used when none is configured.
pub const DEFAULT_SIGNATURE_TTL: Duration = Duration::minutes(5);

type EntryMap = Arc<RwLock<HashMap<UserId, CacheEntry>>>;

/// Cached signature for one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
	/// User the signature was issued for.
	pub identity: UserId,
	/// Opaque signature returned by the issuer.
	pub signature: UserSignature,
	/// Milliseconds since the Unix epoch after which the entry is stale.
	pub expires_at: i64,
}
impl CacheEntry {
	/// Returns `true` while `now < expires_at`.
	pub fn is_fresh_at(&self, now: i64) -> bool {
		now < self.expires_at
	}
}

/// Diagnostic snapshot returned by [`SignatureCache::stats`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
	/// Number of entries, fresh or stale.
	pub size: usize,
	/// Owned copy of every entry.
	pub entries: HashMap<UserId, CacheEntry>,
}

/// Signature cache owned by a single client.
#[derive(Clone)]
pub struct SignatureCache {
	entries: EntryMap,
	issuer: Arc<dyn SignatureIssuer>,
	clock: Arc<dyn Clock>,
	ttl_ms: i64,
}
impl SignatureCache {
	/// Creates an empty cache that refreshes through `issuer` and keeps entries for `ttl`.
	pub fn new(issuer: Arc<dyn SignatureIssuer>, ttl: Duration) -> Self {
		Self {
			entries: Default::default(),
			issuer,
			clock: Arc::new(SystemClock),
			ttl_ms: duration_millis(ttl).max(0),
		}
	}

	/// Replaces the clock used for freshness checks and expiry stamps.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Configured entry lifetime.
	pub fn ttl(&self) -> Duration {
		Duration::milliseconds(self.ttl_ms)
	}

	/// Returns the cached signature for `identity` if it is still fresh, without any I/O.
	pub fn cached(&self, identity: &UserId) -> Option<UserSignature> {
		self.lookup(identity, self.clock.now_millis())
	}

	/// Returns a fresh signature for `identity`, calling the issuer at most once on a miss.
	///
	/// A successful refresh stores `expires_at = now + ttl`, where `now` is read before the
	/// issuer is called, and overwrites any previous entry. A failed refresh leaves the cache
	/// untouched and returns the [`SignError`].
	pub async fn get_or_refresh(&self, identity: &UserId) -> Result<UserSignature, SignError> {
		let now = self.clock.now_millis();

		if let Some(signature) = self.lookup(identity, now) {
			obs::record_cache_lookup(CacheOutcome::Hit, identity);

			return Ok(signature);
		}

		obs::record_cache_lookup(CacheOutcome::Miss, identity);

		let issued = <dyn SignatureIssuer>::issue(self.issuer.as_ref(), identity).await?;
		let entry = CacheEntry {
			identity: identity.clone(),
			signature: issued.signature.clone(),
			expires_at: now.saturating_add(self.ttl_ms),
		};

		self.entries.write().insert(identity.clone(), entry);

		Ok(issued.signature)
	}

	/// Removes the entry for `identity`, or every entry when `None`.
	pub fn clear(&self, identity: Option<&UserId>) {
		let mut entries = self.entries.write();

		match identity {
			Some(identity) => {
				entries.remove(identity);
			},
			None => entries.clear(),
		}
	}

	/// Returns the entry count and an owned snapshot of the entries.
	pub fn stats(&self) -> CacheStats {
		let entries = self.entries.read().clone();

		CacheStats { size: entries.len(), entries }
	}

	fn lookup(&self, identity: &UserId, now: i64) -> Option<UserSignature> {
		self.entries
			.read()
			.get(identity)
			.filter(|entry| entry.is_fresh_at(now))
			.map(|entry| entry.signature.clone())
	}
}
impl Debug for SignatureCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignatureCache")
			.field("size", &self.entries.read().len())
			.field("ttl_ms", &self.ttl_ms)
			.finish()
	}
}
