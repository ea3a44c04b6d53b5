// self
use crate::{
	auth::UserId,
	obs::{CacheOutcome, OpKind, OpOutcome},
};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_op_outcome(kind: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"progressdb_client_op_total",
			"op" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records a signature cache lookup via the metrics recorder and, when enabled, a debug event.
pub fn record_cache_lookup(outcome: CacheOutcome, identity: &UserId) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("progressdb_client_signature_cache_total", "outcome" => outcome.as_str())
			.increment(1);
	}
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(user = %identity, outcome = outcome.as_str(), "signature cache lookup");
	}

	#[cfg(not(any(feature = "metrics", feature = "tracing")))]
	{
		let _ = (outcome, identity);
	}
	#[cfg(all(feature = "metrics", not(feature = "tracing")))]
	{
		let _ = identity;
	}
}
