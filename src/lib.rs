//! Typed async client for the ProgressDB thread and message service, with backend-mode user
//! signing backed by a per-client TTL signature cache.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod sign;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{cache::ManualClock, client::Client, config::ClientConfig, http::ReqwestHttpClient};

	/// Client type alias used by reqwest-backed tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client with a short timeout for mock-server tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.timeout(std::time::Duration::from_secs(5))
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Client`] over the test transport whose signature cache reads time from the
	/// returned [`ManualClock`].
	pub fn build_reqwest_test_client(config: ClientConfig) -> (ReqwestTestClient, ManualClock) {
		let clock = ManualClock::default();
		let client = ReqwestTestClient::with_http_client(config, test_reqwest_http_client())
			.with_clock(Arc::new(clock.clone()));

		(client, clock)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
