//! Liveness and readiness probes.

// self
use crate::{
	_prelude::*,
	client::{self, Client},
	http::{ApiHttpClient, HttpMethod},
	model::{Healthz, Readyz},
	obs::OpKind,
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Calls the liveness probe.
	pub async fn healthz(&self) -> Result<Healthz> {
		client::observe(OpKind::Healthz, "healthz", async move {
			let url = self.root_url(&self.config.paths.healthz);
			let response = self.send(HttpMethod::Get, url, None, None).await?;

			client::decode(response)
		})
		.await
	}

	/// Calls the readiness probe.
	pub async fn readyz(&self) -> Result<Readyz> {
		client::observe(OpKind::Readyz, "readyz", async move {
			let url = self.root_url(&self.config.paths.readyz);
			let response = self.send(HttpMethod::Get, url, None, None).await?;

			client::decode(response)
		})
		.await
	}
}
