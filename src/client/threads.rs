//! Thread operations.

// self
use crate::{
	_prelude::*,
	auth::{ThreadKey, UserContext},
	client::{self, Client},
	http::{ApiHttpClient, HttpMethod},
	model::{KeyResponse, ListQuery, Thread, ThreadCreate, ThreadList, ThreadResponse, ThreadUpdate},
	obs::OpKind,
};

const THREADS: &str = "threads";

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a thread owned by the context's user and returns its key.
	pub async fn create_thread(
		&self,
		ctx: &UserContext,
		thread: &ThreadCreate,
	) -> Result<KeyResponse> {
		client::observe(OpKind::CreateThread, "create_thread", async move {
			let body = client::encode(thread)?;
			let url = self.frontend_url(&[THREADS], None);
			let response = self.send(HttpMethod::Post, url, Some(ctx), Some(body)).await?;

			client::decode(response)
		})
		.await
	}

	/// Lists threads visible to the context's user. The query is validated before any I/O.
	pub async fn list_threads(&self, ctx: &UserContext, query: &ListQuery) -> Result<ThreadList> {
		client::observe(OpKind::ListThreads, "list_threads", async move {
			query.validate()?;

			let url = self.frontend_url(&[THREADS], Some(query));
			let response = self.send(HttpMethod::Get, url, Some(ctx), None).await?;

			client::decode(response)
		})
		.await
	}

	/// Fetches one thread.
	pub async fn get_thread(&self, ctx: &UserContext, key: &ThreadKey) -> Result<Thread> {
		client::observe(OpKind::GetThread, "get_thread", async move {
			let url = self.frontend_url(&[THREADS, key.as_str()], None);
			let response = self.send(HttpMethod::Get, url, Some(ctx), None).await?;

			client::decode::<ThreadResponse>(response).map(|wrapper| wrapper.thread)
		})
		.await
	}

	/// Updates a thread; fields left unset in `update` are unchanged.
	pub async fn update_thread(
		&self,
		ctx: &UserContext,
		key: &ThreadKey,
		update: &ThreadUpdate,
	) -> Result<KeyResponse> {
		client::observe(OpKind::UpdateThread, "update_thread", async move {
			let body = client::encode(update)?;
			let url = self.frontend_url(&[THREADS, key.as_str()], None);
			let response = self.send(HttpMethod::Put, url, Some(ctx), Some(body)).await?;

			client::decode(response)
		})
		.await
	}

	/// Deletes a thread. Returns `None` when the service answers `204 No Content`.
	pub async fn delete_thread(
		&self,
		ctx: &UserContext,
		key: &ThreadKey,
	) -> Result<Option<KeyResponse>> {
		client::observe(OpKind::DeleteThread, "delete_thread", async move {
			let url = self.frontend_url(&[THREADS, key.as_str()], None);
			let response = self.send(HttpMethod::Delete, url, Some(ctx), None).await?;

			client::decode_optional(response)
		})
		.await
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use crate::{_preludet::*, auth::ThreadKey, config::ClientConfig, model::ListQuery};

	#[test]
	fn thread_urls_encode_keys_and_queries() {
		let config = ClientConfig::frontend("https://db.example.com", "pk")
			.expect("Frontend configuration should build.");
		let (client, _clock) = build_reqwest_test_client(config);
		let key = ThreadKey::new("a/b c").expect("Thread fixture should be valid.");

		assert_eq!(
			client.frontend_url(&[super::THREADS, key.as_str()], None).as_str(),
			"https://db.example.com/frontend/v1/threads/a%2Fb%20c"
		);

		let query = ListQuery::new().limit(10).before("t 9");

		assert_eq!(
			client.frontend_url(&[super::THREADS], Some(&query)).as_str(),
			"https://db.example.com/frontend/v1/threads?limit=10&before=t+9"
		);
	}
}
