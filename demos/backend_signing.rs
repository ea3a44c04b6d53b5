//! Demonstrates backend mode against a mock ProgressDB server: the first request for a user mints
//! a signature through the signing endpoint and later requests reuse the cached one.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use progressdb_client::{
	auth::{UserContext, UserId},
	client::ReqwestApiClient,
	config::ClientConfig,
	model::{ListQuery, ThreadCreate},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let sign_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/backend/v1/sign").header("authorization", "Bearer sk-demo");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"userId\":\"alice\",\"signature\":\"sig-alice\"}");
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/frontend/v1/threads")
				.header("x-user-id", "alice")
				.header("x-user-signature", "sig-alice");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"key\":\"thread-1\"}");
		})
		.await;
	let list_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/frontend/v1/threads").query_param("limit", "10");
			then.status(200).header("content-type", "application/json").body(
				"{\"threads\":[{\"key\":\"thread-1\",\"title\":\"Release notes\",\"author\":\"alice\"}]}",
			);
		})
		.await;
	let config = ClientConfig::backend(server.base_url(), "sk-demo")?;
	let client = ReqwestApiClient::new(config)?;
	let ctx = UserContext::user(UserId::new("alice")?);
	let created = client.create_thread(&ctx, &ThreadCreate::new("Release notes")).await?;

	println!("Created thread {}.", created.key);

	let page = client.list_threads(&ctx, &ListQuery::default().limit(10)).await?;

	println!("Listed {} thread(s) for alice.", page.threads.len());

	let stats = client.signature_cache_stats();

	println!("Signature cache holds {} entry after two requests.", stats.size);

	sign_mock.assert_calls_async(1).await;
	create_mock.assert_async().await;
	list_mock.assert_async().await;

	Ok(())
}
