mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use progressdb_client::{
	_preludet::*,
	auth::UserContext,
	config::ClientConfig,
	error::{ApiErrorBody, Error},
	model::ThreadCreate,
	sign::SignError,
};

const SIGN_PATH: &str = "/backend/v1/sign";

#[tokio::test]
async fn cached_signature_is_reused_until_the_ttl_elapses() {
	let server = MockServer::start_async().await;
	let (client, clock) = build_reqwest_test_client(backend_config(&server));
	let alice = user("alice");
	let mut first_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(SIGN_PATH)
				.header("authorization", "Bearer sk-backend")
				.header("content-type", "application/json")
				.json_body(json!({ "userId": "alice" }));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"userId\":\"alice\",\"signature\":\"sig-alice-1\"}");
		})
		.await;
	let first = client
		.signature_for(&alice)
		.await
		.expect("Initial signing should succeed.")
		.expect("Backend mode should always produce a signature.");

	assert_eq!(first.expose(), "sig-alice-1");

	let stats = client.signature_cache_stats();

	assert_eq!(stats.size, 1);
	assert_eq!(stats.entries.get("alice").map(|entry| entry.expires_at), Some(300_000));

	clock.set(299_999);

	let cached = client
		.signature_for(&alice)
		.await
		.expect("Cached lookup should succeed.")
		.expect("Backend mode should always produce a signature.");

	assert_eq!(cached.expose(), "sig-alice-1");

	first_mock.assert_calls_async(1).await;
	first_mock.delete_async().await;

	let second_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SIGN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"userId\":\"alice\",\"signature\":\"sig-alice-2\"}");
		})
		.await;

	clock.set(300_000);

	let refreshed = client
		.signature_for(&alice)
		.await
		.expect("Refresh at the expiry instant should succeed.")
		.expect("Backend mode should always produce a signature.");

	assert_eq!(refreshed.expose(), "sig-alice-2");
	assert_eq!(
		client.signature_cache_stats().entries.get("alice").map(|entry| entry.expires_at),
		Some(600_000)
	);

	second_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn signing_failure_surfaces_and_caches_nothing() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(backend_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SIGN_PATH);
			then.status(503).header("content-type", "text/plain").body("maintenance");
		})
		.await;
	let err = client
		.signature_for(&user("bob"))
		.await
		.expect_err("A 503 from the signing endpoint must fail.");

	match err {
		Error::Sign(SignError::Api { status, body }) => {
			assert_eq!(status, 503);
			assert_eq!(body, ApiErrorBody::Text("maintenance".into()));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(client.signature_cache_stats().size, 0);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn response_without_signature_is_malformed() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(backend_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SIGN_PATH);
			then.status(200).header("content-type", "application/json").body("{\"userId\":\"carol\"}");
		})
		.await;
	let err = client
		.signature_for(&user("carol"))
		.await
		.expect_err("A payload without a signature must be rejected.");

	assert!(matches!(err, Error::Sign(SignError::MalformedResponse { .. })), "{err:?}");
	assert_eq!(client.signature_cache_stats().size, 0);

	mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_signing_endpoint_is_a_transport_failure() {
	let config = ClientConfig::backend("http://127.0.0.1:9", BACKEND_KEY)
		.expect("Backend configuration should build.");
	let (client, _clock) = build_reqwest_test_client(config);
	let err = client
		.signature_for(&user("dave"))
		.await
		.expect_err("A refused connection must fail.");

	assert!(matches!(err, Error::Sign(SignError::Transport { .. })), "{err:?}");
	assert_eq!(client.signature_cache_stats().size, 0);
}

#[tokio::test]
async fn backend_requests_sign_once_and_attach_the_signature() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(backend_config(&server));
	let sign_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SIGN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"userId\":\"alice\",\"signature\":\"sig-alice\"}");
		})
		.await;
	let create_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/frontend/v1/threads")
				.header("authorization", "Bearer sk-backend")
				.header("x-user-id", "alice")
				.header("x-user-signature", "sig-alice")
				.header("content-type", "application/json")
				.json_body(json!({ "title": "General" }));
			then.status(200).header("content-type", "application/json").body("{\"key\":\"t1\"}");
		})
		.await;
	let ctx = UserContext::user(user("alice"));
	let request = ThreadCreate::new("General");

	for _ in 0..2 {
		let created =
			client.create_thread(&ctx, &request).await.expect("Thread creation should succeed.");

		assert_eq!(created.key, "t1");
	}

	sign_mock.assert_calls_async(1).await;
	create_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn explicit_signature_bypasses_the_cache() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(backend_config(&server));
	let sign_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SIGN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"signature\":\"sig-cached\"}");
		})
		.await;
	let get_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/frontend/v1/threads/t1")
				.header("x-user-id", "alice")
				.header("x-user-signature", "sig-manual");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"thread\":{\"key\":\"t1\",\"title\":\"General\"}}");
		})
		.await;
	let ctx = UserContext::user(user("alice")).with_signature("sig-manual");
	let fetched =
		client.get_thread(&ctx, &thread("t1")).await.expect("Thread lookup should succeed.");

	assert_eq!(fetched.title.as_deref(), Some("General"));
	assert_eq!(client.signature_cache_stats().size, 0);

	sign_mock.assert_calls_async(0).await;
	get_mock.assert_async().await;
}

#[tokio::test]
async fn clients_never_share_a_cache() {
	let server = MockServer::start_async().await;
	let (first, _first_clock) = build_reqwest_test_client(backend_config(&server));
	let (second, _second_clock) = build_reqwest_test_client(backend_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SIGN_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"signature\":\"sig-shared\"}");
		})
		.await;
	let alice = user("alice");

	first.signature_for(&alice).await.expect("First client signing should succeed.");
	second.signature_for(&alice).await.expect("Second client signing should succeed.");
	first.clone().signature_for(&alice).await.expect("Clones should reuse the cache.");

	mock.assert_calls_async(2).await;

	first.clear_signature_cache(Some(&alice));

	assert_eq!(first.signature_cache_stats().size, 0);
	assert_eq!(second.signature_cache_stats().size, 1);
}

#[tokio::test]
async fn sign_user_skips_the_cache() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(backend_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(SIGN_PATH).json_body(json!({ "userId": "erin" }));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"userId\":\"erin\",\"signature\":\"sig-erin\"}");
		})
		.await;
	let erin = user("erin");

	for _ in 0..2 {
		let response = client.sign_user(&erin).await.expect("Direct signing should succeed.");

		assert_eq!(response.user_id, erin);
		assert_eq!(response.signature.expose(), "sig-erin");
	}

	assert_eq!(client.signature_cache_stats().size, 0);

	mock.assert_calls_async(2).await;
}
