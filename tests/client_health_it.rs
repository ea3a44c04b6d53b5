mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use progressdb_client::{
	_preludet::*,
	auth::UserContext,
	error::{ApiErrorBody, ConfigError, Error},
	http::{ApiPayload, HttpMethod},
};

#[tokio::test]
async fn probes_decode_status_bodies() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(frontend_config(&server));
	let healthz_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/healthz");
			then.status(200).header("content-type", "application/json").body("{\"status\":\"ok\"}");
		})
		.await;
	let readyz_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/readyz");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"status\":\"ready\",\"version\":\"0.5.2\"}");
		})
		.await;
	let healthz = client.healthz().await?;
	let readyz = client.readyz().await?;

	assert_eq!(healthz.status, "ok");
	assert_eq!(readyz.status, "ready");
	assert_eq!(readyz.version.as_deref(), Some("0.5.2"));

	healthz_mock.assert_async().await;
	readyz_mock.assert_async().await;

	Ok(())
}

#[tokio::test]
async fn not_ready_surfaces_the_text_body() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(frontend_config(&server));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/readyz");
			then.status(503).header("content-type", "text/plain").body("starting");
		})
		.await;
	let err = client.readyz().await.expect_err("A 503 probe must fail.");

	match err {
		Error::Api { status, body } => {
			assert_eq!(status, 503);
			assert_eq!(body, ApiErrorBody::Text("starting".into()));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn raw_requests_follow_the_content_type() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(frontend_config(&server));
	let json_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/frontend/v1/threads")
				.header("x-user-id", "alice")
				.json_body(json!({ "title": "Raw" }));
			then.status(200).header("content-type", "application/json").body("{\"key\":\"t9\"}");
		})
		.await;
	let text_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/metrics");
			then.status(200).header("content-type", "text/plain").body("up 1");
		})
		.await;
	let ctx = UserContext::user(user("alice"));
	let created = client
		.request_raw(HttpMethod::Post, "/frontend/v1/threads", Some(&ctx), Some(&json!({ "title": "Raw" })))
		.await
		.expect("Raw JSON request should succeed.");

	assert_eq!(created, ApiPayload::Json(json!({ "key": "t9" })));

	let metrics = client
		.request_raw(HttpMethod::Get, "/metrics", None, None)
		.await
		.expect("Raw text request should succeed.");

	assert_eq!(metrics, ApiPayload::Text("up 1".into()));

	json_mock.assert_async().await;
	text_mock.assert_async().await;
}

#[tokio::test]
async fn raw_requests_require_absolute_paths() {
	let server = MockServer::start_async().await;
	let (client, _clock) = build_reqwest_test_client(frontend_config(&server));
	let err = client
		.request_raw(HttpMethod::Get, "healthz", None, None)
		.await
		.expect_err("Relative paths must be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidPath { name: "request", .. })));
}
