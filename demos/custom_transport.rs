//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`ApiHttpClient`] and answer every [`ApiRequest`] with an [`ApiResponse`].
//! 2. Report non-2xx statuses as responses; only connection-level failures become
//!    [`TransportError`] values.
//! 3. Wrap the transport in `Arc` and pass it to [`Client::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use progressdb_client::{
	auth::{UserContext, UserId},
	client::Client,
	config::ClientConfig,
	error::TransportError,
	http::{ApiHttpClient, ApiRequest, ApiResponse, HttpFuture, HttpMethod},
	model::ThreadCreate,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::backend("https://db.example.com", "sk-demo")?;
	let client: Client<CannedTransport> =
		Client::with_http_client(config.clone(), Arc::new(CannedTransport::default()));
	let alice = UserId::new("alice")?;
	let ctx = UserContext::user(alice.clone());
	let created = client.create_thread(&ctx, &ThreadCreate::new("Incident review")).await?;

	println!("Thread created through the canned transport: {}.", created.key);

	let signature = client.signature_for(&alice).await?;

	println!("Cached signature for alice present: {}.", signature.is_some());

	let payload = client
		.request_raw(HttpMethod::Post, "/frontend/v1/echo", Some(&ctx), Some(&json!({ "ping": 1 })))
		.await?;

	println!("Raw payload: {payload:?}.");

	let missing = client.request_raw(HttpMethod::Get, "/frontend/v1/missing", None, None).await;

	match missing {
		Ok(_) => println!("The canned transport unexpectedly found the resource."),
		Err(e) => println!("Non-2xx status surfaced as an API error: {e} (status {:?}).", e.status()),
	}

	let offline: Client<CannedTransport> =
		Client::with_http_client(config, Arc::new(CannedTransport::offline("db.example.com")));

	match offline.create_thread(&ctx, &ThreadCreate::new("Never sent")).await {
		Ok(_) => println!("The offline transport unexpectedly succeeded."),
		Err(e) => println!("Transport failure reported by the client: {e}."),
	}

	Ok(())
}

#[derive(Debug)]
struct DnsFailure {
	host: &'static str,
}
impl Display for DnsFailure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "DNS lookup failed for {}", self.host)
	}
}
impl StdError for DnsFailure {}

#[derive(Default)]
struct CannedTransport {
	offline_host: Option<&'static str>,
}
impl CannedTransport {
	fn offline(host: &'static str) -> Self {
		Self { offline_host: Some(host) }
	}

	fn answer(request: &ApiRequest) -> ApiResponse {
		let (status, body) = match (request.method, request.url.path()) {
			(HttpMethod::Post, "/backend/v1/sign") =>
				(200, "{\"userId\":\"alice\",\"signature\":\"sig-canned\"}".to_owned()),
			(HttpMethod::Post, "/frontend/v1/threads") => (200, "{\"key\":\"thread-7\"}".to_owned()),
			(HttpMethod::Post, "/frontend/v1/echo") =>
				(200, request.body.as_deref().map(String::from_utf8_lossy).unwrap_or_default().into()),
			_ => (404, "{\"error\":\"not found\"}".to_owned()),
		};

		ApiResponse {
			status,
			content_type: Some("application/json".into()),
			body: body.into_bytes(),
		}
	}
}
impl ApiHttpClient for CannedTransport {
	fn execute(&self, request: ApiRequest) -> HttpFuture<'_, ApiResponse> {
		let offline_host = self.offline_host;

		Box::pin(async move {
			if let Some(host) = offline_host {
				return Err(TransportError::network(DnsFailure { host }));
			}

			Ok(Self::answer(&request))
		})
	}
}
