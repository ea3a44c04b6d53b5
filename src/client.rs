//! The ProgressDB client: request dispatch shared by every resource operation.
//!
//! [`Client`] owns the validated [`ClientConfig`], the transport, and the per-client
//! [`SignatureCache`]. Each operation resolves the acting user from its [`UserContext`], assembles
//! mode-aware headers, and classifies the response: `204` becomes an empty result, non-2xx
//! statuses become [`Error::Api`], and JSON bodies are decoded with field-path diagnostics.

mod health;
mod messages;
mod signing;
mod threads;

// self
use crate::{
	_prelude::*,
	auth::{UserContext, UserId, UserSignature, headers},
	cache::{Clock, SignatureCache},
	config::ClientConfig,
	error::{ApiErrorBody, ConfigError},
	http::{ApiHttpClient, ApiPayload, ApiRequest, ApiResponse, HeaderSet, HttpMethod},
	model::ListQuery,
	obs::{self, OpKind, OpOutcome, OpSpan},
	sign::{RemoteSigner, SignatureIssuer},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestHttpClient>;

/// Typed async client for one ProgressDB deployment.
///
/// Cloning is cheap and clones share the transport and the signature cache. Two clients built
/// separately never share cached signatures.
pub struct Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	config: Arc<ClientConfig>,
	http_client: Arc<C>,
	signer: Arc<RemoteSigner<C>>,
	signatures: SignatureCache,
}
impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client over a caller-provided transport.
	///
	/// The transport is responsible for enforcing [`ClientConfig::timeout`].
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		let http_client = http_client.into();
		let sign_url = endpoint_url(&config.base_url, &config.paths.sign, &[]);
		let signer =
			Arc::new(RemoteSigner::new(http_client.clone(), sign_url, config.api_key.clone()));
		let issuer: Arc<dyn SignatureIssuer> = signer.clone();
		let signatures = SignatureCache::new(issuer, config.signature_ttl);

		Self { config: Arc::new(config), http_client, signer, signatures }
	}

	/// Replaces the clock consulted by the signature cache.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.signatures = self.signatures.with_clock(clock);

		self
	}

	/// Configuration the client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Transport shared by every request.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Sends a caller-assembled request and returns the body as JSON, text, or nothing.
	///
	/// `path` is appended to the base URL verbatim and must start with `/`. Pass a context to
	/// attach user headers; `None` sends only the API key. `body` is only sent with `POST` and
	/// `PUT`; `GET` and `DELETE` requests never carry a body or a `Content-Type`.
	pub async fn request_raw(
		&self,
		method: HttpMethod,
		path: &str,
		ctx: Option<&UserContext>,
		body: Option<&Value>,
	) -> Result<ApiPayload> {
		observe(OpKind::Raw, "request_raw", async move {
			if !path.starts_with('/') {
				let path = path.to_owned();

				return Err(ConfigError::InvalidPath { name: "request", path }.into());
			}

			let url = endpoint_url(&self.config.base_url, path, &[]);
			let body = body.filter(|_| method.allows_body()).map(encode).transpose()?;
			let response = self.send(method, url, ctx, body).await?;

			Ok(response.into_payload())
		})
		.await
	}

	/// Returns the signature requests for `user` would carry.
	///
	/// Backend mode obtains it through the signature cache, refreshing at most once. Frontend
	/// mode never signs and returns the configured default signature, if any.
	pub async fn signature_for(&self, user: &UserId) -> Result<Option<UserSignature>> {
		if !self.config.mode.mints_signatures() {
			return Ok(self.config.default_user_signature.clone());
		}

		Ok(Some(self.signatures.get_or_refresh(user).await?))
	}

	pub(crate) fn frontend_url(&self, segments: &[&str], query: Option<&ListQuery>) -> Url {
		let prefix = &self.config.paths.frontend_prefix;
		let mut url = endpoint_url(&self.config.base_url, prefix, segments);
		let pairs = query.map(ListQuery::to_pairs).unwrap_or_default();

		if !pairs.is_empty() {
			url.query_pairs_mut().extend_pairs(pairs);
		}

		url
	}

	pub(crate) fn root_url(&self, path: &str) -> Url {
		endpoint_url(&self.config.base_url, path, &[])
	}

	pub(crate) async fn send(
		&self,
		method: HttpMethod,
		url: Url,
		ctx: Option<&UserContext>,
		body: Option<Vec<u8>>,
	) -> Result<ApiResponse> {
		let headers = self.headers_for(ctx, body.is_some()).await?;
		let request = ApiRequest { method, url, headers, body };
		let response = self.http_client.execute(request).await?;

		if !response.is_success() {
			return Err(Error::Api {
				status: response.status,
				body: ApiErrorBody::from_response(&response),
			});
		}

		Ok(response)
	}

	async fn headers_for(&self, ctx: Option<&UserContext>, has_body: bool) -> Result<HeaderSet> {
		let (user, signature) = match ctx {
			Some(ctx) => self.resolve_user(ctx).await?,
			None => (None, None),
		};

		Ok(headers::build(
			self.config.mode,
			self.config.api_key.as_ref(),
			user.as_ref(),
			signature.as_ref(),
			has_body,
		))
	}

	/// Resolves the acting user and its signature.
	///
	/// An explicit signature wins, then a cached backend signature (when auto-signing), then the
	/// configured default.
	async fn resolve_user(
		&self,
		ctx: &UserContext,
	) -> Result<(Option<UserId>, Option<UserSignature>)> {
		let user = ctx.user_id.clone().or_else(|| self.config.default_user_id.clone());

		if let Some(signature) = &ctx.signature {
			return Ok((user, Some(signature.clone())));
		}

		let signature = match &user {
			Some(user) if self.config.mode.mints_signatures() && self.config.auto_sign => {
				Some(self.signatures.get_or_refresh(user).await?)
			},
			_ => self.config.default_user_signature.clone(),
		};

		Ok((user, signature))
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by a reqwest transport honoring [`ClientConfig::timeout`].
	pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
		let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;

		Ok(Self::with_http_client(config, http_client))
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			http_client: self.http_client.clone(),
			signer: self.signer.clone(),
			signatures: self.signatures.clone(),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.config.base_url.as_str())
			.field("mode", &self.config.mode)
			.field("api_key_set", &self.config.api_key.is_some())
			.field("signatures", &self.signatures)
			.finish()
	}
}

/// Joins `base`, an absolute `path`, and percent-encoded `segments` into one URL.
pub(crate) fn endpoint_url(base: &Url, path: &str, segments: &[&str]) -> Url {
	let mut url = base.clone();
	let joined = format!("{}{}", base.path().trim_end_matches('/'), path);

	url.set_path(&joined);
	url.set_query(None);
	url.set_fragment(None);

	if let Ok(mut parts) = url.path_segments_mut() {
		parts.pop_if_empty().extend(segments);
	}

	url
}

pub(crate) fn encode<T>(body: &T) -> Result<Vec<u8>>
where
	T: ?Sized + Serialize,
{
	serde_json::to_vec(body).map_err(Error::Encode)
}

pub(crate) fn decode<T>(response: ApiResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	if response.is_no_content() {
		return Err(Error::UnexpectedEmpty { status: response.status });
	}

	let de = &mut serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(de)
		.map_err(|source| Error::Decode { source, status: response.status })
}

pub(crate) fn decode_optional<T>(response: ApiResponse) -> Result<Option<T>>
where
	T: DeserializeOwned,
{
	if response.is_no_content() || response.body.is_empty() {
		return Ok(None);
	}

	decode(response).map(Some)
}

/// Wraps an operation in its span and records attempt and outcome counters.
pub(crate) async fn observe<T, F>(kind: OpKind, stage: &'static str, operation: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = OpSpan::new(kind, stage);

	obs::record_op_outcome(kind, OpOutcome::Attempt);

	let result = span.instrument(operation).await;

	match &result {
		Ok(_) => obs::record_op_outcome(kind, OpOutcome::Success),
		Err(err) => {
			span.record_failure(err);
			obs::record_op_outcome(kind, OpOutcome::Failure);
		},
	}

	result
}
