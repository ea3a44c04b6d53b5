//! Backend user signing: the issuer contract consumed by the signature cache and the
//! HTTP-backed [`RemoteSigner`].

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, UserId, UserSignature, headers},
	error::{ApiErrorBody, TransportError},
	http::{ApiHttpClient, ApiRequest, ApiResponse, HeaderSet, HttpMethod},
};

/// Boxed future returned by [`SignatureIssuer::issue`].
pub type SignFuture<'a> = Pin<Box<dyn Future<Output = Result<SignResponse, SignError>> + 'a + Send>>;

/// Source of fresh user signatures.
pub trait SignatureIssuer
where
	Self: Send + Sync,
{
	/// Obtains a new signature for `user`. Implementations perform at most one network call.
	fn issue<'a>(&'a self, user: &'a UserId) -> SignFuture<'a>;
}

/// Successful signing result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignResponse {
	/// User the signature belongs to.
	pub user_id: UserId,
	/// Opaque signature token.
	pub signature: UserSignature,
}

/// Failures raised while obtaining a signature.
#[derive(Debug, ThisError)]
pub enum SignError {
	/// The signing request could not be completed (timeout, refused connection, DNS).
	#[error("Signing request could not be completed.")]
	Transport {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// The signing endpoint answered with a non-2xx status.
	#[error("Signing endpoint responded with HTTP {status}: {body}.")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Parsed JSON or raw text body.
		body: ApiErrorBody,
	},
	/// A 2xx response lacked a usable `signature` field.
	#[error("Signing endpoint returned a malformed response: {reason}.")]
	MalformedResponse {
		/// What was wrong with the payload.
		reason: String,
	},
}
impl SignError {
	/// HTTP status for API failures.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			_ => None,
		}
	}
}
impl From<TransportError> for SignError {
	fn from(source: TransportError) -> Self {
		Self::Transport { source }
	}
}

#[derive(Deserialize)]
struct SignPayload {
	#[serde(default)]
	signature: Option<String>,
}

/// [`SignatureIssuer`] that calls the service's backend signing endpoint.
pub struct RemoteSigner<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	endpoint: Url,
	api_key: Option<ApiKey>,
}
impl<C> RemoteSigner<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a signer posting to `endpoint` with `api_key` as the bearer credential.
	pub fn new(http_client: impl Into<Arc<C>>, endpoint: Url, api_key: Option<ApiKey>) -> Self {
		Self { http_client: http_client.into(), endpoint, api_key }
	}

	/// Endpoint the signer posts to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Sends one signing request and classifies the outcome.
	pub async fn sign(&self, user: &UserId) -> Result<SignResponse, SignError> {
		let mut request_headers = HeaderSet::new();

		if let Some(key) = self.api_key.as_ref() {
			request_headers.insert(headers::AUTHORIZATION, headers::bearer(key));
		}

		request_headers.insert(headers::CONTENT_TYPE, "application/json");

		let body = serde_json::json!({ "userId": user.as_str() }).to_string().into_bytes();
		let request = ApiRequest {
			method: HttpMethod::Post,
			url: self.endpoint.clone(),
			headers: request_headers,
			body: Some(body),
		};
		let response = self.http_client.execute(request).await?;

		parse_sign_response(user, response)
	}
}
impl<C> SignatureIssuer for RemoteSigner<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn issue<'a>(&'a self, user: &'a UserId) -> SignFuture<'a> {
		Box::pin(self.sign(user))
	}
}
impl<C> Debug for RemoteSigner<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RemoteSigner")
			.field("endpoint", &self.endpoint.as_str())
			.field("api_key_set", &self.api_key.is_some())
			.finish()
	}
}

fn parse_sign_response(user: &UserId, response: ApiResponse) -> Result<SignResponse, SignError> {
	if !response.is_success() {
		return Err(SignError::Api {
			status: response.status,
			body: ApiErrorBody::from_response(&response),
		});
	}

	let de = &mut serde_json::Deserializer::from_slice(&response.body);
	let payload: SignPayload = serde_path_to_error::deserialize(de)
		.map_err(|e| SignError::MalformedResponse { reason: e.to_string() })?;
	let signature = payload
		.signature
		.filter(|value| !value.is_empty())
		.ok_or_else(|| SignError::MalformedResponse { reason: "missing `signature`".into() })?;

	Ok(SignResponse { user_id: user.clone(), signature: UserSignature::new(signature) })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn alice() -> UserId {
		UserId::new("alice").expect("User fixture should be valid.")
	}

	fn json(status: u16, body: &str) -> ApiResponse {
		ApiResponse {
			status,
			content_type: Some("application/json".into()),
			body: body.as_bytes().to_vec(),
		}
	}

	#[test]
	fn success_ignores_extra_fields() {
		let response =
			json(200, "{\"userId\":\"alice\",\"signature\":\"sig-a\",\"issued\":1700000000}");
		let parsed = parse_sign_response(&alice(), response).expect("Payload should parse.");

		assert_eq!(parsed.user_id.as_ref(), "alice");
		assert_eq!(parsed.signature.expose(), "sig-a");
	}

	#[test]
	fn echoed_user_field_never_invalidates_a_signature() {
		for body in [
			"{\"userId\":42,\"signature\":\"sig-a\"}",
			"{\"userId\":\"\",\"signature\":\"sig-a\"}",
			"{\"userId\":\"someone-else\",\"signature\":\"sig-a\"}",
			"{\"signature\":\"sig-a\"}",
		] {
			let parsed = parse_sign_response(&alice(), json(200, body))
				.expect("A usable signature must be accepted.");

			assert_eq!(parsed.user_id, alice(), "{body}");
			assert_eq!(parsed.signature.expose(), "sig-a", "{body}");
		}
	}

	#[test]
	fn missing_or_empty_signature_is_malformed() {
		for body in [
			"{\"userId\":\"alice\"}",
			"{\"signature\":\"\"}",
			"{\"signature\":7}",
			"[]",
			"not json",
		] {
			let err = parse_sign_response(&alice(), json(200, body))
				.expect_err("Unusable payloads must be rejected.");

			assert!(matches!(err, SignError::MalformedResponse { .. }), "{body} -> {err:?}");
		}
	}

	#[test]
	fn non_success_statuses_carry_the_body() {
		let response = ApiResponse {
			status: 503,
			content_type: Some("text/plain".into()),
			body: b"maintenance".to_vec(),
		};
		let err = parse_sign_response(&alice(), response).expect_err("503 must fail.");

		assert_eq!(err.status(), Some(503));
		assert!(matches!(
			err,
			SignError::Api { body: ApiErrorBody::Text(ref text), .. } if text == "maintenance"
		));
	}
}
