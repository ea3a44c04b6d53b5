//! Header names and the mode-aware header assembly shared by every request.

// self
use crate::{
	auth::{ApiKey, AuthMode, UserId, UserSignature},
	http::HeaderSet,
};

/// Frontend API key header.
pub const API_KEY: &str = "X-API-Key";
/// Backend bearer header.
pub const AUTHORIZATION: &str = "Authorization";
/// Acting user header.
pub const USER_ID: &str = "X-User-ID";
/// User signature header.
pub const USER_SIGNATURE: &str = "X-User-Signature";
/// Body media type header.
pub const CONTENT_TYPE: &str = "Content-Type";

const JSON: &str = "application/json";

/// Returns `true` for headers whose values must never be logged.
pub fn is_sensitive(name: &str) -> bool {
	[API_KEY, AUTHORIZATION, USER_SIGNATURE].iter().any(|known| known.eq_ignore_ascii_case(name))
}

/// Formats a bearer credential.
pub fn bearer(api_key: &ApiKey) -> String {
	format!("Bearer {}", api_key.expose())
}

/// Builds the headers for one request.
///
/// The key travels as `X-API-Key` in frontend mode and as `Authorization: Bearer` in backend mode.
/// `Content-Type` is only set when a body is sent.
pub fn build(
	mode: AuthMode,
	api_key: Option<&ApiKey>,
	user_id: Option<&UserId>,
	signature: Option<&UserSignature>,
	has_body: bool,
) -> HeaderSet {
	let mut headers = HeaderSet::new();

	if let Some(key) = api_key {
		match mode {
			AuthMode::Frontend => headers.insert(API_KEY, key.expose()),
			AuthMode::Backend => headers.insert(AUTHORIZATION, bearer(key)),
		}
	}
	if let Some(user) = user_id {
		headers.insert(USER_ID, user.to_string());
	}
	if let Some(signature) = signature {
		headers.insert(USER_SIGNATURE, signature.expose());
	}
	if has_body {
		headers.insert(CONTENT_TYPE, JSON);
	}

	headers
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn frontend_headers_use_api_key() {
		let key = ApiKey::new("pk-frontend");
		let user = UserId::new("alice").expect("User fixture should be valid.");
		let signature = UserSignature::new("sig-alice");
		let headers = build(AuthMode::Frontend, Some(&key), Some(&user), Some(&signature), true);
		let names = headers.iter().map(|(name, _)| name).collect::<Vec<_>>();

		assert_eq!(names, [API_KEY, USER_ID, USER_SIGNATURE, CONTENT_TYPE]);
		assert_eq!(headers.get(API_KEY), Some("pk-frontend"));
		assert_eq!(headers.get(USER_SIGNATURE), Some("sig-alice"));
		assert_eq!(headers.get(CONTENT_TYPE), Some("application/json"));
		assert!(!headers.contains(AUTHORIZATION));
	}

	#[test]
	fn backend_headers_use_bearer_and_skip_content_type_without_body() {
		let key = ApiKey::new("sk-backend");
		let user = UserId::new("bob").expect("User fixture should be valid.");
		let headers = build(AuthMode::Backend, Some(&key), Some(&user), None, false);

		assert_eq!(headers.get(AUTHORIZATION), Some("Bearer sk-backend"));
		assert_eq!(headers.get(USER_ID), Some("bob"));
		assert!(!headers.contains(API_KEY));
		assert!(!headers.contains(USER_SIGNATURE));
		assert!(!headers.contains(CONTENT_TYPE));
	}

	#[test]
	fn anonymous_requests_without_key_carry_no_headers() {
		assert!(build(AuthMode::Frontend, None, None, None, false).is_empty());
		assert!(is_sensitive("authorization"));
		assert!(!is_sensitive(USER_ID));
	}
}
