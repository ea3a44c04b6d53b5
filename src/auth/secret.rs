//! Credential wrappers that redact sensitive material.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self::new(value)
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self::new(value)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! { ApiKey, "Frontend API key or backend bearer key." }
def_secret! { UserSignature, "Opaque signature proving the caller may act as a user; never parsed." }

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let signature = UserSignature::new("sig-super-secret");

		assert_eq!(format!("{signature:?}"), "UserSignature(\"<redacted>\")");
		assert_eq!(format!("{signature}"), "<redacted>");
		assert_eq!(signature.expose(), "sig-super-secret");
		assert_eq!(format!("{:?}", ApiKey::from("k")), "ApiKey(\"<redacted>\")");
	}
}
