// self
use crate::{_prelude::*, auth::ThreadKey, model::Pagination};

/// Thread as returned by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thread {
	/// Thread key.
	pub key: ThreadKey,
	/// Display title.
	#[serde(default)]
	pub title: Option<String>,
	/// User that created the thread.
	#[serde(default)]
	pub author: Option<String>,
	/// Creation timestamp as reported by the server.
	#[serde(default)]
	pub created_ts: Option<i64>,
	/// Last update timestamp as reported by the server.
	#[serde(default)]
	pub updated_ts: Option<i64>,
	/// Soft-deletion marker.
	#[serde(default)]
	pub deleted: Option<bool>,
	/// Fields not modeled by this crate.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, Value>,
}

/// Body of a thread creation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadCreate {
	/// Display title.
	pub title: String,
}
impl ThreadCreate {
	/// Creates a request for a thread titled `title`.
	pub fn new(title: impl Into<String>) -> Self {
		Self { title: title.into() }
	}
}

/// Body of a thread update request; unset fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadUpdate {
	/// New display title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}
impl ThreadUpdate {
	/// Sets the new title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}
}

/// `{ "thread": ... }` wrapper returned by single-thread lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreadResponse {
	/// The thread.
	pub thread: Thread,
}

/// Page of threads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreadList {
	/// Threads in this page.
	#[serde(default)]
	pub threads: Vec<Thread>,
	/// Page metadata, when the server returns it.
	#[serde(default)]
	pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn thread_keeps_unknown_fields() {
		let thread: Thread = serde_json::from_str(
			"{\"key\":\"t1\",\"title\":\"General\",\"created_ts\":1700000000,\"kms\":{\"key_id\":\"k\"}}",
		)
		.expect("Thread payload should decode.");

		assert_eq!(thread.key.as_ref(), "t1");
		assert_eq!(thread.title.as_deref(), Some("General"));
		assert_eq!(thread.author, None);
		assert_eq!(thread.extra.get("kms"), Some(&serde_json::json!({ "key_id": "k" })));
	}

	#[test]
	fn empty_update_serializes_to_empty_object() {
		let encoded = serde_json::to_string(&ThreadUpdate::default())
			.expect("Thread update should serialize.");

		assert_eq!(encoded, "{}");
		assert_eq!(
			serde_json::to_string(&ThreadUpdate::default().title("Renamed"))
				.expect("Thread update should serialize."),
			"{\"title\":\"Renamed\"}"
		);
	}

	#[test]
	fn list_tolerates_missing_pagination() {
		let list: ThreadList =
			serde_json::from_str("{\"threads\":[]}").expect("Thread list should decode.");

		assert!(list.threads.is_empty());
		assert!(list.pagination.is_none());
	}
}
