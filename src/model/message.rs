// self
use crate::{
	_prelude::*,
	auth::{MessageKey, ThreadKey},
	model::Pagination,
};

/// Message as returned by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
	/// Message key.
	pub key: MessageKey,
	/// Key of the owning thread.
	#[serde(default)]
	pub thread: Option<ThreadKey>,
	/// User that wrote the message.
	#[serde(default)]
	pub author: Option<String>,
	/// Free-form role label such as `user` or `assistant`.
	#[serde(default)]
	pub role: Option<String>,
	/// Message payload; any JSON value.
	#[serde(default)]
	pub body: Value,
	/// Creation timestamp as reported by the server.
	#[serde(default)]
	pub created_ts: Option<i64>,
	/// Last update timestamp as reported by the server.
	#[serde(default)]
	pub updated_ts: Option<i64>,
	/// Key of the message this one replies to.
	#[serde(default)]
	pub reply_to: Option<String>,
	/// Soft-deletion marker.
	#[serde(default)]
	pub deleted: Option<bool>,
	/// Fields not modeled by this crate.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, Value>,
}

/// Body of a message creation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageCreate {
	/// Message payload; any JSON value.
	pub body: Value,
	/// Optional role label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Optional parent message key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reply_to: Option<String>,
}
impl MessageCreate {
	/// Creates a request carrying `body`.
	pub fn new(body: impl Into<Value>) -> Self {
		Self { body: body.into(), role: None, reply_to: None }
	}

	/// Sets the role label.
	pub fn role(mut self, role: impl Into<String>) -> Self {
		self.role = Some(role.into());

		self
	}

	/// Marks the message as a reply to `message`.
	pub fn reply_to(mut self, message: &MessageKey) -> Self {
		self.reply_to = Some(message.to_string());

		self
	}
}

/// Body of a message update request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageUpdate {
	/// Replacement payload.
	pub body: Value,
}
impl MessageUpdate {
	/// Creates an update replacing the body with `body`.
	pub fn new(body: impl Into<Value>) -> Self {
		Self { body: body.into() }
	}
}

/// `{ "message": ... }` wrapper returned by single-message lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
	/// The message.
	pub message: Message,
}

/// Page of messages within one thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageList {
	/// Key of the thread the messages belong to.
	#[serde(default)]
	pub thread: Option<ThreadKey>,
	/// Messages in this page.
	#[serde(default)]
	pub messages: Vec<Message>,
	/// Page metadata, when the server returns it.
	#[serde(default)]
	pub pagination: Option<Pagination>,
}
