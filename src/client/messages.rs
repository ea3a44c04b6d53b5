//! Message operations, scoped to one thread.

// self
use crate::{
	_prelude::*,
	auth::{MessageKey, ThreadKey, UserContext},
	client::{self, Client},
	http::{ApiHttpClient, HttpMethod},
	model::{
		KeyResponse, ListQuery, Message, MessageCreate, MessageList, MessageResponse, MessageUpdate,
	},
	obs::OpKind,
};

const THREADS: &str = "threads";
const MESSAGES: &str = "messages";

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Appends a message to `thread` and returns its key.
	pub async fn create_message(
		&self,
		ctx: &UserContext,
		thread: &ThreadKey,
		message: &MessageCreate,
	) -> Result<KeyResponse> {
		client::observe(OpKind::CreateMessage, "create_message", async move {
			let body = client::encode(message)?;
			let url = self.frontend_url(&[THREADS, thread.as_str(), MESSAGES], None);
			let response = self.send(HttpMethod::Post, url, Some(ctx), Some(body)).await?;

			client::decode(response)
		})
		.await
	}

	/// Lists messages in `thread`. The query is validated before any I/O.
	pub async fn list_messages(
		&self,
		ctx: &UserContext,
		thread: &ThreadKey,
		query: &ListQuery,
	) -> Result<MessageList> {
		client::observe(OpKind::ListMessages, "list_messages", async move {
			query.validate()?;

			let url = self.frontend_url(&[THREADS, thread.as_str(), MESSAGES], Some(query));
			let response = self.send(HttpMethod::Get, url, Some(ctx), None).await?;

			client::decode(response)
		})
		.await
	}

	/// Fetches one message.
	pub async fn get_message(
		&self,
		ctx: &UserContext,
		thread: &ThreadKey,
		key: &MessageKey,
	) -> Result<Message> {
		client::observe(OpKind::GetMessage, "get_message", async move {
			let url = self.frontend_url(&[THREADS, thread.as_str(), MESSAGES, key.as_str()], None);
			let response = self.send(HttpMethod::Get, url, Some(ctx), None).await?;

			client::decode::<MessageResponse>(response).map(|wrapper| wrapper.message)
		})
		.await
	}

	/// Replaces the body of a message.
	pub async fn update_message(
		&self,
		ctx: &UserContext,
		thread: &ThreadKey,
		key: &MessageKey,
		update: &MessageUpdate,
	) -> Result<KeyResponse> {
		client::observe(OpKind::UpdateMessage, "update_message", async move {
			let body = client::encode(update)?;
			let url = self.frontend_url(&[THREADS, thread.as_str(), MESSAGES, key.as_str()], None);
			let response = self.send(HttpMethod::Put, url, Some(ctx), Some(body)).await?;

			client::decode(response)
		})
		.await
	}

	/// Deletes a message. Returns `None` when the service answers `204 No Content`.
	pub async fn delete_message(
		&self,
		ctx: &UserContext,
		thread: &ThreadKey,
		key: &MessageKey,
	) -> Result<Option<KeyResponse>> {
		client::observe(OpKind::DeleteMessage, "delete_message", async move {
			let url = self.frontend_url(&[THREADS, thread.as_str(), MESSAGES, key.as_str()], None);
			let response = self.send(HttpMethod::Delete, url, Some(ctx), None).await?;

			client::decode_optional(response)
		})
		.await
	}
}
