// self
use crate::_prelude::*;

/// Page metadata returned alongside list results.
///
/// Pass `before_anchor` as the next query's `after` cursor to page backwards and `after_anchor`
/// as `before` to page forwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
	/// Anchor of the first item in the page.
	pub before_anchor: Option<String>,
	/// Anchor of the last item in the page.
	pub after_anchor: Option<String>,
	/// Whether a previous page exists.
	pub has_before: bool,
	/// Whether a next page exists.
	pub has_after: bool,
	/// Items in this page.
	pub count: u64,
	/// Items available in total.
	pub total: u64,
}
