//! List query parameters shared by thread and message listings.

// self
use crate::_prelude::*;

/// Largest page size the service accepts.
pub const MAX_LIMIT: u32 = 100;

/// Errors raised when a list query fails local validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum QueryError {
	/// The page size is outside `1..=100`.
	#[error("Limit {limit} is outside the accepted range 1..={max}.")]
	LimitOutOfRange {
		/// Requested page size.
		limit: u32,
		/// Largest accepted page size.
		max: u32,
	},
	/// A cursor was supplied without a value.
	#[error("The `{name}` cursor cannot be empty.")]
	EmptyCursor {
		/// Cursor parameter name.
		name: &'static str,
	},
}

/// Pagination cursor; at most one may accompany a query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cursor {
	/// Items before the given anchor.
	Before(String),
	/// Items after the given anchor.
	After(String),
	/// Items surrounding the given anchor.
	Anchor(String),
}
impl Cursor {
	/// Query parameter name carrying the cursor.
	pub const fn name(&self) -> &'static str {
		match self {
			Cursor::Before(_) => "before",
			Cursor::After(_) => "after",
			Cursor::Anchor(_) => "anchor",
		}
	}

	/// Anchor value.
	pub fn value(&self) -> &str {
		match self {
			Cursor::Before(value) | Cursor::After(value) | Cursor::Anchor(value) => value,
		}
	}
}

/// Sort key for list results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
	/// Creation time.
	#[default]
	CreatedTs,
	/// Last update time.
	UpdatedTs,
}
impl SortBy {
	/// Returns the wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			SortBy::CreatedTs => "created_ts",
			SortBy::UpdatedTs => "updated_ts",
		}
	}
}
impl Display for SortBy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Filters and paging for list operations. The default query sends no parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
	/// Page size.
	pub limit: Option<u32>,
	/// Pagination cursor.
	pub cursor: Option<Cursor>,
	/// Sort key.
	pub sort_by: Option<SortBy>,
}
impl ListQuery {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the page size.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Pages backwards from `anchor`, replacing any other cursor.
	pub fn before(mut self, anchor: impl Into<String>) -> Self {
		self.cursor = Some(Cursor::Before(anchor.into()));

		self
	}

	/// Pages forwards from `anchor`, replacing any other cursor.
	pub fn after(mut self, anchor: impl Into<String>) -> Self {
		self.cursor = Some(Cursor::After(anchor.into()));

		self
	}

	/// Centers the page on `anchor`, replacing any other cursor.
	pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
		self.cursor = Some(Cursor::Anchor(anchor.into()));

		self
	}

	/// Sets the sort key.
	pub fn sort_by(mut self, sort_by: SortBy) -> Self {
		self.sort_by = Some(sort_by);

		self
	}

	/// Checks the query against the service's accepted ranges.
	pub fn validate(&self) -> Result<(), QueryError> {
		if let Some(limit) = self.limit.filter(|limit| !(1..=MAX_LIMIT).contains(limit)) {
			return Err(QueryError::LimitOutOfRange { limit, max: MAX_LIMIT });
		}
		if let Some(cursor) = self.cursor.as_ref().filter(|cursor| cursor.value().trim().is_empty()) {
			return Err(QueryError::EmptyCursor { name: cursor.name() });
		}

		Ok(())
	}

	/// Encodes the query as URL pairs in the order `limit`, cursor, `sort_by`.
	pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::new();

		if let Some(limit) = self.limit {
			pairs.push(("limit", limit.to_string()));
		}
		if let Some(cursor) = &self.cursor {
			pairs.push((cursor.name(), cursor.value().to_owned()));
		}
		if let Some(sort_by) = self.sort_by {
			pairs.push(("sort_by", sort_by.as_str().to_owned()));
		}

		pairs
	}
}
