//! Pagination and list-query types for list endpoints.
//!
//! Every list endpoint accepts `{page, limit, sortBy, sortOrder}` plus
//! view-specific filters and returns a [`Paginated`] envelope. This is the
//! shared query composition used by all list views.

use serde::{Deserialize, Serialize};

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the wire representation of the sort order.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Composable query parameters for a paginated list request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text search filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Status filter (wire string, view-specific).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Field to sort by.
    #[serde(rename = "sortBy", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction.
    #[serde(rename = "sortOrder")]
    pub sort_order: SortOrder,
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            sort_by: None,
            sort_order: SortOrder::default(),
            page: 1,
            limit: 20,
        }
    }
}

impl ListQuery {
    /// Creates a query for the given page with the default limit.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    /// Sets the free-text search filter.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the sort field and direction.
    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }

    /// Serializes the query into URL query pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("sortOrder".to_string(), self.sort_order.as_str().to_string()),
        ];
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        pairs
    }
}

/// Pagination metadata returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number.
    pub page: u32,
    /// Total number of pages.
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    /// Total number of items across all pages.
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    /// Items per page.
    pub limit: u32,
}

/// Response envelope for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// The items in the current page.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub pagination: Pagination,
}
