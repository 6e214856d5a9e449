use crate::common::SortOrder;

/// Options controlling filtered-query operations.
///
/// `FilterOptions` carries pagination and ordering parameters. Zero and
/// empty are the "not set" sentinels: a zero `limit` means unbounded, a
/// zero `offset` means no skip, and an empty `sort` leaves results in the
/// store's natural order. Backends apply only the parts that are set.
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::common::SortOrder;
/// use docrepo::repository::{order_by, FilterOptions};
///
/// // Chained configuration
/// let options = FilterOptions::new()
///     .sort_by("age", SortOrder::Descending)
///     .offset(10)
///     .limit(20);
///
/// // Convenience helpers
/// let options = order_by("name", SortOrder::Ascending);
/// let options = skip_by(5);
/// let options = limit_to(100);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Maximum number of results to return; 0 means unbounded.
    pub limit: u64,
    /// Number of leading results to skip; 0 means none.
    pub offset: u64,
    /// Ordered list of (field, direction) pairs; empty means natural order.
    pub sort: Vec<(String, SortOrder)>,
}

impl FilterOptions {
    /// Creates options with nothing set.
    pub fn new() -> Self {
        FilterOptions::default()
    }

    /// Limits the number of results.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Skips a number of leading results.
    ///
    /// Combined with limit for pagination: `offset(10).limit(20)` returns
    /// results 11-30.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Appends a sort field. Earlier fields take precedence.
    pub fn sort_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort.push((field.to_string(), order));
        self
    }
}

/// Creates `FilterOptions` sorted by a field.
pub fn order_by(field: &str, order: SortOrder) -> FilterOptions {
    FilterOptions::new().sort_by(field, order)
}

/// Creates `FilterOptions` that skips a number of results.
pub fn skip_by(offset: u64) -> FilterOptions {
    FilterOptions::new().offset(offset)
}

/// Creates `FilterOptions` that limits the number of results.
pub fn limit_to(limit: u64) -> FilterOptions {
    FilterOptions::new().limit(limit)
}
