/// Specifies the direction for sorting documents.
///
/// # Purpose
/// Defines whether documents should be sorted in ascending (low to high) or
/// descending (high to low) order. Used in [crate::repository::FilterOptions]
/// to control result ordering.
///
/// # Usage
/// Used with the `order_by()` helper when querying repositories:
/// ```text
/// let options = order_by("age", SortOrder::Ascending);
/// let people = repo.filter(None, &options, &ctx)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}
