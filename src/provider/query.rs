//! Filter and sort compilation into the backend's query-string convention.
//!
//! Sorters compile to positional keys (`sort[0]=field:asc`, `sort[1]=…`);
//! filters compile to operator-suffixed keys (`title` for equality,
//! `title_ne`, `count_gte`, …). Both compilers are pure and total: empty
//! input produces no pairs, caller ordering is preserved (the output is an
//! ordered `Vec`, not a map), and the same input always compiles to the same
//! pairs.

use std::fmt;

use serde_json::Value;

/// Sort direction for a [`Sorter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// An abstract sort descriptor: a field and a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sorter {
    /// The field to sort by.
    pub field: String,
    /// The direction to sort in.
    pub order: SortOrder,
}

impl Sorter {
    /// Creates a new sorter.
    #[must_use]
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// A filter comparison operator.
///
/// Known operators map to their conventional key suffixes; the backend's
/// operator set is dynamically extensible, so [`FilterOperator::Other`]
/// passes any unrecognized operator through as a literal suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equality; compiles to the bare field key.
    Eq,
    /// Inequality (`_ne`).
    Ne,
    /// Less than (`_lt`).
    Lt,
    /// Greater than (`_gt`).
    Gt,
    /// Less than or equal (`_lte`).
    Lte,
    /// Greater than or equal (`_gte`).
    Gte,
    /// Membership in a list (`_in`).
    In,
    /// Substring match (`_contains`).
    Contains,
    /// Any other operator, passed through as a literal suffix.
    Other(String),
}

impl FilterOperator {
    /// Returns the key suffix for this operator (empty for equality).
    #[must_use]
    pub fn suffix(&self) -> String {
        match self {
            Self::Eq => String::new(),
            Self::Ne => "_ne".to_string(),
            Self::Lt => "_lt".to_string(),
            Self::Gt => "_gt".to_string(),
            Self::Lte => "_lte".to_string(),
            Self::Gte => "_gte".to_string(),
            Self::In => "_in".to_string(),
            Self::Contains => "_contains".to_string(),
            Self::Other(raw) => format!("_{raw}"),
        }
    }
}

/// An abstract filter descriptor: field, operator, and value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    /// The field to filter on.
    pub field: String,
    /// The comparison operator.
    pub operator: FilterOperator,
    /// The value to compare against.
    pub value: Value,
}

impl Filter {
    /// Creates a new filter.
    #[must_use]
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Compiles sorters into positional `sort[i]=field:direction` pairs.
///
/// # Example
///
/// ```rust
/// use cms_admin::{compile_sorters, SortOrder, Sorter};
///
/// let pairs = compile_sorters(&[
///     Sorter::new("title", SortOrder::Asc),
///     Sorter::new("id", SortOrder::Desc),
/// ]);
/// assert_eq!(
///     pairs,
///     vec![
///         ("sort[0]".to_string(), "title:asc".to_string()),
///         ("sort[1]".to_string(), "id:desc".to_string()),
///     ]
/// );
/// ```
#[must_use]
pub fn compile_sorters(sorters: &[Sorter]) -> Vec<(String, String)> {
    sorters
        .iter()
        .enumerate()
        .map(|(index, sorter)| {
            (
                format!("sort[{index}]"),
                format!("{}:{}", sorter.field, sorter.order),
            )
        })
        .collect()
}

/// Compiles filters into operator-suffixed key/value pairs.
///
/// Array values are joined with commas; scalar values are stringified.
///
/// # Example
///
/// ```rust
/// use cms_admin::{compile_filters, Filter, FilterOperator};
///
/// let pairs = compile_filters(&[
///     Filter::new("title", FilterOperator::Eq, "opening"),
///     Filter::new("count", FilterOperator::Gte, 2),
/// ]);
/// assert_eq!(
///     pairs,
///     vec![
///         ("title".to_string(), "opening".to_string()),
///         ("count_gte".to_string(), "2".to_string()),
///     ]
/// );
/// ```
#[must_use]
pub fn compile_filters(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| {
            let key = format!("{}{}", filter.field, filter.operator.suffix());
            (key, stringify_value(&filter.value))
        })
        .collect()
}

/// Renders a filter value as a query-string value.
fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
