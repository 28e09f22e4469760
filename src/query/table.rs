//! Query adapter for table-style storage addressed by partition and row key.
//!
//! The native builder speaks the OData filter dialect used by table
//! services. It has no server-side sort and no projection, so
//! [`TableQuery::order`] is rejected and [`TableQuery::select`] is a no-op.

use std::num::NonZeroU64;

use tracing::debug;

use super::value::LiteralStyle;
use super::{Connective, Direction, QueryAdapter, Value};
use crate::error::{CloudError, InvalidArgument};

const BACKEND: &str = "table";
const PARTITION_KEY_CONDITION: &str = "PartitionKey eq ?";
const ROW_KEY_CONDITION: &str = "RowKey eq ?";

/// Primitive operations a table service's native query builder exposes.
pub trait NativeTableQuery {
    /// Sets the table name.
    fn from(&mut self, table: &str);

    /// Appends a condition whose `?` placeholders bind `values` in order.
    fn where_(&mut self, condition: &str, values: Vec<Value>, connective: Connective);

    /// Appends an equality predicate on the partition key.
    fn where_partition_key(&mut self, value: Value);

    /// Appends an equality predicate on the row key.
    fn where_row_key(&mut self, value: Value);

    /// Caps the number of returned entities.
    fn top(&mut self, count: u64);
}

/// One predicate held by [`TableEntityQuery`].
#[derive(Clone, Debug, PartialEq)]
pub struct TableFilter {
    /// Condition text with `?` placeholders.
    pub condition: String,
    /// Values bound to the placeholders, in order.
    pub values: Vec<Value>,
    /// Connective joining this predicate to the previous one.
    pub connective: Connective,
}

impl TableFilter {
    fn render(&self) -> String {
        let mut values = self.values.iter().peekable();
        let mut rendered = String::with_capacity(self.condition.len());
        for ch in self.condition.chars() {
            match (ch, values.next_if(|_| ch == '?')) {
                (_, Some(value)) => rendered.push_str(&value.to_literal(LiteralStyle::Typed)),
                (other, None) => rendered.push(other),
            }
        }
        rendered
    }
}

/// Native table entity query: table name, ordered predicates and an
/// optional row cap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableEntityQuery {
    table: Option<String>,
    filters: Vec<TableFilter>,
    top: Option<u64>,
}

impl TableEntityQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target table, if set.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Predicates in insertion order.
    #[must_use]
    pub fn filters(&self) -> &[TableFilter] {
        &self.filters
    }

    /// Row cap, if set.
    #[must_use]
    pub const fn top_count(&self) -> Option<u64> {
        self.top
    }

    /// Renders the predicates as an OData `$filter` expression.
    #[must_use]
    pub fn to_filter(&self) -> String {
        let mut rendered = String::new();
        for filter in &self.filters {
            if !rendered.is_empty() {
                rendered.push(' ');
                rendered.push_str(filter.connective.as_str());
                rendered.push(' ');
            }
            rendered.push_str(&filter.render());
        }
        rendered
    }

    /// Renders the request path and query string, for example
    /// `Customers()?$filter=Name eq 'x'&$top=10`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        let filter = self.to_filter();
        if !filter.is_empty() {
            params.push(format!("$filter={filter}"));
        }
        if let Some(top) = self.top {
            params.push(format!("$top={top}"));
        }

        let path = format!("{}()", self.table.as_deref().unwrap_or_default());
        if params.is_empty() {
            path
        } else {
            format!("{path}?{}", params.join("&"))
        }
    }
}

impl NativeTableQuery for TableEntityQuery {
    fn from(&mut self, table: &str) {
        self.table = Some(table.to_owned());
    }

    fn where_(&mut self, condition: &str, values: Vec<Value>, connective: Connective) {
        self.filters.push(TableFilter {
            condition: condition.to_owned(),
            values,
            connective,
        });
    }

    fn where_partition_key(&mut self, value: Value) {
        self.where_(PARTITION_KEY_CONDITION, vec![value], Connective::And);
    }

    fn where_row_key(&mut self, value: Value) {
        self.where_(ROW_KEY_CONDITION, vec![value], Connective::And);
    }

    fn top(&mut self, count: u64) {
        self.top = Some(count);
    }
}

/// [`QueryAdapter`] over a table service's native builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableQuery<N = TableEntityQuery> {
    native: N,
}

impl TableQuery {
    /// Creates an adapter around a fresh [`TableEntityQuery`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NativeTableQuery> TableQuery<N> {
    /// Wraps an existing native builder.
    #[must_use]
    pub const fn with_native(native: N) -> Self {
        Self { native }
    }

    /// Borrows the native builder.
    #[must_use]
    pub const fn native(&self) -> &N {
        &self.native
    }

    /// Mutably borrows the native builder for operations the contract
    /// does not cover. Its state is always current.
    pub const fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }

    /// Consumes the adapter, returning the native builder.
    pub fn into_native(self) -> N {
        self.native
    }
}

impl<N: NativeTableQuery> QueryAdapter for TableQuery<N> {
    type Native = N;

    fn select(&mut self, _fields: &[&str]) -> &mut Self {
        self
    }

    fn from(&mut self, collection: &str) -> &mut Self {
        self.native.from(collection);
        self
    }

    fn where_with(
        &mut self,
        condition: &str,
        value: impl Into<Value>,
        connective: Connective,
    ) -> &mut Self {
        // Bare scalars are misrendered by some table services (numbers end
        // up quoted), so they always travel as a one-element sequence.
        self.native
            .where_(condition, value.into().into_sequence(), connective);
        self
    }

    fn where_id(&mut self, id: impl Into<Value>) -> Result<&mut Self, CloudError> {
        let Value::List(parts) = id.into() else {
            return Err(InvalidArgument::InvalidDocumentKey(String::from(
                "expected a (partition key, row key) pair",
            ))
            .into());
        };
        let [partition, row] = <[Value; 2]>::try_from(parts).map_err(|parts| {
            InvalidArgument::InvalidDocumentKey(format!(
                "expected a (partition key, row key) pair, got {} elements",
                parts.len()
            ))
        })?;

        self.native.where_partition_key(partition);
        self.native.where_row_key(row);
        Ok(self)
    }

    fn limit(&mut self, limit: NonZeroU64) -> &mut Self {
        self.native.top(limit.get());
        self
    }

    fn order(&mut self, field: &str, direction: Direction) -> Result<&mut Self, CloudError> {
        debug!(
            field,
            direction = direction.as_str(),
            "table backend rejected sort request"
        );
        Err(CloudError::not_available("order", BACKEND))
    }

    fn assemble(&self) -> &N {
        &self.native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_substitutes_placeholders_in_order() {
        let filter = TableFilter {
            condition: String::from("Age gt ? and Name eq ?"),
            values: vec![Value::Int(30), Value::from("Ann")],
            connective: Connective::And,
        };
        assert_eq!(filter.render(), "Age gt 30 and Name eq 'Ann'");
    }

    #[test]
    fn filter_leaves_unbound_placeholders() {
        let filter = TableFilter {
            condition: String::from("Name eq ?"),
            values: Vec::new(),
            connective: Connective::And,
        };
        assert_eq!(filter.render(), "Name eq ?");
    }

    #[test]
    fn query_string_joins_filter_and_top() {
        let mut native = TableEntityQuery::new();
        native.from("Customers");
        native.where_("Name eq ?", vec![Value::from("x")], Connective::And);
        native.where_("Age lt ?", vec![Value::Int(5)], Connective::Or);
        native.top(10);
        assert_eq!(
            native.to_query_string(),
            "Customers()?$filter=Name eq 'x' or Age lt 5&$top=10"
        );
    }

    #[test]
    fn query_string_without_params_is_bare_path() {
        let mut native = TableEntityQuery::new();
        native.from("Customers");
        assert_eq!(native.to_query_string(), "Customers()");
    }
}
