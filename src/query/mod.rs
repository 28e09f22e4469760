//! Provider-neutral document query contract.
//!
//! Every backend implements [`QueryAdapter`] by wrapping its own native
//! builder and mutating it in place on each call. [`QueryAdapter::assemble`]
//! then hands out that builder, ready for the provider client.

mod select;
mod table;
mod value;

use std::fmt;
use std::num::NonZeroU64;

use crate::error::CloudError;

pub use select::{SelectExpression, SelectQuery};
pub use table::{NativeTableQuery, TableEntityQuery, TableFilter, TableQuery};
pub use value::Value;

/// Boolean connective joining a predicate to the ones before it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Connective {
    /// Logical AND.
    #[default]
    And,
    /// Logical OR.
    Or,
}

impl Connective {
    /// Lowercase keyword as it appears in rendered filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for [`QueryAdapter::order`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Lowercase keyword as it appears in rendered queries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Operations every backend query adapter provides.
///
/// Infallible calls return `&mut Self` for chaining; calls that can reject
/// input or a missing capability return a [`Result`] and leave the native
/// builder untouched on error.
pub trait QueryAdapter {
    /// Backend-native query object produced by [`QueryAdapter::assemble`].
    type Native;

    /// Requests a column projection. Backends without projection accept
    /// the call and do nothing.
    fn select(&mut self, fields: &[&str]) -> &mut Self;

    /// Sets the target collection.
    fn from(&mut self, collection: &str) -> &mut Self;

    /// Adds a predicate joined to the previous ones with `connective`.
    ///
    /// A scalar `value` is normalized into a single-element sequence
    /// before reaching the native builder; sequences pass through.
    fn where_with(
        &mut self,
        condition: &str,
        value: impl Into<Value>,
        connective: Connective,
    ) -> &mut Self;

    /// Adds a predicate joined with [`Connective::And`].
    fn where_(&mut self, condition: &str, value: impl Into<Value>) -> &mut Self {
        self.where_with(condition, value, Connective::And)
    }

    /// Restricts the query to one document by its backend-specific key.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::InvalidArgument`] when `id` does not have the
    /// shape the backend expects.
    fn where_id(&mut self, id: impl Into<Value>) -> Result<&mut Self, CloudError>;

    /// Caps the number of returned rows.
    fn limit(&mut self, limit: NonZeroU64) -> &mut Self;

    /// Requests server-side sorting.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::OperationNotAvailable`] when the backend cannot
    /// sort. No client-side fallback is attempted.
    fn order(&mut self, field: &str, direction: Direction) -> Result<&mut Self, CloudError>;

    /// Returns the native query object. Pure and idempotent.
    fn assemble(&self) -> &Self::Native;
}
