//! Query adapter for select-expression document stores.
//!
//! These stores address a document by a single item name, support a column
//! projection and sort on the server. All attribute values are strings on
//! the wire, so every bound value is rendered quoted.

use std::num::NonZeroU64;

use super::value::LiteralStyle;
use super::{Connective, Direction, QueryAdapter, Value};
use crate::error::{CloudError, InvalidArgument};

const ITEM_NAME_CONDITION: &str = "itemName() = ?";

/// Native select expression, rendered with [`SelectExpression::to_expression`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectExpression {
    fields: Vec<String>,
    domain: Option<String>,
    conditions: Vec<(Connective, String)>,
    order: Option<(String, Direction)>,
    limit: Option<u64>,
}

impl SelectExpression {
    /// Creates an empty expression selecting every attribute.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the projection. An empty slice selects every attribute.
    pub fn fields(&mut self, fields: &[&str]) {
        self.fields = fields.iter().map(|field| (*field).to_owned()).collect();
    }

    /// Sets the domain queried.
    pub fn from(&mut self, domain: &str) {
        self.domain = Some(domain.to_owned());
    }

    /// Appends a condition, binding `values` to its `?` placeholders.
    pub fn where_(&mut self, condition: &str, values: &[Value], connective: Connective) {
        let mut bound = values.iter();
        let mut pieces = condition.split('?');
        let mut rendered = pieces.next().unwrap_or_default().to_owned();
        for piece in pieces {
            match bound.next() {
                Some(value) => rendered.push_str(&value.to_literal(LiteralStyle::Text)),
                None => rendered.push('?'),
            }
            rendered.push_str(piece);
        }
        self.conditions.push((connective, rendered));
    }

    /// Restricts the expression to a single item.
    pub fn where_item_name(&mut self, name: &Value) {
        self.where_(ITEM_NAME_CONDITION, std::slice::from_ref(name), Connective::And);
    }

    /// Sorts on `field`. A later call replaces an earlier one.
    pub fn order_by(&mut self, field: &str, direction: Direction) {
        self.order = Some((field.to_owned(), direction));
    }

    /// Caps the number of returned items.
    pub fn limit(&mut self, count: u64) {
        self.limit = Some(count);
    }

    /// Projection, empty when every attribute is selected.
    #[must_use]
    pub fn projection(&self) -> &[String] {
        &self.fields
    }

    /// Requested sort, if any.
    #[must_use]
    pub fn sort(&self) -> Option<(&str, Direction)> {
        self.order
            .as_ref()
            .map(|(field, direction)| (field.as_str(), *direction))
    }

    /// Renders the full select expression.
    #[must_use]
    pub fn to_expression(&self) -> String {
        let projection = if self.fields.is_empty() {
            String::from("*")
        } else {
            self.fields.join(", ")
        };
        let mut expression = format!(
            "select {projection} from `{}`",
            self.domain.as_deref().unwrap_or_default()
        );

        for (index, (connective, condition)) in self.conditions.iter().enumerate() {
            if index == 0 {
                expression.push_str(" where ");
            } else {
                expression.push(' ');
                expression.push_str(connective.as_str());
                expression.push(' ');
            }
            expression.push_str(condition);
        }
        if let Some((field, direction)) = &self.order {
            expression.push_str(&format!(" order by {field} {}", direction.as_str()));
        }
        if let Some(limit) = self.limit {
            expression.push_str(&format!(" limit {limit}"));
        }
        expression
    }
}

/// [`QueryAdapter`] over a [`SelectExpression`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectQuery {
    native: SelectExpression,
}

impl SelectQuery {
    /// Creates an adapter around an empty expression.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutably borrows the native expression.
    pub const fn native_mut(&mut self) -> &mut SelectExpression {
        &mut self.native
    }
}

impl QueryAdapter for SelectQuery {
    type Native = SelectExpression;

    fn select(&mut self, fields: &[&str]) -> &mut Self {
        self.native.fields(fields);
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
        self.native
            .where_(condition, &value.into().into_sequence(), connective);
        self
    }

    fn where_id(&mut self, id: impl Into<Value>) -> Result<&mut Self, CloudError> {
        let id = id.into();
        if id.as_str().is_none_or(str::is_empty) {
            return Err(InvalidArgument::InvalidDocumentKey(String::from(
                "expected a non-empty item name",
            ))
            .into());
        }
        self.native.where_item_name(&id);
        Ok(self)
    }

    fn limit(&mut self, limit: NonZeroU64) -> &mut Self {
        self.native.limit(limit.get());
        self
    }

    fn order(&mut self, field: &str, direction: Direction) -> Result<&mut Self, CloudError> {
        self.native.order_by(field, direction);
        Ok(self)
    }

    fn assemble(&self) -> &SelectExpression {
        &self.native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_clause_in_order() {
        let mut expression = SelectExpression::new();
        expression.fields(&["name", "age"]);
        expression.from("people");
        expression.where_("age > ?", &[Value::Int(30)], Connective::And);
        expression.where_("name = ?", &[Value::from("O'Hara")], Connective::Or);
        expression.order_by("age", Direction::Desc);
        expression.limit(5);

        assert_eq!(
            expression.to_expression(),
            "select name, age from `people` where age > '30' or name = 'O''Hara' \
             order by age desc limit 5"
        );
    }

    #[test]
    fn empty_projection_selects_everything() {
        let mut expression = SelectExpression::new();
        expression.from("people");
        assert_eq!(expression.to_expression(), "select * from `people`");
    }

    #[test]
    fn binds_multiple_placeholders() {
        let mut expression = SelectExpression::new();
        expression.from("d");
        expression.where_(
            "a = ? and b = ?",
            &[Value::from("x"), Value::from("y")],
            Connective::And,
        );
        assert_eq!(
            expression.to_expression(),
            "select * from `d` where a = 'x' and b = 'y'"
        );
    }
}
