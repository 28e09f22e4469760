//! Values bound to query predicates.

/// A value bound to a `?` placeholder in a predicate.
///
/// Scalars and sequences share one type so that the normalization rule
/// (scalar becomes a single-element sequence) is applied in one place,
/// [`Value::into_sequence`], before anything reaches a native builder.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No bound value; the condition carries no placeholders.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Signed integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// String literal.
    Str(String),
    /// Ordered sequence of values, one per placeholder.
    List(Vec<Self>),
}

impl Value {
    /// Normalizes into the sequence handed to native builders.
    ///
    /// Sequences pass through unchanged, scalars become a single-element
    /// sequence, and [`Value::Null`] becomes the empty sequence.
    #[must_use]
    pub fn into_sequence(self) -> Vec<Self> {
        match self {
            Self::Null => Vec::new(),
            Self::List(values) => values,
            scalar => vec![scalar],
        }
    }

    /// Returns `true` when the value is a [`Value::List`].
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the string payload, if this is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Renders the value as a predicate literal in `style`.
    ///
    /// Strings are single quoted with embedded quotes doubled; sequences
    /// render their members comma separated. Floats always carry a decimal
    /// point or exponent so they never collide with integers, and
    /// non-finite floats use the `NaN`, `INF` and `-INF` spellings.
    pub(crate) fn to_literal(&self, style: LiteralStyle) -> String {
        let bare = match self {
            Self::Null => return String::from("null"),
            Self::Str(value) => return format!("'{}'", value.replace('\'', "''")),
            Self::List(values) => {
                return values
                    .iter()
                    .map(|value| value.to_literal(style))
                    .collect::<Vec<_>>()
                    .join(", ");
            }
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => float_literal(*value),
        };
        match style {
            LiteralStyle::Typed => bare,
            LiteralStyle::Text => format!("'{bare}'"),
        }
    }
}

/// How numbers and booleans are written into a rendered predicate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LiteralStyle {
    /// Bare, typed literals (`7`, `2.5`, `true`).
    Typed,
    /// Every scalar quoted as a string (`'7'`), for stores whose attribute
    /// values are all strings.
    Text,
}

fn float_literal(value: f64) -> String {
    if value.is_nan() {
        String::from("NaN")
    } else if value.is_infinite() {
        String::from(if value.is_sign_negative() { "-INF" } else { "INF" })
    } else {
        format!("{value:?}")
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Self>, B: Into<Self>> From<(A, B)> for Value {
    fn from((first, second): (A, B)) -> Self {
        Self::List(vec![first.into(), second.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::{LiteralStyle, Value};

    #[test]
    fn scalar_becomes_single_element_sequence() {
        assert_eq!(Value::from(42).into_sequence(), vec![Value::Int(42)]);
        assert_eq!(
            Value::from("abc").into_sequence(),
            vec![Value::Str(String::from("abc"))]
        );
    }

    #[test]
    fn sequence_passes_through_unchanged() {
        let list = Value::from(vec![1, 2]);
        assert_eq!(list.into_sequence(), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn null_becomes_empty_sequence() {
        assert!(Value::Null.into_sequence().is_empty());
        assert!(Value::from(None::<i64>).into_sequence().is_empty());
    }

    #[test]
    fn typed_literal_escapes_single_quotes() {
        assert_eq!(Value::from("it's").to_literal(LiteralStyle::Typed), "'it''s'");
        assert_eq!(Value::from(7).to_literal(LiteralStyle::Typed), "7");
        assert_eq!(Value::from(true).to_literal(LiteralStyle::Typed), "true");
    }

    #[test]
    fn float_and_integer_render_differently() {
        let float = Value::Float(1.0).to_literal(LiteralStyle::Typed);
        let int = Value::Int(1).to_literal(LiteralStyle::Typed);
        assert_eq!(float, "1.0");
        assert_eq!(int, "1");
        assert_ne!(float, int);
        assert_eq!(Value::Float(2.5).to_literal(LiteralStyle::Typed), "2.5");
        assert_eq!(Value::Float(1e300).to_literal(LiteralStyle::Typed), "1e300");
    }

    #[test]
    fn non_finite_floats_use_odata_spellings() {
        assert_eq!(Value::Float(f64::NAN).to_literal(LiteralStyle::Typed), "NaN");
        assert_eq!(Value::Float(f64::INFINITY).to_literal(LiteralStyle::Typed), "INF");
        assert_eq!(
            Value::Float(f64::NEG_INFINITY).to_literal(LiteralStyle::Typed),
            "-INF"
        );
    }

    #[test]
    fn text_style_quotes_every_scalar() {
        assert_eq!(Value::Int(7).to_literal(LiteralStyle::Text), "'7'");
        assert_eq!(Value::Float(1.0).to_literal(LiteralStyle::Text), "'1.0'");
        assert_eq!(Value::Bool(false).to_literal(LiteralStyle::Text), "'false'");
        assert_eq!(Value::from("a'b").to_literal(LiteralStyle::Text), "'a''b'");
        assert_eq!(Value::Null.to_literal(LiteralStyle::Text), "null");
    }
}
