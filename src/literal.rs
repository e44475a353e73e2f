//! Argument literals
//!
//! Every argument value attached to a field is converted into a [`Literal`]
//! at insertion time. The variant decides how the value is written into the
//! request body, so rendering is a plain match with no type inspection.

use std::borrow::Cow;
use std::fmt;
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value as JsonValue;

use crate::error::GqlResult;

/// Serialized form of a single argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Text wrapped in double quotes. The contents are not escaped.
    String(String),
    /// Structured value, written as a JSON string literal holding its JSON text
    Json(JsonValue),
    /// Enumeration symbol, written bare
    Enum(String),
    /// Numbers, booleans and anything else, written bare
    Raw(String),
}

/// Enumerations usable as argument values.
///
/// The symbol is written into the request body unquoted.
pub trait EnumValue {
    fn symbol(&self) -> Cow<'_, str>;
}

impl Literal {
    /// Enumeration literal from any [`EnumValue`]
    pub fn enumeration<E: EnumValue + ?Sized>(value: &E) -> Self {
        Literal::Enum(value.symbol().into_owned())
    }

    /// Bare literal from anything printable
    pub fn raw(value: impl fmt::Display) -> Self {
        Literal::Raw(value.to_string())
    }

    /// Convert any serde-serializable value.
    ///
    /// The value goes through `serde_json::Value` first, so structs become
    /// [`Literal::Json`] and scalars keep their natural literal form.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> GqlResult<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Text of this literal as it appears inside an argument list.
    pub fn to_graphql(&self) -> String {
        match self {
            Literal::String(text) => format!("\"{}\"", text),
            // The object is JSON-encoded twice: the target servers expect
            // object arguments as a quoted, escaped JSON blob.
            Literal::Json(value) => JsonValue::String(dumps(value)).to_string(),
            Literal::Enum(symbol) => symbol.clone(),
            Literal::Raw(text) => text.clone(),
        }
    }
}

/// JSON text in the layout GraphQL servers of this family were written
/// against: `", "` and `": "` separators, and every non-ASCII character
/// written as a `\uXXXX` escape.
struct DumpsFormatter;

impl Formatter for DumpsFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn dumps(value: &JsonValue) -> String {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, DumpsFormatter);
    // Writing a `Value` into memory only fails on non-string map keys,
    // which `Value` cannot hold.
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| value.to_string())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_graphql())
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<&String> for Literal {
    fn from(value: &String) -> Self {
        Literal::String(value.clone())
    }
}

macro_rules! raw_literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::Raw(value.to_string())
                }
            }
        )*
    };
}

raw_literal_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool);

macro_rules! float_literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            // `Debug` keeps the fractional part (`1.0`, not `1`).
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::Raw(format!("{:?}", value))
                }
            }
        )*
    };
}

float_literal_from!(f32, f64);

impl From<JsonValue> for Literal {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(text) => Literal::String(text),
            JsonValue::Object(_) => Literal::Json(value),
            JsonValue::Array(items) => Literal::from(items),
            other => Literal::Raw(other.to_string()),
        }
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Literal::Raw("null".to_string()),
        }
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(values: Vec<T>) -> Self {
        let items: Vec<String> = values
            .into_iter()
            .map(|item| item.into().to_graphql())
            .collect();
        Literal::Raw(format!("[{}]", items.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    enum State {
        Active,
        Archived,
    }

    impl EnumValue for State {
        fn symbol(&self) -> Cow<'_, str> {
            match self {
                State::Active => Cow::Borrowed("ACTIVE"),
                State::Archived => Cow::Borrowed("ARCHIVED"),
            }
        }
    }

    #[test]
    fn test_string_literal_is_quoted() {
        assert_eq!(Literal::from("42").to_graphql(), "\"42\"");
        assert_eq!(Literal::from(String::from("x")).to_graphql(), "\"x\"");
    }

    #[test]
    fn test_string_literal_is_not_escaped() {
        // Escaping is the caller's job.
        assert_eq!(Literal::from("say \"hi\"").to_graphql(), "\"say \"hi\"\"");
    }

    #[test]
    fn test_object_literal_is_double_encoded() {
        let literal = Literal::from(json!({"a": 1}));
        assert_eq!(literal.to_graphql(), r#""{\"a\": 1}""#);
    }

    #[test]
    fn test_object_literal_keeps_insertion_order() {
        let literal = Literal::from(json!({"zeta": "z", "alpha": [1, 2]}));
        assert_eq!(literal.to_graphql(), r#""{\"zeta\": \"z\", \"alpha\": [1, 2]}""#);
    }

    #[test]
    fn test_object_literal_escapes_non_ascii() {
        let literal = Literal::from(json!({"a": 1, "b": "é"}));
        assert_eq!(literal.to_graphql(), r#""{\"a\": 1, \"b\": \"\\u00e9\"}""#);

        // Outside the BMP the escape is a UTF-16 surrogate pair.
        let literal = Literal::from(json!({"icon": "🚀", "nested": {"tab": "a\tb"}}));
        assert_eq!(
            literal.to_graphql(),
            r#""{\"icon\": \"\\ud83d\\ude80\", \"nested\": {\"tab\": \"a\\tb\"}}""#
        );
    }

    #[test]
    fn test_enum_literal_is_bare() {
        assert_eq!(Literal::enumeration(&State::Active).to_graphql(), "ACTIVE");
        assert_eq!(Literal::enumeration(&State::Archived).to_graphql(), "ARCHIVED");
    }

    #[test]
    fn test_scalars_are_raw() {
        assert_eq!(Literal::from(42).to_graphql(), "42");
        assert_eq!(Literal::from(1.5f64).to_graphql(), "1.5");
        assert_eq!(Literal::from(1.0f64).to_graphql(), "1.0");
        assert_eq!(Literal::from(2.0f32).to_graphql(), "2.0");
        assert_eq!(Literal::from(true).to_graphql(), "true");
        assert_eq!(Literal::from(None::<i32>).to_graphql(), "null");
    }

    #[test]
    fn test_json_scalars() {
        assert_eq!(Literal::from(json!("text")), Literal::String("text".to_string()));
        assert_eq!(Literal::from(json!(7)).to_graphql(), "7");
        assert_eq!(Literal::from(json!(1.0)).to_graphql(), "1.0");
        assert_eq!(Literal::from(json!([1, 2])).to_graphql(), "[1, 2]");
        assert_eq!(Literal::from(json!(["a", "b"])).to_graphql(), "[\"a\", \"b\"]");
        assert_eq!(Literal::from(json!(null)).to_graphql(), "null");
    }

    #[test]
    fn test_list_literal() {
        assert_eq!(Literal::from(vec![1, 2, 3]).to_graphql(), "[1, 2, 3]");
        assert_eq!(Literal::from(vec!["a", "b"]).to_graphql(), "[\"a\", \"b\"]");
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Options {
            limit: u32,
        }

        let literal = Literal::from_serialize(&Options { limit: 5 }).unwrap();
        assert_eq!(literal.to_graphql(), r#""{\"limit\": 5}""#);

        let literal = Literal::from_serialize("plain").unwrap();
        assert_eq!(literal.to_graphql(), "\"plain\"");
    }
}
