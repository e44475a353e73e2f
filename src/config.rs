//! Operations documents
//!
//! Operations can be declared in TOML instead of code:
//!
//! ```toml
//! [[operation]]
//! name = "items"
//! kind = "query"
//! fields = ["id", "name", "column_values.id"]
//!
//! [operation.arguments]
//! limit = 25
//! state = { enum = "ACTIVE" }
//!
//! [operation.field_arguments."column_values"]
//! ids = ["status"]
//!
//! [operation.variables]
//! cursor = "abc"
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{GqlError, GqlResult};
use crate::field::Field;
use crate::literal::Literal;
use crate::operation::{Operation, OperationKind};

/// A file holding any number of operation declarations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationsFile {
    #[serde(default, rename = "operation")]
    pub operations: Vec<OperationConfig>,
}

/// One declared operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Root field name
    pub name: String,
    /// Lookup key when several operations share a root field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "default_kind")]
    pub kind: OperationKind,
    /// Shorthand paths, merged in order
    #[serde(default)]
    pub fields: Vec<String>,
    /// Arguments on the root field
    #[serde(default)]
    pub arguments: toml::Table,
    /// Arguments on nested fields, keyed by dotted path
    #[serde(default)]
    pub field_arguments: toml::Table,
    /// Variables routed into the request payload
    #[serde(default)]
    pub variables: toml::Table,
}

fn default_kind() -> OperationKind {
    OperationKind::Query
}

impl OperationsFile {
    /// Load an operations file
    pub fn from_file<P: AsRef<Path>>(path: P) -> GqlResult<Self> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    /// Save to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> GqlResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Find an operation by label, falling back to its root field name
    pub fn find(&self, key: &str) -> Option<&OperationConfig> {
        self.operations
            .iter()
            .find(|op| op.label.as_deref() == Some(key))
            .or_else(|| self.operations.iter().find(|op| op.name == key))
    }

    /// Build every declared operation in file order
    pub fn build_all(&self) -> GqlResult<Vec<Operation>> {
        self.operations.iter().map(OperationConfig::build).collect()
    }
}

impl FromStr for OperationsFile {
    type Err = GqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl OperationConfig {
    /// Lookup key of this declaration
    pub fn key(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn build(&self) -> GqlResult<Operation> {
        let mut operation = Operation::new(self.kind, self.name.as_str())?;
        operation.add_fields(&self.fields);
        apply_arguments(&mut operation, &self.arguments)?;

        for (path, value) in &self.field_arguments {
            let table = value.as_table().ok_or_else(|| {
                GqlError::config(format!("field_arguments.{} must be a table", path))
            })?;
            operation.add_field(path.as_str());
            let field = operation.get_field_mut(path).ok_or_else(|| {
                GqlError::config(format!("field_arguments.{} is not a usable path", path))
            })?;
            apply_arguments(field, table)?;
        }

        for (key, value) in &self.variables {
            operation.add_query_variable(key.as_str(), toml_to_json(value));
        }

        debug!(key = %self.key(), kind = %self.kind, "built operation from configuration");
        Ok(operation)
    }
}

fn apply_arguments(field: &mut Field, arguments: &toml::Table) -> GqlResult<()> {
    for (key, value) in arguments {
        let literal = toml_to_literal(key, value)?;
        field.add_argument(key.as_str(), literal);
    }
    Ok(())
}

/// Map a TOML value onto an argument literal.
///
/// `{ enum = "SYM" }` gives an enumeration literal and `{ json = ... }` an
/// object literal; any other table is treated as an object.
pub fn toml_to_literal(key: &str, value: &toml::Value) -> GqlResult<Literal> {
    let literal = match value {
        toml::Value::String(text) => Literal::String(text.clone()),
        toml::Value::Integer(number) => Literal::raw(number),
        toml::Value::Float(number) => Literal::from(*number),
        toml::Value::Boolean(flag) => Literal::raw(flag),
        toml::Value::Datetime(datetime) => Literal::String(datetime.to_string()),
        toml::Value::Array(items) => {
            let items = items
                .iter()
                .map(|item| toml_to_literal(key, item))
                .collect::<GqlResult<Vec<Literal>>>()?;
            Literal::from(items)
        }
        toml::Value::Table(table) if table.len() == 1 && table.contains_key("enum") => {
            match table.get("enum") {
                Some(toml::Value::String(symbol)) => Literal::Enum(symbol.clone()),
                _ => {
                    return Err(GqlError::config(format!(
                        "argument {}: enum symbol must be a string",
                        key
                    )))
                }
            }
        }
        toml::Value::Table(table) if table.len() == 1 && table.contains_key("json") => {
            Literal::Json(table.get("json").map(toml_to_json).unwrap_or(JsonValue::Null))
        }
        toml::Value::Table(_) => Literal::Json(toml_to_json(value)),
    };
    Ok(literal)
}

/// Convert TOML into JSON, keeping table order
pub fn toml_to_json(value: &toml::Value) -> JsonValue {
    match value {
        toml::Value::String(text) => JsonValue::String(text.clone()),
        toml::Value::Integer(number) => JsonValue::from(*number),
        toml::Value::Float(number) => serde_json::Number::from_f64(*number)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        toml::Value::Boolean(flag) => JsonValue::Bool(*flag),
        toml::Value::Datetime(datetime) => JsonValue::String(datetime.to_string()),
        toml::Value::Array(items) => JsonValue::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => JsonValue::Object(
            table
                .iter()
                .map(|(key, item)| (key.clone(), toml_to_json(item)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ITEMS: &str = r#"
[[operation]]
name = "items"
fields = ["id", "name", "column_values.id", "column_values.text"]

[operation.arguments]
limit = 25
state = { enum = "ACTIVE" }
newest_first = true

[operation.field_arguments."column_values"]
ids = ["status", "date"]

[operation.variables]
cursor = "abc"

[[operation]]
name = "change_column_value"
label = "set_status"
kind = "mutation"
fields = ["id"]

[operation.arguments]
item_id = 7
value = { json = { label = "Done" } }
"#;

    #[test]
    fn test_parse_and_build_query() {
        let file: OperationsFile = ITEMS.parse().unwrap();
        assert_eq!(file.operations.len(), 2);

        let op = file.find("items").unwrap().build().unwrap();
        assert_eq!(
            op.format_body(),
            "query { items (limit:25, state:ACTIVE, newest_first:true) \
             { id, name, column_values (ids:[\"status\", \"date\"]) { id, text } } }"
        );
        assert_eq!(op.query_variables().get("cursor"), Some(&json!("abc")));
    }

    #[test]
    fn test_find_by_label() {
        let file: OperationsFile = ITEMS.parse().unwrap();
        let config = file.find("set_status").unwrap();
        assert_eq!(config.key(), "set_status");

        let op = config.build().unwrap();
        assert_eq!(op.kind(), OperationKind::Mutation);
        assert_eq!(
            op.format_body(),
            r#"mutation { change_column_value (item_id:7, value:"{\"label\": \"Done\"}") { id } }"#
        );
        assert!(file.find("missing").is_none());
    }

    #[test]
    fn test_plain_table_is_json() {
        let value: toml::Value = toml::from_str::<toml::Table>("v = { a = 1, b = \"x\" }")
            .unwrap()
            .remove("v")
            .unwrap();
        let literal = toml_to_literal("v", &value).unwrap();
        assert_eq!(literal, Literal::Json(json!({"a": 1, "b": "x"})));
    }

    #[test]
    fn test_float_keeps_fraction() {
        let file: OperationsFile = "[[operation]]\nname = \"items\"\n\
                                    [operation.arguments]\nweight = 1.0\nratio = 0.25\n"
            .parse()
            .unwrap();
        let op = file.build_all().unwrap().remove(0);
        assert_eq!(op.format_body(), "query { items (weight:1.0, ratio:0.25) {  } }");
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let file: OperationsFile = "[[operation]]\nname = \"archive_item\"\nkind = \"MUTATION\"\n"
            .parse()
            .unwrap();
        assert_eq!(file.operations[0].kind, OperationKind::Mutation);
        assert_eq!(
            file.build_all().unwrap()[0].format_body(),
            "mutation { archive_item {  } }"
        );
    }

    #[test]
    fn test_enum_must_be_string() {
        let value: toml::Value = toml::from_str::<toml::Table>("v = { enum = 3 }")
            .unwrap()
            .remove("v")
            .unwrap();
        assert!(matches!(toml_to_literal("v", &value), Err(GqlError::Config(_))));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result: GqlResult<OperationsFile> =
            "[[operation]]\nname = \"x\"\nkind = \"subscription\"\n".parse();
        assert!(matches!(result, Err(GqlError::Config(_))));
    }

    #[test]
    fn test_empty_name_rejected_at_build() {
        let file: OperationsFile = "[[operation]]\nname = \"\"\n".parse().unwrap();
        assert!(matches!(file.build_all(), Err(GqlError::InvalidArgument(_))));
    }
}
