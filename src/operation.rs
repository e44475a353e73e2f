//! Top-level operations
//!
//! An [`Operation`] is a root [`Field`] tagged with a kind. It always renders
//! its child block and wraps the result in `query { ... }` or
//! `mutation { ... }`.

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::error::{GqlError, GqlResult};
use crate::field::Field;
use crate::literal::EnumValue;
use crate::node::Node;

/// Kind of a top-level operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// Lowercase keyword opening the operation body
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl EnumValue for OperationKind {
    fn symbol(&self) -> Cow<'_, str> {
        match self {
            OperationKind::Query => Cow::Borrowed("QUERY"),
            OperationKind::Mutation => Cow::Borrowed("MUTATION"),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for OperationKind {
    type Err = GqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query" => Ok(OperationKind::Query),
            "mutation" => Ok(OperationKind::Mutation),
            other => Err(GqlError::config(format!("unknown operation kind: {}", other))),
        }
    }
}

impl TryFrom<String> for OperationKind {
    type Error = GqlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Request payload handed to a GraphQL transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, JsonValue>,
}

/// A query or mutation over a root field.
///
/// Dereferences to the root [`Field`], so every field builder method is
/// available directly on the operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    root: Field,
    query_variables: IndexMap<String, JsonValue>,
}

impl Operation {
    pub fn new(kind: OperationKind, name: impl Into<String>) -> GqlResult<Self> {
        Ok(Self {
            kind,
            root: Field::new(name)?,
            query_variables: IndexMap::new(),
        })
    }

    pub fn query(name: impl Into<String>) -> GqlResult<Self> {
        Self::new(OperationKind::Query, name)
    }

    pub fn mutation(name: impl Into<String>) -> GqlResult<Self> {
        Self::new(OperationKind::Mutation, name)
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn root(&self) -> &Field {
        &self.root
    }

    pub fn into_root(self) -> Field {
        self.root
    }

    /// Record a variable for the caller's variables payload.
    ///
    /// Variables never appear in [`Operation::format_body`]; they are only
    /// carried into [`Operation::to_request`].
    pub fn add_query_variable(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> &mut Self {
        self.query_variables.insert(key.into(), value.into());
        self
    }

    pub fn query_variables(&self) -> &IndexMap<String, JsonValue> {
        &self.query_variables
    }

    /// Render `<kind> { <name>[ (args)] { <children> } }`.
    ///
    /// The child block is always present, even when empty.
    pub fn format_body(&self) -> String {
        let mut body = self.root.name().to_string();

        if !self.root.arguments().is_empty() {
            body = self.root.format_arguments(&body);
        }

        body = self.root.format_children(&body);

        let body = format!("{} {{ {} }}", self.kind.keyword(), body);
        debug!(kind = %self.kind, name = %self.root.name(), "rendered operation");
        body
    }

    /// Body plus recorded variables, ready for a transport
    pub fn to_request(&self) -> GraphQlRequest {
        GraphQlRequest {
            query: self.format_body(),
            variables: self
                .query_variables
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn to_request_json(&self) -> GqlResult<String> {
        Ok(serde_json::to_string(&self.to_request())?)
    }
}

impl Deref for Operation {
    type Target = Field;

    fn deref(&self) -> &Field {
        &self.root
    }
}

impl DerefMut for Operation {
    fn deref_mut(&mut self) -> &mut Field {
        &mut self.root
    }
}

impl Node for Operation {
    fn name(&self) -> &str {
        self.root.name()
    }

    fn arguments(&self) -> &IndexMap<String, String> {
        self.root.arguments()
    }

    fn format_body(&self) -> String {
        Operation::format_body(self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_body())
    }
}
