//! Field selection trees
//!
//! A [`Field`] owns its children outright; there is no sharing and no cycles.
//! Children are kept in insertion order so the rendered body is deterministic.
//!
//! Nested selections can be built from dotted shorthand:
//!
//! ```
//! use catena_gql::Field;
//!
//! let mut items = Field::new("items").unwrap();
//! items.add_fields(["id", "column_values.id", "column_values.text"]);
//! assert_eq!(items.format_body(), "items { id, column_values { id, text } }");
//! ```

use std::fmt;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{GqlError, GqlResult};
use crate::literal::Literal;
use crate::node::Node;

/// Input accepted by [`Field::add_fields`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// Dot-delimited chain of names, merged into any existing children
    ShorthandPath(String),
    /// Complete child, replacing any existing child of the same name
    SubField(Field),
}

impl From<&str> for FieldSpec {
    fn from(path: &str) -> Self {
        FieldSpec::ShorthandPath(path.to_string())
    }
}

impl From<String> for FieldSpec {
    fn from(path: String) -> Self {
        FieldSpec::ShorthandPath(path)
    }
}

impl From<&String> for FieldSpec {
    fn from(path: &String) -> Self {
        FieldSpec::ShorthandPath(path.clone())
    }
}

impl From<Field> for FieldSpec {
    fn from(field: Field) -> Self {
        FieldSpec::SubField(field)
    }
}

/// A missing spec is skipped, the same as an empty path.
impl<T: Into<FieldSpec>> From<Option<T>> for FieldSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map(Into::into)
            .unwrap_or_else(|| FieldSpec::ShorthandPath(String::new()))
    }
}

/// A named selection with optional arguments and child selections.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    arguments: IndexMap<String, String>,
    children: IndexMap<String, Field>,
}

impl Field {
    /// Create a field with no arguments and no children.
    ///
    /// Fails with [`GqlError::InvalidArgument`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> GqlResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(GqlError::invalid_argument("field name must not be empty"));
        }
        Ok(Self::unchecked(name))
    }

    /// Shorthand paths may produce empty segments (".a", "a..b"); those are
    /// kept as empty-named children rather than rejected.
    pub(crate) fn unchecked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: IndexMap::new(),
            children: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &IndexMap<String, String> {
        &self.arguments
    }

    /// Literal text stored for an argument
    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }

    pub fn children(&self) -> impl Iterator<Item = &Field> {
        self.children.values()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Add every spec in order. See [`Field::add_field`].
    pub fn add_fields<I, S>(&mut self, specs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        for spec in specs {
            self.add_field(spec);
        }
        self
    }

    /// Add a single child selection.
    ///
    /// Shorthand paths create missing links and reuse existing ones, so
    /// `"a.b"` followed by `"a.c"` yields one `a` holding `b` and `c`.
    /// An explicit [`Field`] replaces any same-named child wholesale.
    pub fn add_field(&mut self, spec: impl Into<FieldSpec>) -> &mut Self {
        match spec.into() {
            FieldSpec::ShorthandPath(path) => self.merge_path(&path),
            FieldSpec::SubField(field) => {
                trace!(parent = %self.name, child = %field.name, "setting explicit child field");
                self.children.insert(field.name.clone(), field);
            }
        }
        self
    }

    fn merge_path(&mut self, path: &str) {
        if path.is_empty() {
            return;
        }

        let (head, rest) = path.split_once('.').unwrap_or((path, ""));
        let parent = &self.name;
        let child = self.children.entry(head.to_string()).or_insert_with(|| {
            trace!(parent = %parent, child = %head, "creating child field");
            Field::unchecked(head)
        });
        child.merge_path(rest);
    }

    /// Store each argument's literal text, overwriting repeated keys.
    pub fn add_arguments<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Literal>,
    {
        for (key, value) in pairs {
            self.add_argument(key, value);
        }
        self
    }

    pub fn add_argument(&mut self, key: impl Into<String>, value: impl Into<Literal>) -> &mut Self {
        self.arguments.insert(key.into(), value.into().to_graphql());
        self
    }

    /// Consuming form of [`Field::add_fields`], for building nested children inline
    pub fn with_fields<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldSpec>,
    {
        self.add_fields(specs);
        self
    }

    /// Consuming form of [`Field::add_arguments`]
    pub fn with_arguments<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Literal>,
    {
        self.add_arguments(pairs);
        self
    }

    /// Follow a dotted path through the children.
    ///
    /// Returns `None` as soon as a segment is missing.
    pub fn get_field(&self, path: &str) -> Option<&Field> {
        match path.split_once('.') {
            None => self.children.get(path),
            Some((head, rest)) => self.children.get(head)?.get_field(rest),
        }
    }

    pub fn get_field_mut(&mut self, path: &str) -> Option<&mut Field> {
        match path.split_once('.') {
            None => self.children.get_mut(path),
            Some((head, rest)) => self.children.get_mut(head)?.get_field_mut(rest),
        }
    }

    /// Detach a direct child
    pub fn remove_field(&mut self, name: &str) -> Option<Field> {
        self.children.shift_remove(name)
    }

    /// Render `name`, then the argument list if any, then the child block if any.
    pub fn format_body(&self) -> String {
        let mut body = self.name.clone();

        if !self.arguments.is_empty() {
            body = self.format_arguments(&body);
        }

        if !self.children.is_empty() {
            body = self.format_children(&body);
        }

        body
    }

    /// Append the brace-wrapped child block to `body`
    pub fn format_children(&self, body: &str) -> String {
        let children: Vec<String> = self.children.values().map(Field::format_body).collect();
        format!("{} {{ {} }}", body, children.join(", "))
    }
}

impl Node for Field {
    fn name(&self) -> &str {
        &self.name
    }

    fn arguments(&self) -> &IndexMap<String, String> {
        &self.arguments
    }

    fn format_body(&self) -> String {
        Field::format_body(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_body())
    }
}
