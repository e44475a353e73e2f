//! Catena GQL Procedural Macros
//!
//! Variadic front-ends for the Catena GQL factory functions:
//!
//! ```rust,ignore
//! use catena_gql::{query, field};
//!
//! let columns = field!("column_values", "id", "text"; ids = vec!["status"])?;
//! let items = query!("items", "id", "name", columns; limit = 25)?;
//! assert_eq!(
//!     items.format_body(),
//!     r#"query { items (limit:25) { id, name, column_values (ids:["status"]) { id, text } } }"#
//! );
//! ```
//!
//! Everything before the `;` is a child spec (a shorthand path or a
//! `Field`); everything after it is a `key = value` argument. Each macro
//! evaluates to a `GqlResult`.

use proc_macro::TokenStream;

mod codegen;
mod parsing;

use codegen::{expand_tree, TreeKind};

/// Build a `Field`
#[proc_macro]
pub fn field(input: TokenStream) -> TokenStream {
    expand_tree(TreeKind::Field, input)
}

/// Build a query `Operation`
#[proc_macro]
pub fn query(input: TokenStream) -> TokenStream {
    expand_tree(TreeKind::Query, input)
}

/// Build a mutation `Operation`
#[proc_macro]
pub fn mutation(input: TokenStream) -> TokenStream {
    expand_tree(TreeKind::Mutation, input)
}
