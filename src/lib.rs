//! # Catena GQL: GraphQL request body builder
//!
//! Builds trees of named fields with nested selections and per-field
//! arguments, and renders them into GraphQL request bodies.
//!
//! ```
//! use catena_gql::{make_query, no_arguments};
//!
//! let boards = make_query("boards", ["id", "name", "items.id"], no_arguments()).unwrap();
//! assert_eq!(boards.format_body(), "query { boards { id, name, items { id } } }");
//! ```
//!
//! Transport, authentication and response decoding are left to the caller;
//! [`Operation::to_request`] produces the payload a transport sends.

#![warn(clippy::all)]

// Lets the tree macros refer to `::catena_gql` from inside this crate too.
extern crate self as catena_gql;

pub mod config;
pub mod error;
pub mod factory;
pub mod field;
pub mod literal;
pub mod node;
pub mod operation;

pub use catena_gql_macros::{field, mutation, query};

// Re-export main types
pub use config::{OperationConfig, OperationsFile};
pub use error::{GqlError, GqlResult};
pub use factory::{make_field, make_mutation, make_operation, make_query, no_arguments};
pub use field::{Field, FieldSpec};
pub use literal::{EnumValue, Literal};
pub use node::Node;
pub use operation::{GraphQlRequest, Operation, OperationKind};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
