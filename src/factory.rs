//! Factory functions
//!
//! These take a name, a list of child specs and a list of arguments, and
//! return a ready tree. The `field!`, `query!` and `mutation!` macros expand
//! to calls of these functions.

use crate::error::GqlResult;
use crate::field::{Field, FieldSpec};
use crate::literal::Literal;
use crate::operation::{Operation, OperationKind};

/// Build a [`Field`] from shorthand paths or child fields plus arguments.
pub fn make_field<I, S, A, K, V>(
    name: impl Into<String>,
    specs: I,
    arguments: A,
) -> GqlResult<Field>
where
    I: IntoIterator<Item = S>,
    S: Into<FieldSpec>,
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Literal>,
{
    let mut field = Field::new(name)?;
    field.add_fields(specs).add_arguments(arguments);
    Ok(field)
}

/// Build a query [`Operation`].
pub fn make_query<I, S, A, K, V>(
    name: impl Into<String>,
    specs: I,
    arguments: A,
) -> GqlResult<Operation>
where
    I: IntoIterator<Item = S>,
    S: Into<FieldSpec>,
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Literal>,
{
    make_operation(OperationKind::Query, name, specs, arguments)
}

/// Build a mutation [`Operation`].
pub fn make_mutation<I, S, A, K, V>(
    name: impl Into<String>,
    specs: I,
    arguments: A,
) -> GqlResult<Operation>
where
    I: IntoIterator<Item = S>,
    S: Into<FieldSpec>,
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Literal>,
{
    make_operation(OperationKind::Mutation, name, specs, arguments)
}

pub fn make_operation<I, S, A, K, V>(
    kind: OperationKind,
    name: impl Into<String>,
    specs: I,
    arguments: A,
) -> GqlResult<Operation>
where
    I: IntoIterator<Item = S>,
    S: Into<FieldSpec>,
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Literal>,
{
    let mut operation = Operation::new(kind, name)?;
    operation.add_fields(specs).add_arguments(arguments);
    Ok(operation)
}

/// Empty argument list for the factory functions
pub fn no_arguments() -> Vec<(String, Literal)> {
    Vec::new()
}
