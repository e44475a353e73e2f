//! Common behaviour of every node in a selection tree

use indexmap::IndexMap;

/// A named node carrying pre-formatted argument literals.
///
/// Argument values are stored as the exact text written into the request
/// body, so rendering never needs to escape anything again.
pub trait Node {
    /// Name of the node as written into the request body
    fn name(&self) -> &str;

    /// Argument name to literal text, in insertion order
    fn arguments(&self) -> &IndexMap<String, String>;

    /// Render this node and everything below it
    fn format_body(&self) -> String;

    /// Append the parenthesized argument list to `body`
    fn format_arguments(&self, body: &str) -> String {
        let formatted: Vec<String> = self
            .arguments()
            .iter()
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect();
        format!("{} ({})", body, formatted.join(", "))
    }
}
