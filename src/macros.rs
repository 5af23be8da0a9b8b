/// Builds a [`Table`](crate::Table) from a JSON-like literal.
///
/// String expressions become leaves, nested braces become container nodes.
///
/// ```rust
/// use serde_tomlstream::{parse_str, tree};
///
/// let expected = tree!({
///     "title": "demo",
///     "server": { "host": "localhost" }
/// });
/// let parsed = parse_str("title = \"demo\"\nserver.host = \"localhost\"").unwrap();
/// assert_eq!(parsed, expected);
/// ```
#[macro_export]
macro_rules! tree {
    // Nested table
    (@node { $($inner:tt)* }) => {
        $crate::Node::table($crate::tree!({ $($inner)* }))
    };

    // Leaf from any string expression
    (@node $leaf:expr) => {
        $crate::Node::leaf($leaf)
    };

    // Handle empty table
    ({}) => {
        $crate::Table::new()
    };

    // Handle non-empty table
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::tree!(@node $value));
        )*
        table
    }};
}
