use serde_tomlstream::{parse_str, tree, Node, Table};

#[test]
fn test_tree_macro_empty() {
    assert_eq!(tree!({}), Table::new());
    assert_eq!(tree!({}), parse_str("# nothing here\n").unwrap());
}

#[test]
fn test_tree_macro_flat() {
    let expected = tree!({
        "name": "Alice",
        "role": "admin",
    });
    let parsed = parse_str("name = \"Alice\"\nrole = 'admin'").unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_tree_macro_nested() {
    let expected = tree!({
        "database": {
            "primary": { "url": "postgres://a" },
            "replica": { "url": "postgres://b" }
        },
        "name": "svc"
    });
    let parsed = parse_str(
        "database.primary.url = \"postgres://a\"\ndatabase.replica.url = \"postgres://b\"\nname = \"svc\"",
    )
    .unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_tree_macro_expressions() {
    let host = format!("{}.{}", "example", "com");
    let port = 80.to_string();
    let table = tree!({ "host": host, "port": port });
    assert_eq!(table.get("host"), Some(&Node::leaf("example.com")));
    assert_eq!(table.get("port"), Some(&Node::leaf("80")));
}

#[test]
fn test_tree_macro_keys_with_dots_are_single_segments() {
    let expected = tree!({ "a.b": "1" });
    assert_eq!(parse_str("\"a.b\" = \"1\"").unwrap(), expected);
    assert_ne!(parse_str("a.b = \"1\"").unwrap(), expected);
}

#[test]
fn test_tree_macro_preserves_order() {
    let table = tree!({ "z": "1", "a": "2", "m": { "x": "3" } });
    let keys: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}
