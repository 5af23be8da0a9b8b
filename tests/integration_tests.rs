use serde::Deserialize;
use serde_tomlstream::{
    from_reader, from_str, parse_reader, parse_str, parse_with_options, tree, DottedKeys, Error,
    Node, ParseOptions,
};

#[derive(Deserialize, Debug, PartialEq)]
struct Server {
    host: String,
    port: u16,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Owner {
    name: String,
    email: Option<String>,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Config {
    title: String,
    motd: String,
    server: Server,
    owner: Owner,
}

const CONFIG: &str = r#"
title = "Service \"alpha\""   # display name
motd = '''
Welcome!
  Paths look like C:\srv\alpha'''

server.host = "0.0.0.0"
server.port = "8080"

owner.name = 'Ops Team'
"#;

#[test]
fn test_simple_key_value() {
    let tree = parse_str("k = \"v\"").unwrap();
    assert_eq!(tree.get("k"), Some(&Node::leaf("v")));
}

#[test]
fn test_escape_sequences() {
    let tree = parse_str(r#"k = "a\tb\nc""#).unwrap();
    assert_eq!(tree.get("k").and_then(Node::raw_value), Some("a\tb\nc"));

    let tree = parse_str(r#"k = "a\\b""#).unwrap();
    assert_eq!(tree.get("k").and_then(Node::raw_value), Some("a\\b"));
}

#[test]
fn test_literal_string_has_no_escapes() {
    let tree = parse_str(r"k = 'a\tb'").unwrap();
    let value = tree.get("k").and_then(Node::raw_value).unwrap();
    assert_eq!(value, "a\\tb");
    assert_eq!(value.chars().count(), 4);
}

#[test]
fn test_multi_line_line_continuation() {
    let tree = parse_str("k = \"\"\"\nline1 \\\n   line2\"\"\"").unwrap();
    assert_eq!(tree.get("k"), Some(&Node::leaf("line1 line2")));
}

#[test]
fn test_multi_line_leading_newline_trimmed() {
    let tree = parse_str("k = \"\"\"\nfoo\"\"\"").unwrap();
    assert_eq!(tree.get("k"), Some(&Node::leaf("foo")));
}

#[test]
fn test_comment_lines_are_ignored() {
    let with_comment = parse_str("# c\nk = \"v\"").unwrap();
    let without = parse_str("k = \"v\"").unwrap();
    assert_eq!(with_comment, without);

    let tree = parse_str("a = \"1\"\n# between\n   # indented\nb = \"2\"\n# trailing").unwrap();
    assert_eq!(tree, tree!({ "a": "1", "b": "2" }));
}

#[test]
fn test_last_write_wins() {
    let tree = parse_str("k = \"a\"\nk = \"b\"").unwrap();
    assert_eq!(tree.get("k"), Some(&Node::leaf("b")));
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_raw_newline_in_single_line_string() {
    let err = parse_str("k = \"a\nb\"").unwrap_err();
    assert_eq!(err, Error::UnexpectedNewline { line: 1, col: 7 });

    let err = parse_str("k = 'a\nb'").unwrap_err();
    assert!(matches!(err, Error::UnexpectedNewline { .. }));
}

#[test]
fn test_missing_value() {
    assert!(matches!(
        parse_str("k ="),
        Err(Error::MissingValue { ref key, .. }) if key == "k"
    ));
    assert!(matches!(
        parse_str("k = # comment\n"),
        Err(Error::MissingValue { ref key, .. }) if key == "k"
    ));
    assert!(matches!(
        parse_str("a.b ="),
        Err(Error::MissingValue { ref key, .. }) if key == "a.b"
    ));
}

#[test]
fn test_full_config() {
    let tree = parse_str(CONFIG).unwrap();
    assert_eq!(
        tree,
        tree!({
            "title": "Service \"alpha\"",
            "motd": "Welcome!\n  Paths look like C:\\srv\\alpha",
            "server": { "host": "0.0.0.0", "port": "8080" },
            "owner": { "name": "Ops Team" }
        })
    );
}

#[test]
fn test_full_config_into_struct() {
    let config: Config = from_str(CONFIG).unwrap();
    assert_eq!(
        config,
        Config {
            title: "Service \"alpha\"".to_string(),
            motd: "Welcome!\n  Paths look like C:\\srv\\alpha".to_string(),
            server: Server {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            owner: Owner {
                name: "Ops Team".to_string(),
                email: None,
            },
        }
    );
}

#[test]
fn test_reader_matches_str() {
    let from_io = parse_reader(CONFIG.as_bytes()).unwrap();
    assert_eq!(from_io, parse_str(CONFIG).unwrap());

    let config: Config = from_reader(CONFIG.as_bytes()).unwrap();
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_non_ascii_content() {
    let tree = parse_str("greeting = \"héllo, 世界 🦀\"\nname = 'Zoë'").unwrap();
    assert_eq!(tree.get("greeting"), Some(&Node::leaf("héllo, 世界 🦀")));
    assert_eq!(tree.get("name"), Some(&Node::leaf("Zoë")));
}

#[test]
fn test_error_positions_count_characters() {
    let err = parse_str("name = \"é\" x").unwrap_err();
    assert_eq!(err.position(), Some((1, 12)));
}

#[test]
fn test_document_order_preserved() {
    let tree = parse_str("zeta = \"1\"\nalpha = \"2\"\nmid.x = \"3\"").unwrap();
    let keys: Vec<_> = tree.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_tree_serializes_to_json() {
    let tree = parse_str("a = \"1\"\nb.c = \"2\"").unwrap();
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json, serde_json::json!({ "a": "1", "b": { "c": "2" } }));
}

#[test]
fn test_options_apply_to_whole_document() {
    let options = ParseOptions::new().with_dotted_keys(DottedKeys::Reject);
    let tree = parse_with_options("plain = \"ok\"\n'x.y' = \"quoted dots are fine\"", options.clone())
        .unwrap();
    assert_eq!(tree.len(), 2);

    let err = parse_with_options("plain = \"ok\"\nx.y = \"no\"", options).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFeature { line: 2, col: 2, .. }));
}

#[test]
fn test_errors_abort_whole_parse() {
    // the first two lines are fine, but no partial tree comes back
    let result = parse_str("a = \"1\"\nb = \"2\"\nc = 3\nd = \"4\"");
    assert!(matches!(
        result,
        Err(Error::UnsupportedValueType { line: 3, col: 5, found: '3' })
    ));
}
