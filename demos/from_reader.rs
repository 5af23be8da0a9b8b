//! Stream a document from any `io::Read`.
//!
//! Run with: cargo run --example from_reader [path]

use serde_tomlstream::{parse_reader, Node};
use std::error::Error;
use std::fs::File;
use std::io::Cursor;

const FALLBACK: &str = "# built-in sample\nowner.name = 'Tom Preston-Werner'\nowner.site = \"https://example.com\"\n";

fn print_node(path: &str, node: &Node) {
    match node {
        Node::Leaf(value) => println!("{path} = {value:?}"),
        Node::Table(table) => {
            for (key, child) in table {
                print_node(&format!("{path}.{key}"), child);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let tree = match std::env::args().nth(1) {
        Some(path) => parse_reader(File::open(path)?)?,
        None => parse_reader(Cursor::new(FALLBACK))?,
    };

    for (key, node) in &tree {
        print_node(key, node);
    }

    Ok(())
}
