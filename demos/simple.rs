//! Parse a small configuration and map it onto Rust types.
//!
//! Run with: cargo run --example simple

use serde::Deserialize;
use serde_tomlstream::{from_str, parse_str};
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Server {
    host: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
struct Config {
    title: String,
    banner: String,
    server: Server,
}

const INPUT: &str = r#"
title = "Inventory"   # shown in the header
banner = """
Welcome to \
    the inventory service"""

server.host = '127.0.0.1'
server.port = "7878"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    // Raw tree
    let tree = parse_str(INPUT)?;
    for (key, node) in &tree {
        println!("{key}: {node:?}");
    }

    // Typed view of the same document
    let config: Config = from_str(INPUT)?;
    println!("\n{:#?}", config);
    assert_eq!(config.server.port, 7878);
    assert_eq!(config.banner, "Welcome to the inventory service");
    println!("✓ {} listening on {}:{}", config.title, config.server.host, config.server.port);

    Ok(())
}
