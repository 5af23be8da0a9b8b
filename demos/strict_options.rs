//! Choosing how strict the parser is with ParseOptions.
//!
//! Run with: cargo run --example strict_options

use serde_tomlstream::{parse_str, parse_with_options, DottedKeys, ParseOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let legacy = "name = \"api\" ; old-style comment\nport = \"80\"";

    // Default: anything but a comment after a value is an error
    match parse_str(legacy) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("default options: {}", e),
    }

    // Lenient: the rest of the line is discarded
    let tree = parse_with_options(legacy, ParseOptions::lenient())?;
    println!("lenient options: {} keys", tree.len());

    // Flat keys only
    let flat = ParseOptions::new().with_dotted_keys(DottedKeys::Reject);
    match parse_with_options("server.host = \"localhost\"", flat.clone()) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(e) => println!("flat keys: {}", e),
    }
    let tree = parse_with_options("\"server.host\" = \"localhost\"", flat)?;
    println!("quoted key kept whole: {:?}", tree.keys().collect::<Vec<_>>());

    Ok(())
}
