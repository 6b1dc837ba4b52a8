//! Fuzz target for JDBC URL operations.
//!
//! Every entry point must return an error for malformed input, never panic
//! on an out-of-range slice.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_jdbc_url
//! ```

#![no_main]

use arbitrary::Arbitrary;
use jdbc_url::{
    classify, extract_database_name, locate_authority_separator, port, replace_port,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    /// Tail appended to a `jdbc:` prefix half of the time, to get past the
    /// prefix check.
    tail: &'a str,
    prefixed: bool,
    new_port: u16,
}

fuzz_target!(|input: Input<'_>| {
    let url = if input.prefixed {
        format!("jdbc:{}", input.tail)
    } else {
        input.tail.to_string()
    };

    let _ = classify(&url);
    let _ = locate_authority_separator(&url);
    let name = extract_database_name(&url);
    let _ = port(&url);

    if let Ok(rewritten) = replace_port(&url, input.new_port) {
        // Rewriting twice with the same port is a no-op.
        assert_eq!(replace_port(&rewritten, input.new_port).as_ref(), Ok(&rewritten));
        assert_eq!(port(&rewritten), Ok(Some(input.new_port)));
        if let Ok(name) = name {
            assert_eq!(extract_database_name(&rewritten), Ok(name));
        }
    }
});
