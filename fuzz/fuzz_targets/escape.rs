//! Fuzz target for query-component escaping.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_escape
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use prest_query::escape::{escape, unescape};

fuzz_target!(|input: &str| {
    let escaped = escape(input);

    assert!(
        escaped
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'%' | b'-' | b'_' | b'~')),
        "unexpected byte in {escaped:?}"
    );
    assert_eq!(unescape(&escaped), input);
});
