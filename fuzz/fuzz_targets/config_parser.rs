//! Fuzz target for the harness config parser.
//!
//! Feeds arbitrary TOML strings through parsing and test-database setup.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use jdbc_config::{HarnessConfig, MapEnvSource, TestDatabase};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // The parser should never panic, only return errors
        if let Ok(config) = HarnessConfig::from_toml_with_source(input, MapEnvSource::new()) {
            let _ = TestDatabase::from_config(&config);
        }
    }
});
