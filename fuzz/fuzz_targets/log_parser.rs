#![no_main]

use libfuzzer_sys::fuzz_target;
use resumen::parser::LogParser;

fuzz_target!(|data: &[u8]| {
    // Convert arbitrary bytes to UTF-8 string (lossy conversion)
    if let Ok(input) = std::str::from_utf8(data) {
        // Scanning arbitrary log text may fail with a parse error,
        // but it must never panic
        let _ = LogParser::new().parse(input);
    }
});
