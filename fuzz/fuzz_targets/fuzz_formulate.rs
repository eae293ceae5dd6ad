#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz everything downstream of parsing: normalization, validation and
/// identifier assembly must not panic on any tree that parses.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mixture) = mixfile_tools::Mixture::from_json(s) else {
        return;
    };
    let _ = mixfile_tools::MixtureNormalizer::new().analyse(&mixture);
    let _ = mixfile_tools::cli::validate_mixture(&mixture, mixfile_tools::UnitCatalog::global());
    let _ = mixfile_tools::MInChIBuilder::new().formulate(&mixture);
});
