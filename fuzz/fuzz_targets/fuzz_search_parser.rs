#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = funda_listings::adapters::funda::parsers::search::parse_search_results(data);
});
