#![no_main]
use libfuzzer_sys::fuzz_target;

use funda_listings::adapters::funda::parsers::detail::DetailTreeFlattener;
use funda_listings::domain::listing::Listing;

fuzz_target!(|data: &[u8]| {
    let Ok(image_url) = url::Url::parse("https://cloud.funda.nl/valentina_media/fuzz.jpg") else {
        return;
    };
    let mut listing = Listing::new(1, "Fuzzstraat 1", image_url);
    let _ = DetailTreeFlattener::default().populate(&mut listing, data);
});
