#![no_main]

use greenscan_scanner::{ProviderResponse, assess, normalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(response) = serde_json::from_slice::<ProviderResponse>(data) else {
        return;
    };
    if !response.is_match() {
        return;
    }
    if let Ok(product) = normalize(response.product.as_ref(), "5449000000996") {
        let assessment = assess(Some(&product));
        assert!((0.0..=10.0).contains(&assessment.score));
    }
});
