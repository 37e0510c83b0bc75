#![no_main]

use greenscan_scanner::classifier::{classify, is_valid_code};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let classified = classify(raw);
        // 분류 결과는 정리된 코드와 일관되어야 함
        assert_eq!(classified.code, raw.trim());
        assert_eq!(classified.is_valid, is_valid_code(&classified.code));
        if let Some(action) = classified.action() {
            assert!(action.target().ends_with(classified.code.as_str()));
        }
    }
});
