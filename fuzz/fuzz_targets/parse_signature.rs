#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(signature) = std::str::from_utf8(data) {
        if let Ok(node) = msgarg::parse_signature(signature) {
            assert_eq!(node.to_string(), signature);
            assert!(node.depth() <= msgarg::signature::MAX_DEPTH);
        }
    }
});
