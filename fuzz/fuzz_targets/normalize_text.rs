#![no_main]

use libfuzzer_sys::fuzz_target;
use page_text_converter::normalize::normalize_text;

fuzz_target!(|text: &str| {
    let out = normalize_text(text);
    assert_eq!(out.trim(), out);
});
