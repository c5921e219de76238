#![no_main]

use libfuzzer_sys::fuzz_target;
use page_text_converter::{ConversionError, TextConverter};

fuzz_target!(|data: &[u8]| {
    let converter = TextConverter::new();

    match converter.convert_bytes(data, None) {
        Ok(page) => {
            assert_eq!(page.body.trim(), page.body);
        }
        Err(ConversionError::DecodeError(_)) => {}
        Err(e) => panic!("unexpected error for byte input: {e}"),
    }

    // Lossy text never fails
    let text = String::from_utf8_lossy(data);
    assert!(converter.convert(&text).is_ok());
});
