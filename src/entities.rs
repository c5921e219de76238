//! HTML character reference decoding
//!
//! html5ever already decodes references while tokenizing, so this pass only
//! sees what survived as literal text, typically double-escaped markup such
//! as `&amp;lt;` or text that never went through a parser at all.

use markup5ever::data::NAMED_ENTITIES;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Shortest name a reference without `;` is cut back to
const MIN_LEGACY_NAME_LEN: usize = 2;

/// Decode named, decimal and hexadecimal character references
///
/// Names come from the full WHATWG table. The terminating `;` is optional:
/// legacy names such as `&amp` or `&copy` decode even when text follows
/// directly (`&copy2024` gives `\u{A9}2024`). Unknown names are left as they
/// are. Numeric references in the C1 range are read as windows-1252, and NUL,
/// surrogates or values past U+10FFFF decode to U+FFFD. Returns the input
/// unchanged (borrowed) when it has no `&`.
///
/// ```rust
/// use page_text_converter::entities::decode_entities;
///
/// assert_eq!(decode_entities("&amp;&lt;&gt;&#39;"), "&<>'");
/// assert_eq!(decode_entities("caf&eacute; &#x20AC;5 &unknown;"), "caf\u{E9} \u{20AC}5 &unknown;");
/// ```
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    static REFERENCE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(regex) = REFERENCE
        .get_or_init(|| {
            Regex::new(r"&(?:#([0-9]+);?|#[xX]([0-9a-fA-F]+);?|([A-Za-z][A-Za-z0-9]{0,31};?))").ok()
        })
        .as_ref()
    else {
        return Cow::Borrowed(text);
    };

    regex.replace_all(text, |caps: &Captures<'_>| {
        if let Some(dec) = caps.get(1) {
            return code_point(dec.as_str().parse().ok());
        }
        if let Some(hex) = caps.get(2) {
            return code_point(u32::from_str_radix(hex.as_str(), 16).ok());
        }
        let name = caps.get(3).map_or("", |m| m.as_str());
        named_reference(name).unwrap_or_else(|| caps[0].to_string())
    })
}

/// Decode `name` (without the leading `&`, with or without `;`)
fn named_reference(name: &str) -> Option<String> {
    if let Some(value) = lookup(name) {
        return Some(value);
    }

    // Longest legacy name that prefixes the reference, rest kept verbatim
    (MIN_LEGACY_NAME_LEN..name.len())
        .rev()
        .find_map(|end| lookup(&name[..end]).map(|value| value + &name[end..]))
}

/// Exact lookup in the named reference table
///
/// The table also lists every proper prefix of a name, mapped to `(0, 0)`;
/// those are not references.
fn lookup(name: &str) -> Option<String> {
    match NAMED_ENTITIES.get(name) {
        Some(&(first, second)) if first != 0 => Some(
            [first, second]
                .into_iter()
                .filter(|&c| c != 0)
                .filter_map(char::from_u32)
                .collect(),
        ),
        _ => None,
    }
}

fn code_point(value: Option<u32>) -> String {
    match value {
        Some(c1 @ 0x80..=0x9F) => {
            let byte = [c1 as u8];
            let (decoded, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(&byte);
            decoded.into_owned()
        }
        other => other
            .filter(|&v| v != 0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
    }
}
