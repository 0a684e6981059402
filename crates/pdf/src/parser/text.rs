use unicode_normalization::UnicodeNormalization;

const LIGATURES: [(char, &str); 5] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Clean the text of a single run as decoded from a content stream.
///
/// Applies NFC normalization, expands Latin ligatures, drops replacement and
/// NUL characters, and turns control whitespace (tabs, CR, LF, form feeds)
/// into plain spaces so line structure only comes from end-of-line hints.
/// Non-breaking spaces are kept; the normalizer handles them.
pub fn clean_run_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.nfc() {
        match c {
            '\u{FFFD}' | '\0' => {}
            '\t' | '\r' | '\n' | '\u{000B}' | '\u{000C}' => result.push(' '),
            c => match LIGATURES.iter().find(|(lig, _)| *lig == c) {
                Some((_, expanded)) => result.push_str(expanded),
                None => result.push(c),
            },
        }
    }

    result
}
