//! Line normalizer: turns the flat text produced by the page assembler into a
//! readable document with isolated headings, grouped lists, blank-delimited
//! code blocks, and standalone links.
//!
//! # Pipeline
//!
//! ```text
//! raw text  ->  clean_whitespace  ->  classify + Reflow  ->  collapse_blank_lines
//!               (stage A)             (stage B, per line)     (stage C)
//! ```
//!
//! Only character-level heuristics are available here; font and position
//! information has already been discarded by the extraction adapter.

mod classify;
mod reflow;

use std::sync::OnceLock;

use regex::Regex;

pub use classify::{
    canonicalize_bullet, classify, is_bullet, is_code_like, is_header, is_standalone_url, LineKind,
};
pub use reflow::Reflow;

/// Stage A: replace non-breaking spaces, collapse runs of spaces and tabs,
/// and trim the document.
pub fn clean_whitespace(raw: &str) -> String {
    static RE_SPACES: OnceLock<Regex> = OnceLock::new();
    let re_spaces = RE_SPACES.get_or_init(|| Regex::new(r"[ \t]+").unwrap());

    let text = raw.replace('\u{00A0}', " ");
    re_spaces.replace_all(&text, " ").trim().to_string()
}

/// Stage C: cap blank runs at a single blank line and trim the result.
pub fn collapse_blank_lines(text: &str) -> String {
    static RE_BLANKS: OnceLock<Regex> = OnceLock::new();
    let re_blanks = RE_BLANKS.get_or_init(|| Regex::new(r"\n{3,}").unwrap());

    re_blanks.replace_all(text, "\n\n").trim().to_string()
}

/// Normalize raw extracted text.
///
/// Total and deterministic: any input (including an empty string) produces a
/// document, and normalizing the output again returns it unchanged.
pub fn normalize_text(raw: &str) -> String {
    let cleaned = clean_whitespace(raw);
    let lines: Vec<&str> = cleaned.split('\n').map(str::trim).collect();

    let mut reflow = Reflow::new();
    for (i, line) in lines.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| lines[p]);
        let next = lines.get(i + 1).copied();

        let kind = classify(line, previous, next);
        reflow.push(kind, &canonicalize_bullet(line));
    }

    collapse_blank_lines(&reflow.into_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   \n\t\n  ",
        "Some Paragraph.\n\nJSON EXAMPLE:\nconst x = 1;\nconst y = 2;\nMore prose.",
        "Intro\nCHAPTER 1\nBody text",
        "TITLE\n\n\n\n\nBody\n\n\n\nEnd",
        "Shopping list\n• eggs\n◦ milk\n· bread\nThanks",
        "Read more at\nhttps://example.com/docs\nor ask.",
        "Run this:\ncurl -X GET https://api.example.com\nThen:\nx = f(y)\n- a(b)\nz = 1\nDone",
        "Page one ends here\n\n\nPAGE TWO\nSECTION 2 (DRAFT)\n```\nlet v = 3;\n```\ntrailing",
        "Header:\n\n\n- item\n\n\n\nhttps://a.b/c=d\nlet q = 1;\n•\nplain",
        "a\u{00A0}\u{00A0}b\t\tc\n\n\n\n\n\nd",
        "Prose line\n•\nnext\n-\n◦\nend\n-",
    ];

    #[test]
    fn test_clean_whitespace() {
        assert_eq!(clean_whitespace("a\u{00A0}b  \t c"), "a b c");
        assert_eq!(clean_whitespace("  \n text \n  "), "text");
    }

    #[test]
    fn test_clean_whitespace_keeps_newlines() {
        assert_eq!(clean_whitespace("a\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb\nc"), "a\n\nb\nc");
        assert_eq!(collapse_blank_lines("\n\na\n\n"), "a");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \t\u{00A0}\n\n  \n"), "");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(
            normalize_text("one\u{00A0}two\t\t\tthree    four"),
            "one two three four"
        );
    }

    #[test]
    fn test_bullet_canonicalization() {
        assert_eq!(normalize_text("• Remember this"), "- Remember this");
        assert_eq!(
            normalize_text("• first\n◦ second\n· third"),
            "- first\n- second\n- third"
        );
    }

    #[test]
    fn test_bare_marker_starts_a_list() {
        assert_eq!(
            normalize_text("Prose line\n•\nnext"),
            "Prose line\n\n- \nnext"
        );
        assert_eq!(normalize_text("Items\n-\n· b"), "Items\n\n- \n- b");
    }

    #[test]
    fn test_bullet_list_separated_from_prose() {
        assert_eq!(
            normalize_text("Groceries\n• eggs\n• milk\nThat is all"),
            "Groceries\n\n- eggs\n- milk\nThat is all"
        );
    }

    #[test]
    fn test_header_isolation() {
        assert_eq!(
            normalize_text("Intro\nCHAPTER 1\nBody text"),
            "Intro\n\nCHAPTER 1\n\nBody text"
        );
    }

    #[test]
    fn test_standalone_url_isolation() {
        assert_eq!(
            normalize_text("Read more at\nhttps://example.com/docs\nor ask."),
            "Read more at\n\nhttps://example.com/docs\n\nor ask."
        );
    }

    #[test]
    fn test_embedded_url_stays_inline() {
        assert_eq!(
            normalize_text("Visit https://example.com today\nThanks"),
            "Visit https://example.com today\nThanks"
        );
    }

    #[test]
    fn test_end_to_end_code_block() {
        let raw = "Some Paragraph.\n\nJSON EXAMPLE:\nconst x = 1;\nconst y = 2;\nMore prose.";
        assert_eq!(
            normalize_text(raw),
            "Some Paragraph.\n\nJSON EXAMPLE:\n\nconst x = 1;\nconst y = 2;\n\nMore prose."
        );
    }

    #[test]
    fn test_code_block_uses_source_neighbours() {
        // The previous source line is blank, so no extra separator is added
        // even though the last emitted line is prose.
        assert_eq!(
            normalize_text("Prose\n\nx = 1\nmore prose"),
            "Prose\n\nx = 1\n\nmore prose"
        );
    }

    #[test]
    fn test_page_boundary_forces_paragraph_break() {
        assert_eq!(
            normalize_text("end of page one \n\nstart of page two \n"),
            "end of page one\n\nstart of page two"
        );
    }

    #[test]
    fn test_no_triple_newline() {
        for sample in SAMPLES {
            let normalized = normalize_text(sample);
            assert!(
                !normalized.contains("\n\n\n"),
                "triple newline in output for {sample:?}: {normalized:?}"
            );
        }
    }

    #[test]
    fn test_no_leading_or_trailing_whitespace() {
        for sample in SAMPLES {
            let normalized = normalize_text(sample);
            assert_eq!(normalized, normalized.trim(), "input {sample:?}");
        }
    }

    #[test]
    fn test_idempotence() {
        for sample in SAMPLES {
            let once = normalize_text(sample);
            let twice = normalize_text(&once);
            assert_eq!(once, twice, "normalization not idempotent for {sample:?}");
        }
    }
}
