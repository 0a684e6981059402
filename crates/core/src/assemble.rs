use serde::{Deserialize, Serialize};

/// Separator placed between consecutive pages so a page boundary always
/// reads as a paragraph break.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// A run of text as reported by the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    /// The run closes a visual line in the source document.
    pub end_of_line: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>, end_of_line: bool) -> Self {
        TextRun {
            text: text.into(),
            end_of_line,
        }
    }
}

/// Join a page's runs into a single string.
///
/// Each run is followed by a newline when it carries an end-of-line hint and by
/// a single space otherwise. Empty runs contribute nothing, not even their
/// separator.
pub fn assemble_page(runs: &[TextRun]) -> String {
    let mut page = String::new();

    for run in runs.iter().filter(|r| !r.text.is_empty()) {
        page.push_str(&run.text);
        page.push(if run.end_of_line { '\n' } else { ' ' });
    }

    page
}

/// Concatenate assembled pages with [`PAGE_SEPARATOR`].
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut document = String::new();

    for (i, page) in pages.into_iter().enumerate() {
        if i > 0 {
            document.push_str(PAGE_SEPARATOR);
        }
        document.push_str(page.as_ref());
    }

    document
}

/// Assemble every page and join the results into the raw document text.
pub fn assemble_document<P>(pages: &[P]) -> String
where
    P: AsRef<[TextRun]>,
{
    join_pages(pages.iter().map(|runs| assemble_page(runs.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_page_spaces_between_runs() {
        let runs = vec![TextRun::new("Hello", false), TextRun::new("world", false)];
        assert_eq!(assemble_page(&runs), "Hello world ");
    }

    #[test]
    fn test_assemble_page_honors_end_of_line() {
        let runs = vec![
            TextRun::new("First line", true),
            TextRun::new("Second", false),
            TextRun::new("line", true),
        ];
        assert_eq!(assemble_page(&runs), "First line\nSecond line\n");
    }

    #[test]
    fn test_assemble_page_skips_empty_runs() {
        // An empty run with an EOL hint must not produce a stray newline.
        let runs = vec![
            TextRun::new("a", false),
            TextRun::new("", true),
            TextRun::new("", false),
            TextRun::new("b", true),
        ];
        assert_eq!(assemble_page(&runs), "a b\n");
    }

    #[test]
    fn test_assemble_page_empty() {
        assert_eq!(assemble_page(&[]), "");
    }

    #[test]
    fn test_join_pages_uses_separator_between_pairs() {
        assert_eq!(join_pages(["one", "two", "three"]), "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_join_pages_single_and_empty() {
        assert_eq!(join_pages(["only"]), "only");
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn test_assemble_document() {
        let pages = vec![
            vec![TextRun::new("Page one", true)],
            vec![TextRun::new("Page", false), TextRun::new("two", true)],
        ];
        assert_eq!(assemble_document(&pages), "Page one\n\n\nPage two\n");
    }

    #[test]
    fn test_text_run_serializes_end_of_line() {
        let json = serde_json::to_string(&TextRun::new("x", true)).unwrap();
        assert_eq!(json, r#"{"text":"x","end_of_line":true}"#);
    }
}
