use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Structural role of a single reconstructed line.
///
/// Variants are listed in matching priority: a line takes the first kind whose
/// test it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Header,
    StandaloneUrl,
    Bullet,
    /// A code-looking line. The flags record whether the surrounding source
    /// lines are prose, in which case the line opens or closes a code block.
    Code {
        opens_block: bool,
        closes_block: bool,
    },
    Regular,
}

/// Upper-case headers must be shorter than this many characters.
const ALL_CAPS_HEADER_MAX: usize = 80;

/// Colon-terminated headers must be shorter than this many characters.
const COLON_HEADER_MAX: usize = 60;

/// Lines containing code punctuation only count as code below this length.
const CODE_LINE_MAX: usize = 150;

const CODE_PREFIXES: &[&str] = &[
    "const", "let", "var", "function", "import", "export", "curl", "await", "async", "require(",
    "```",
];

const CODE_CHARS: &[char] = &['{', '}', '(', ')', ';', '='];

const BULLET_GLYPHS: &[char] = &['\u{2022}', '\u{25E6}', '\u{00B7}'];

/// Returns `true` for short upper-case lines, short capitalised lines ending
/// in a colon, and numbered part/chapter/section titles.
pub fn is_header(line: &str) -> bool {
    static RE_CAPS: OnceLock<Regex> = OnceLock::new();
    static RE_COLON: OnceLock<Regex> = OnceLock::new();
    static RE_NUMBERED: OnceLock<Regex> = OnceLock::new();

    let re_caps = RE_CAPS.get_or_init(|| Regex::new(r"^[A-ZÁÉÍÓÚÑ][A-ZÁÉÍÓÚÑ\s:]+$").unwrap());
    let re_colon = RE_COLON.get_or_init(|| Regex::new(r"^[A-ZÁÉÍÓÚÑ][^.!?]*:$").unwrap());
    let re_numbered = RE_NUMBERED.get_or_init(|| {
        Regex::new(r"(?i)^(PARTE|PART|CHAPTER|CAPÍTULO|SECCIÓN|SECTION)\s+\d+").unwrap()
    });

    let len = line.chars().count();

    (len < ALL_CAPS_HEADER_MAX && re_caps.is_match(line))
        || (len < COLON_HEADER_MAX && re_colon.is_match(line))
        || re_numbered.is_match(line)
}

/// Returns `true` when the whole line is a single `http(s)://` link.
pub fn is_standalone_url(line: &str) -> bool {
    static RE_URL: OnceLock<Regex> = OnceLock::new();
    let re_url = RE_URL.get_or_init(|| Regex::new(r"https?://\S+").unwrap());

    re_url.find(line).is_some_and(|m| m.as_str() == line)
}

/// Returns `true` when the line starts with a code keyword (case-insensitive)
/// or is a short line containing code punctuation.
pub fn is_code_like(line: &str) -> bool {
    let trimmed = line.trim_start();

    let has_prefix = CODE_PREFIXES.iter().any(|prefix| {
        trimmed
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    });

    has_prefix || (line.contains(CODE_CHARS) && line.chars().count() < CODE_LINE_MAX)
}

/// Rewrite a leading bullet glyph (`•`, `◦`, `·`) or a lone hyphen into the
/// canonical `"- "` prefix.
///
/// A hyphen is a marker only when whitespace or the end of the line follows
/// it. A bare marker becomes an empty `"- "` item.
pub fn canonicalize_bullet(line: &str) -> Cow<'_, str> {
    let line_start = line.trim_start();
    let Some(marker) = line_start.chars().next() else {
        return Cow::Borrowed(line);
    };

    let rest = &line_start[marker.len_utf8()..];
    let is_marker = BULLET_GLYPHS.contains(&marker)
        || (marker == '-' && (rest.is_empty() || rest.starts_with(char::is_whitespace)));
    if !is_marker {
        return Cow::Borrowed(line);
    }

    let canonical = format!("- {}", rest.trim_start());
    if canonical == line {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(canonical)
    }
}

/// Returns `true` for a line already in canonical `"- item"` form.
pub fn is_bullet(line: &str) -> bool {
    line.strip_prefix('-')
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

/// Classify a trimmed line.
///
/// `previous` and `next` are the neighbouring *source* lines (trimmed), not
/// the lines already emitted; they only influence [`LineKind::Code`] block
/// boundaries.
pub fn classify(line: &str, previous: Option<&str>, next: Option<&str>) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }

    if is_header(line) {
        return LineKind::Header;
    }

    if is_standalone_url(line) {
        return LineKind::StandaloneUrl;
    }

    if is_bullet(&canonicalize_bullet(line)) {
        return LineKind::Bullet;
    }

    if is_code_like(line) {
        let is_prose = |neighbour: &str| !neighbour.is_empty() && !is_code_like(neighbour);
        return LineKind::Code {
            opens_block: previous.is_some_and(is_prose),
            closes_block: next.is_some_and(is_prose),
        };
    }

    LineKind::Regular
}
