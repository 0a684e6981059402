use super::classify::LineKind;

/// Output buffer for the line normalizer.
///
/// Lines are pushed one at a time together with their [`LineKind`]; the buffer
/// inserts blank separator lines based solely on the kind of the last emitted
/// entry, so classification and spacing stay independent.
#[derive(Debug, Default, Clone)]
pub struct Reflow {
    lines: Vec<String>,
    last: Option<LineKind>,
}

impl Reflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a classified line, adding the blank lines its kind requires.
    pub fn push(&mut self, kind: LineKind, line: &str) {
        match kind {
            LineKind::Blank => {
                if self.follows_content() {
                    self.blank();
                }
            }
            LineKind::Header | LineKind::StandaloneUrl => {
                if self.follows_content() {
                    self.blank();
                }
                self.emit(kind, line);
                self.blank();
            }
            LineKind::Bullet => {
                if self.follows_content() && self.last != Some(LineKind::Bullet) {
                    self.blank();
                }
                self.emit(kind, line);
            }
            LineKind::Code {
                opens_block,
                closes_block,
            } => {
                if opens_block {
                    self.blank();
                }
                self.emit(kind, line);
                if closes_block {
                    self.blank();
                }
            }
            LineKind::Regular => self.emit(kind, line),
        }
    }

    /// Lines emitted so far, blank separators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join the buffer with newlines.
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }

    /// The last emitted entry exists and is not blank.
    fn follows_content(&self) -> bool {
        !matches!(self.last, None | Some(LineKind::Blank))
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
        self.last = Some(LineKind::Blank);
    }

    fn emit(&mut self, kind: LineKind, line: &str) {
        self.lines.push(line.to_string());
        self.last = Some(kind);
    }
}
