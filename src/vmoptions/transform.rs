//! Pure line-level transformation of option file text

/// Line terminator used by a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF if the text contains any `\r\n`, LF otherwise
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Split on `\n` and keep the lines `delete` rejects
///
/// Lines are handed to `delete` raw (a CRLF file leaves the `\r` attached),
/// so predicates should trim. Relative order is kept, blank lines included.
pub fn retain_lines<'a, F>(text: &'a str, mut delete: F) -> Vec<&'a str>
where
    F: FnMut(&str) -> bool,
{
    text.split('\n').filter(|line| !delete(*line)).collect()
}

/// [`retain_lines`] rejoined with `\n`
pub fn transform<F>(text: &str, delete: F) -> String
where
    F: FnMut(&str) -> bool,
{
    retain_lines(text, delete).join("\n")
}

/// Drop trailing lines that are empty or whitespace-only
pub fn trim_trailing_blank_lines<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let keep = lines
        .iter()
        .rposition(|line| !line.as_ref().trim().is_empty())
        .map_or(0, |last| last + 1);
    &lines[..keep]
}

/// Join `lines`, then append `block` with one terminator per block line
///
/// Blank lines already in `lines` are kept as they are. A terminator is added
/// only when the joined text is non-empty and does not already end in one.
pub fn append_block<S: AsRef<str>>(lines: &[S], block: &[String], ending: LineEnding) -> String {
    let mut out = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<&str>>()
        .join("\n");

    if !out.is_empty() && !out.ends_with('\n') {
        out.push_str(ending.as_str());
    }
    for line in block {
        out.push_str(line);
        out.push_str(ending.as_str());
    }
    out
}
