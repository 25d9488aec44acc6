//! Alias qualification for free-form expression text
//!
//! When frames are aliased or joined, bare field references in user-written
//! expression text must be prefixed with the frame's alias so they resolve
//! unambiguously. Rewriting works on the text directly:
//!
//! 1. text that is exactly one candidate name (case-insensitively) becomes
//!    `alias.text`
//! 2. a trailing `AS <name>` is split off and re-attached afterwards
//! 3. each candidate, longest first, is qualified wherever it appears as a whole
//!    identifier that is not already preceded by `.` and not inside a string
//!    literal
//!
//! Already-qualified occurrences are left alone, so rewriting `a.Foo` against
//! alias `b` is a no-op.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

/// Trailing output alias: `<body> AS name` or `<body> AS \`name\``
static TRAILING_ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(.*?)(\s+AS\s+(?:[A-Za-z_][A-Za-z0-9_]*|`[^`]*`))\s*$").unwrap()
});

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Where a byte offset sits relative to quoting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    None,
    /// Inside a single-quoted string literal
    Literal,
    /// Inside a backtick-quoted identifier opened at the given offset
    Identifier(usize),
}

fn quoting_at(text: &str, pos: usize) -> Quoting {
    let mut state = Quoting::None;
    let mut escaped = false;
    for (i, b) in text.as_bytes()[..pos].iter().copied().enumerate() {
        state = match state {
            Quoting::Literal if escaped => {
                escaped = false;
                Quoting::Literal
            }
            Quoting::Literal if b == b'\\' => {
                escaped = true;
                Quoting::Literal
            }
            Quoting::Literal if b == b'\'' => Quoting::None,
            Quoting::Identifier(_) if b == b'`' => Quoting::None,
            Quoting::None if b == b'\'' => Quoting::Literal,
            Quoting::None if b == b'`' => Quoting::Identifier(i),
            unchanged => unchanged,
        };
    }
    state
}

/// Transient state of one rewrite
#[derive(Debug, Clone)]
pub struct AliasRewriteState<'a> {
    raw: &'a str,
    alias: &'a str,
    /// Longest first
    candidates: Vec<&'a str>,
    trailing_alias: Option<&'a str>,
}

impl<'a> AliasRewriteState<'a> {
    pub fn new<S: AsRef<str>>(raw: &'a str, alias: &'a str, candidates: &'a [S]) -> Self {
        let mut candidates: Vec<&str> = candidates
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| !c.is_empty())
            .collect();
        candidates.sort_by(|a, b| b.len().cmp(&a.len()));
        Self {
            raw,
            alias,
            candidates,
            trailing_alias: None,
        }
    }

    pub fn rewrite(mut self) -> String {
        let trimmed = self.raw.trim();
        if self.candidates.iter().any(|c| c.eq_ignore_ascii_case(trimmed)) {
            return format!("{}.{}", self.alias, trimmed);
        }

        let body = match TRAILING_ALIAS.captures(self.raw) {
            Some(captures) => {
                let body = captures.get(1).map_or("", |m| m.as_str());
                self.trailing_alias = captures.get(2).map(|m| m.as_str());
                body
            }
            None => self.raw,
        };

        let mut text = body.to_string();
        for candidate in &self.candidates {
            text = self.qualify_occurrences(text, candidate);
        }

        if let Some(trailing) = self.trailing_alias {
            text.push_str(trailing);
        }
        if text != self.raw {
            debug!("qualified `{}` as `{}`", self.raw, text);
        }
        text
    }

    fn qualify_occurrences(&self, mut text: String, candidate: &str) -> String {
        let prefix = format!("{}.", self.alias);
        let needle = candidate.to_ascii_lowercase();
        let mut from = 0;
        loop {
            let lower = text.to_ascii_lowercase();
            let Some(offset) = lower[from..].find(&needle) else {
                break;
            };
            let start = from + offset;
            let end = start + needle.len();
            let bytes = text.as_bytes();
            let insert_at = match quoting_at(&text, start) {
                Quoting::Literal => None,
                // Only a whole quoted name is a reference: `Foo` becomes a.`Foo`
                Quoting::Identifier(open) => {
                    let whole = open + 1 == start && bytes.get(end) == Some(&b'`');
                    let qualified = open > 0 && bytes[open - 1] == b'.';
                    (whole && !qualified).then_some(open)
                }
                Quoting::None => {
                    let preceded = start > 0
                        && (bytes[start - 1] == b'.' || is_identifier_byte(bytes[start - 1]));
                    let followed = end < bytes.len() && is_identifier_byte(bytes[end]);
                    (!preceded && !followed).then_some(start)
                }
            };
            match insert_at {
                Some(at) => {
                    text.insert_str(at, &prefix);
                    from = end + prefix.len();
                }
                None => from = end,
            }
        }
        text
    }
}

/// Qualify unqualified references to `candidates` in `raw` with `alias`.
pub fn qualify_expression<S: AsRef<str>>(raw: &str, alias: &str, candidates: &[S]) -> String {
    AliasRewriteState::new(raw, alias, candidates).rewrite()
}
