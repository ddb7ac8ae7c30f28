//! Comment directive parsing.
//!
//! Syntax: `//<prefix>:<keyword> <args...> [-- reason]`. Arguments are
//! separated by whitespace or commas; anything after `--` is free text.

use crate::codes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Immutable,
    Constructor,
    Implements,
    TestOnly,
    PackageOnly,
    Mutable,
    Ignore,
}

impl Keyword {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "immutable" => Some(Keyword::Immutable),
            "constructor" => Some(Keyword::Constructor),
            "implements" => Some(Keyword::Implements),
            "testonly" => Some(Keyword::TestOnly),
            "packageonly" => Some(Keyword::PackageOnly),
            "mutable" => Some(Keyword::Mutable),
            "ignore" => Some(Keyword::Ignore),
            _ => None,
        }
    }

    /// Keywords that mean nothing without arguments.
    pub fn requires_payload(&self) -> bool {
        matches!(
            self,
            Keyword::Constructor | Keyword::Implements | Keyword::PackageOnly | Keyword::Ignore
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub keyword: Keyword,
    pub args: Vec<String>,
}

/// Parse one comment line. Returns `None` for ordinary comments, unknown
/// keywords, and directives missing a required payload.
pub fn parse(text: &str, prefix: &str) -> Option<Directive> {
    let body = strip_comment_markers(text);
    let rest = body.strip_prefix(prefix)?.strip_prefix(':')?;
    let rest = match rest.find("--") {
        Some(idx) => &rest[..idx],
        None => rest,
    };
    let mut words = rest.split(|c: char| c.is_whitespace() || c == ',').filter(|w| !w.is_empty());
    let keyword = Keyword::parse(words.next()?)?;
    let args: Vec<String> = words.map(str::to_string).collect();

    if keyword.requires_payload() && args.is_empty() {
        tracing::debug!(text = %text.trim(), "dropping directive without payload");
        return None;
    }
    Some(Directive { keyword, args })
}

/// Codes named by an `ignore` directive, normalized. Malformed tokens are
/// skipped; an empty result means the comment is not a directive at all.
pub fn ignore_codes(text: &str, prefix: &str) -> Vec<String> {
    let Some(directive) = parse(text, prefix) else {
        return Vec::new();
    };
    if directive.keyword != Keyword::Ignore {
        return Vec::new();
    }
    let mut out: Vec<String> = directive
        .args
        .iter()
        .map(|a| codes::normalize(a))
        .filter(|c| codes::is_well_formed(c))
        .collect();
    out.sort();
    out.dedup();
    if out.is_empty() {
        tracing::debug!(text = %text.trim(), "dropping ignore directive with no valid codes");
    }
    out
}

fn strip_comment_markers(text: &str) -> &str {
    let t = text.trim();
    let t = if let Some(inner) = t.strip_prefix("/*") {
        inner.strip_suffix("*/").unwrap_or(inner)
    } else if let Some(inner) = t.strip_prefix("//") {
        inner
    } else if let Some(inner) = t.strip_prefix('#') {
        inner
    } else {
        t
    };
    t.trim()
}
