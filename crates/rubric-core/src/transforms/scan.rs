/*
 * scan.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pattern scanner shared by the inline transforms.
 */

//! Pattern scanner shared by the inline transforms.
//!
//! A [`Scanner`] walks a text run left to right and yields [`Segment`]s:
//! unmatched gaps and [`Match`]es of one [`Grammar`]. Matches never overlap,
//! are never empty, and gaps plus matches reconstruct the input exactly.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static HIGHLIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"==([^=]+)==").expect("invalid highlight regex"));

static WEAKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"::([^:]+)::").expect("invalid weaken regex"));

/// `[main|ruby]{tooltip}`, `[main]{tooltip}` and `[main|ruby]`.
///
/// One pattern with optional groups; which groups participated decides the
/// kind of match.
static RUBY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<main>[^\]|]+)(?:\|(?P<ruby>[^\]]+))?\](?:\{(?P<tooltip>[^}]+)\})?")
        .expect("invalid ruby regex")
});

/// Tooltip continuation at the start of a text run: `{tooltip}` or `\{tooltip}`.
static TOOLTIP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\?\{([^}]+)\}").expect("invalid tooltip regex"));

/// Which syntax a scanner looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Highlight,
    Weaken,
    Ruby,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Highlight,
    Weaken,
    /// `[main|ruby]` with no tooltip
    RubyPlain,
    /// `[main|ruby]{tooltip}` or `[main]{tooltip}`
    RubyTooltip,
}

/// One match of a grammar.
///
/// `main` holds the highlighted or weakened text for those grammars, and
/// the base text for the ruby family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'t> {
    pub kind: MatchKind,
    pub span: Range<usize>,
    pub source: &'t str,
    pub main: &'t str,
    pub ruby: Option<&'t str>,
    pub tooltip: Option<&'t str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    Gap(&'t str),
    Match(Match<'t>),
}

impl<'t> Segment<'t> {
    /// The slice of the input this segment covers.
    pub fn source(&self) -> &'t str {
        match self {
            Segment::Gap(text) => text,
            Segment::Match(m) => m.source,
        }
    }
}

impl Grammar {
    /// Find the leftmost match starting at or after `from`.
    pub fn find_at<'t>(self, text: &'t str, from: usize) -> Option<Match<'t>> {
        match self {
            Grammar::Highlight => find_delimited(&HIGHLIGHT, MatchKind::Highlight, text, from),
            Grammar::Weaken => find_delimited(&WEAKEN, MatchKind::Weaken, text, from),
            Grammar::Ruby => find_ruby(text, from),
        }
    }
}

fn find_delimited<'t>(
    regex: &Regex,
    kind: MatchKind,
    text: &'t str,
    from: usize,
) -> Option<Match<'t>> {
    let caps = regex.captures_at(text, from)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1)?;
    Some(Match {
        kind,
        span: whole.range(),
        source: whole.as_str(),
        main: inner.as_str(),
        ruby: None,
        tooltip: None,
    })
}

fn find_ruby(text: &str, from: usize) -> Option<Match<'_>> {
    let mut at = from;
    while at <= text.len() {
        let caps = RUBY.captures_at(text, at)?;
        let whole = caps.get(0)?;
        let main = caps.name("main")?.as_str();
        let ruby = caps.name("ruby").map(|m| m.as_str());
        let tooltip = caps.name("tooltip").map(|m| m.as_str());

        let kind = match (ruby, tooltip) {
            (_, Some(_)) => Some(MatchKind::RubyTooltip),
            // `[main|ruby]{` without a closing brace is not a plain ruby
            (Some(_), None) if !text[whole.end()..].starts_with('{') => Some(MatchKind::RubyPlain),
            _ => None,
        };

        if let Some(kind) = kind {
            return Some(Match {
                kind,
                span: whole.range(),
                source: whole.as_str(),
                main,
                ruby,
                tooltip,
            });
        }

        // Matches start at `[`, a single byte, so the next offset is a
        // character boundary.
        at = whole.start() + 1;
    }
    None
}

/// Lazy left-to-right scan of one text run.
pub struct Scanner<'t> {
    grammar: Grammar,
    text: &'t str,
    pos: usize,
    next_match: Option<Match<'t>>,
}

impl<'t> Scanner<'t> {
    pub fn new(grammar: Grammar, text: &'t str) -> Self {
        Scanner {
            grammar,
            text,
            pos: 0,
            next_match: None,
        }
    }
}

impl<'t> Iterator for Scanner<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Segment<'t>> {
        if let Some(m) = self.next_match.take() {
            return Some(Segment::Match(m));
        }
        if self.pos >= self.text.len() {
            return None;
        }

        match self.grammar.find_at(self.text, self.pos) {
            Some(m) => {
                let gap = &self.text[self.pos..m.span.start];
                self.pos = m.span.end;
                if gap.is_empty() {
                    Some(Segment::Match(m))
                } else {
                    self.next_match = Some(m);
                    Some(Segment::Gap(gap))
                }
            }
            None => {
                let rest = &self.text[self.pos..];
                self.pos = self.text.len();
                Some(Segment::Gap(rest))
            }
        }
    }
}

/// Match a tooltip continuation token at the very start of `text`.
///
/// Returns the tooltip and the number of bytes the token occupies.
pub fn tooltip_prefix(text: &str) -> Option<(&str, usize)> {
    let caps = TOOLTIP_PREFIX.captures(text)?;
    let whole = caps.get(0)?;
    let tooltip = caps.get(1)?;
    Some((tooltip.as_str(), whole.end()))
}
