//! Adblock-style pattern compilation
//!
//! Translates one filter-list pattern into an anchored matcher. The
//! translation runs once, at load time; evaluation reuses the compiled
//! expression for the lifetime of the rule.

use regex::Regex;

// =============================================================================
// Anchors
// =============================================================================

bitflags::bitflags! {
    /// How the original pattern text was anchored.
    ///
    /// Recorded on the rule to explain matcher construction; the compiled
    /// matcher already embeds the anchoring, so these flags are never
    /// consulted during evaluation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Anchors: u8 {
        /// Pattern started with `|` - match from the start of the URI
        const BEGINNING = 1 << 0;
        /// Pattern ended with `|` - match up to the end of the URI
        const ENDING = 1 << 1;
        /// Pattern started with `||` - match at the start of the hostname,
        /// including any subdomain
        const DOMAIN = 1 << 2;
    }
}

// =============================================================================
// Pattern
// =============================================================================

/// The adblock `^` separator wildcard: one delimiter-like character
/// (anything except a word character, `-`, `.`, `,` or `%`), or the end
/// of the URI. Not a regex anchor.
const SEPARATOR: &str = r"(?:[^\w\-.,%]|$)";

/// Prefix for `||`-anchored patterns: the URI scheme plus any subdomain,
/// so `||example.com` matches `http://ads.example.com/` but not
/// `http://notexample.com/`.
const HOST_ANCHOR: &str = r"^[\w\-]+://(?:[^/]*\.)?";

/// A compiled, immutable filter pattern.
///
/// Compilation never fails outward: a pattern whose translation does not
/// form a valid expression produces a matcher that reports no match for any
/// input. A broken filter rule must never take down request handling.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Option<Regex>,
}

impl Pattern {
    /// Translate and compile `raw` under the given anchoring.
    ///
    /// A leading `||` (with [`Anchors::DOMAIN`]) or `|` (with
    /// [`Anchors::BEGINNING`]) still present on `raw` is stripped here, so
    /// both pre-stripped parser output and raw pattern text are accepted.
    pub fn compile(raw: &str, anchors: Anchors) -> Self {
        let raw = strip_leading_marker(raw, anchors);
        let source = translate(raw, anchors);
        let regex = match Regex::new(&source) {
            Ok(regex) => Some(regex),
            Err(err) => {
                log::warn!("filter pattern {raw:?} does not compile, rule disabled: {err}");
                None
            }
        };
        Self { regex }
    }

    /// True when the pattern can never match (failed compilation).
    pub fn is_inert(&self) -> bool {
        self.regex.is_none()
    }

    /// Test a candidate URI against the compiled pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(candidate),
            None => false,
        }
    }
}

fn strip_leading_marker(raw: &str, anchors: Anchors) -> &str {
    if anchors.contains(Anchors::DOMAIN) {
        raw.strip_prefix("||").unwrap_or(raw)
    } else if anchors.contains(Anchors::BEGINNING) {
        raw.strip_prefix('|').unwrap_or(raw)
    } else {
        raw
    }
}

/// Character-by-character translation of adblock pattern syntax into regex
/// syntax, plus anchoring.
fn translate(raw: &str, anchors: Anchors) -> String {
    let mut out = String::with_capacity(raw.len() + HOST_ANCHOR.len());

    if anchors.contains(Anchors::DOMAIN) {
        out.push_str(HOST_ANCHOR);
    } else if anchors.contains(Anchors::BEGINNING) {
        out.push('^');
    } else {
        out.push_str(".*");
    }

    for ch in raw.chars() {
        match ch {
            '^' => out.push_str(SEPARATOR),
            '*' => out.push_str(".*"),
            // Literal dot, not "any character".
            '.' => out.push_str(r"\."),
            // Any pipe not consumed as an anchor marker is literal.
            '|' => out.push_str(r"\|"),
            '?' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '$' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    if anchors.contains(Anchors::ENDING) {
        out.push('$');
    } else {
        out.push_str(".*");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_anchor_matches_host_start() {
        let pattern = Pattern::compile("||example.com^", Anchors::DOMAIN);
        assert!(pattern.matches("http://example.com/ad.js"));
        assert!(!pattern.matches("http://notexample.com/x"));
    }

    #[test]
    fn domain_anchor_matches_subdomains() {
        let pattern = Pattern::compile("||example.com^", Anchors::DOMAIN);
        assert!(pattern.matches("https://ads.example.com/banner.png"));
        assert!(!pattern.matches("https://example.computer.test/"));
    }

    #[test]
    fn unanchored_pattern_matches_substring() {
        let pattern = Pattern::compile("/ads/*", Anchors::empty());
        assert!(pattern.matches("http://x.test/path/ads/banner.png"));
        assert!(!pattern.matches("http://x.test/content/img.png"));
    }

    #[test]
    fn separator_matches_one_delimiter_or_end() {
        let pattern = Pattern::compile("example.com^", Anchors::empty());
        assert!(pattern.matches("http://example.com/"));
        assert!(pattern.matches("http://example.com:8080/"));
        // End of the URI counts as a separator.
        assert!(pattern.matches("http://example.com"));
        assert!(!pattern.matches("http://example.company.test"));
    }

    #[test]
    fn beginning_anchor_pins_to_start() {
        let pattern = Pattern::compile("http://a.test", Anchors::BEGINNING);
        assert!(pattern.matches("http://a.test/page"));
        assert!(!pattern.matches("https://b.test/?next=http://a.test"));
    }

    #[test]
    fn ending_anchor_matches_up_to_end() {
        let pattern = Pattern::compile("banner.gif", Anchors::ENDING);
        assert!(pattern.matches("http://x.test/ads/banner.gif"));
        assert!(!pattern.matches("http://x.test/ads/banner.gif?cache=1"));
    }

    #[test]
    fn both_anchors_require_exact_span() {
        let pattern = Pattern::compile("http://a.test/x", Anchors::BEGINNING | Anchors::ENDING);
        assert!(pattern.matches("http://a.test/x"));
        assert!(!pattern.matches("http://a.test/x/y"));
        assert!(!pattern.matches("zhttp://a.test/x"));
    }

    #[test]
    fn dot_is_literal() {
        let pattern = Pattern::compile("ad.js", Anchors::empty());
        assert!(pattern.matches("http://x.test/ad.js"));
        assert!(!pattern.matches("http://x.test/adxjs"));
    }

    #[test]
    fn stray_pipe_is_literal() {
        let pattern = Pattern::compile("a|b", Anchors::empty());
        assert!(pattern.matches("http://x.test/a|b"));
        assert!(!pattern.matches("http://x.test/a"));
    }

    #[test]
    fn structural_characters_match_literally() {
        let pattern = Pattern::compile("path?id=1", Anchors::empty());
        assert!(pattern.matches("http://x.test/path?id=1"));
        assert!(!pattern.matches("http://x.test/pat-id=1"));
    }

    #[test]
    fn star_spans_any_run() {
        let pattern = Pattern::compile("ads*banner", Anchors::empty());
        assert!(pattern.matches("http://x.test/ads/2024/banner"));
        assert!(pattern.matches("http://x.test/adsbanner"));
    }

    #[test]
    fn untranslatable_pattern_never_matches_and_never_panics() {
        // A stray backslash escape survives translation and fails to compile.
        let pattern = Pattern::compile(r"ad\q", Anchors::empty());
        assert!(pattern.is_inert());
        assert!(!pattern.matches(r"http://x.test/ad\q"));
        assert!(!pattern.matches(""));
    }
}
