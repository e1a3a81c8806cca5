//! Filter list parsing
//!
//! One rule per line, EasyList-style syntax:
//!
//! - blank lines, `!` comments and `[...]` section headers are ignored
//! - `@@` marks an exception rule
//! - `pattern##selector` is an element-hiding rule, optionally restricted
//!   to URLs matching the text before the marker
//! - `$options` after a pattern are accepted syntactically but inert
//! - `||`, leading `|` and trailing `|` anchor the pattern
//!
//! Parsing performs no I/O; see [`crate::loader`] for reading lists from
//! disk.

use sift_core::pattern::{Anchors, Pattern};
use sift_core::types::{FilterList, HidingRule, PatternRule, Rule};

/// Marker separating the URL restriction from the CSS selector.
const HIDING_MARKER: &str = "##";

/// Parse a whole filter list into its rule collections, in line order.
pub fn parse_filter_list(name: &str, text: &str) -> FilterList {
    let mut list = FilterList::new(name);
    for line in text.lines() {
        if let Some(rule) = parse_line(line) {
            list.push(rule);
        }
    }
    list
}

/// Parse one filter-list line.
///
/// Returns `None` for lines that produce no rule: blanks, `!` comments,
/// `[...]` section headers, and hiding rules with an empty selector.
pub fn parse_line(line: &str) -> Option<Rule> {
    if line.is_empty() || line.starts_with('!') || line.starts_with('[') {
        return None;
    }

    let (is_exception, rest) = match line.strip_prefix("@@") {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    // A hiding marker wins over everything else, including a leading `@@`:
    // `@@pattern##selector` still becomes a hiding rule. Existing lists
    // depend on that classification order, so it is kept as-is.
    if let Some(pos) = rest.find(HIDING_MARKER) {
        return parse_hiding_rule(&rest[..pos], &rest[pos + HIDING_MARKER.len()..]);
    }

    // Filter options ($script, $domain=, ...) are accepted and discarded.
    let pattern_text = match rest.find('$') {
        Some(pos) => &rest[..pos],
        None => rest,
    };

    let (pattern_text, anchors) = strip_anchor_markers(pattern_text);
    let rule = PatternRule {
        pattern: Pattern::compile(pattern_text, anchors),
        anchors,
    };

    Some(if is_exception {
        Rule::Exception(rule)
    } else {
        Rule::Block(rule)
    })
}

fn parse_hiding_rule(restriction: &str, selector: &str) -> Option<Rule> {
    if selector.is_empty() {
        // A marker with nothing after it hides nothing.
        log::debug!("dropping hiding rule with empty selector");
        return None;
    }

    let restriction = if restriction.is_empty() {
        None
    } else {
        Some(Pattern::compile(restriction, Anchors::empty()))
    };

    Some(Rule::Hiding(HidingRule {
        css: format!("{selector} {{ display: none; }}\n"),
        restriction,
    }))
}

/// Strip anchor markers and record them: a leading `||` (domain anchor) or
/// `|` (beginning), then independently a trailing `|` (ending).
fn strip_anchor_markers(text: &str) -> (&str, Anchors) {
    let mut anchors = Anchors::empty();
    let mut rest = text;

    if let Some(stripped) = rest.strip_prefix("||") {
        anchors |= Anchors::DOMAIN;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('|') {
        anchors |= Anchors::BEGINNING;
        rest = stripped;
    }

    if let Some(stripped) = rest.strip_suffix('|') {
        anchors |= Anchors::ENDING;
        rest = stripped;
    }

    (rest, anchors)
}
