//! Request matching
//!
//! This is the hot path: `should_block` runs once per resource on every
//! page load, `collect_hiding_css` once per navigation. Both are pure
//! functions over an immutable [`FilterList`] slice; they allocate nothing
//! on the block/allow path and keep no state between calls.

use crate::types::FilterList;

/// Decide whether a resource request for `uri` should be blocked.
///
/// Lists are consulted in order. Within a list, exceptions are checked
/// before block patterns, and the first matching rule decides:
///
/// - an exception match ends evaluation immediately with "allow", across
///   all remaining lists;
/// - a block match ends evaluation immediately with "block".
///
/// A list with no matching rule passes the decision to the next list; if
/// no list produces a verdict the request is allowed. Because evaluation
/// stops at the first deciding list, a block rule in an earlier list beats
/// an exception in a later one.
pub fn should_block(uri: &str, filter_set: &[FilterList]) -> bool {
    for list in filter_set {
        if list.exceptions.iter().any(|rule| rule.pattern.matches(uri)) {
            log::debug!("{uri} allowed by exception in {}", list.name);
            return false;
        }
        if list.blocks.iter().any(|rule| rule.pattern.matches(uri)) {
            log::debug!("{uri} blocked by {}", list.name);
            return true;
        }
    }
    false
}

/// Aggregate the element-hiding CSS applicable to the page at `uri`.
///
/// Every hiding rule is visited in list order then rule order. A rule with
/// a URL restriction applies only when the restriction matches `uri`; an
/// unrestricted rule always applies. Applicable rules' pre-synthesized CSS
/// is concatenated in encounter order; duplicates are preserved.
pub fn collect_hiding_css(uri: &str, filter_set: &[FilterList]) -> String {
    let mut css = String::new();
    for list in filter_set {
        for rule in &list.hiding {
            let applies = match &rule.restriction {
                Some(restriction) => restriction.matches(uri),
                None => true,
            };
            if applies {
                css.push_str(&rule.css);
            }
        }
    }
    css
}
