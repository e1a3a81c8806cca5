//! Rule and filter-list definitions
//!
//! Everything here is built once at load time and never mutated afterwards,
//! so a published [`FilterSet`] can be shared freely across concurrent
//! evaluations.

use crate::pattern::{Anchors, Pattern};

// =============================================================================
// Rules
// =============================================================================

/// A block or exception pattern rule: one compiled matcher plus the
/// anchoring extracted from the original line.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub pattern: Pattern,
    pub anchors: Anchors,
}

/// An element-hiding rule.
#[derive(Debug, Clone)]
pub struct HidingRule {
    /// Pre-synthesized stylesheet text: `<selector> { display: none; }\n`.
    pub css: String,
    /// URL restriction from the text before the `##` marker.
    /// `None` applies on every page.
    pub restriction: Option<Pattern>,
}

/// One parsed filter-list line. The variant is fixed at parse time.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Pattern whose match suppresses the request
    Block(PatternRule),
    /// `@@` pattern whose match overrides block rules
    Exception(PatternRule),
    /// `##` CSS selector to hide matched elements
    Hiding(HidingRule),
}

// =============================================================================
// Filter lists
// =============================================================================

/// Rules parsed from one filter-list file, split by kind, in file order.
#[derive(Debug, Clone, Default)]
pub struct FilterList {
    /// List name; the file path for lists loaded from disk.
    pub name: String,
    pub blocks: Vec<PatternRule>,
    pub exceptions: Vec<PatternRule>,
    pub hiding: Vec<HidingRule>,
}

impl FilterList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a parsed rule to the collection for its variant.
    pub fn push(&mut self, rule: Rule) {
        match rule {
            Rule::Block(rule) => self.blocks.push(rule),
            Rule::Exception(rule) => self.exceptions.push(rule),
            Rule::Hiding(rule) => self.hiding.push(rule),
        }
    }

    /// Total number of rules across all three collections.
    pub fn rule_count(&self) -> usize {
        self.blocks.len() + self.exceptions.len() + self.hiding.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }
}

/// An ordered sequence of filter lists, owned by the host.
///
/// Order is evaluation order: the first list to produce a verdict wins, so
/// it must be preserved exactly as supplied (load order for lists read from
/// a directory).
pub type FilterSet = Vec<FilterList>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_dispatches_by_variant() {
        let mut list = FilterList::new("test");
        list.push(Rule::Block(PatternRule {
            pattern: Pattern::compile("ads", Anchors::empty()),
            anchors: Anchors::empty(),
        }));
        list.push(Rule::Exception(PatternRule {
            pattern: Pattern::compile("ads/ok", Anchors::empty()),
            anchors: Anchors::empty(),
        }));
        list.push(Rule::Hiding(HidingRule {
            css: ".banner { display: none; }\n".to_string(),
            restriction: None,
        }));

        assert_eq!(list.blocks.len(), 1);
        assert_eq!(list.exceptions.len(), 1);
        assert_eq!(list.hiding.len(), 1);
        assert_eq!(list.rule_count(), 3);
        assert!(!list.is_empty());
    }

    #[test]
    fn new_list_is_empty() {
        let list = FilterList::new("empty");
        assert_eq!(list.name, "empty");
        assert!(list.is_empty());
    }
}
