//! Core graph data structures.

use core::fmt;
use mi_core::{ComponentKind, InteractionKind};

/// A model component (graph node): a species, reaction, parameter or compartment.
///
/// The name is the identity; it is unique within a model and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
}

/// Identity of an interaction: the ordered (source, target) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InteractionKey {
    pub source: String,
    pub target: String,
}

impl InteractionKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True if either endpoint is `name`.
    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }
}

impl fmt::Display for InteractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.source, self.target)
    }
}

/// A typed, directed interaction between two components (graph edge).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub source: String,
    pub target: String,
    pub kind: InteractionKind,
}

impl Interaction {
    pub fn key(&self) -> InteractionKey {
        InteractionKey::new(self.source.clone(), self.target.clone())
    }

    pub fn touches(&self, name: &str) -> bool {
        self.source == name || self.target == name
    }
}

/// Owned copy of a graph's contents, in insertion order.
///
/// Snapshots are detached from the store: mutating the store afterwards does
/// not affect a snapshot already handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
    pub components: Vec<Component>,
    pub interactions: Vec<Interaction>,
}

impl GraphSnapshot {
    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.interactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_uses_pipe() {
        let key = InteractionKey::new("A", "B");
        assert_eq!(key.to_string(), "A|B");
    }

    #[test]
    fn key_is_ordered_pair() {
        assert_ne!(InteractionKey::new("A", "B"), InteractionKey::new("B", "A"));
        assert!(InteractionKey::new("A", "B").touches("B"));
        assert!(!InteractionKey::new("A", "B").touches("C"));
    }
}
