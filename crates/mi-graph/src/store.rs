//! Mutable graph store: the single source of truth for model topology.

use std::collections::HashMap;

use mi_core::{ComponentKind, InteractionKind, MiError, MiResult};
use tracing::debug;

use crate::graph::{Component, GraphSnapshot, Interaction, InteractionKey};
use crate::validate;

/// Canonical set of components and interactions for the active model.
///
/// Components and interactions are kept in insertion order, with a name/key
/// index beside each vector. Callers only see owned snapshots; the containers
/// themselves are never handed out mutably.
///
/// Every mutation is all-or-nothing: a rejected call leaves the store exactly
/// as it was.
#[derive(Debug, Default, Clone)]
pub struct GraphStore {
    pub(crate) components: Vec<Component>,
    pub(crate) component_index: HashMap<String, usize>,
    pub(crate) interactions: Vec<Interaction>,
    pub(crate) interaction_index: HashMap<InteractionKey, usize>,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Names must be non-empty and not already present.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        kind: ComponentKind,
    ) -> MiResult<Component> {
        let name = name.into();
        self.check_new_component(&name)?;

        let component = Component { name, kind };
        self.component_index
            .insert(component.name.clone(), self.components.len());
        self.components.push(component.clone());
        debug!(name = %component.name, kind = %component.kind, "component added");
        Ok(component)
    }

    /// Check that a component called `name` could be added, without adding it.
    pub fn check_new_component(&self, name: &str) -> MiResult<()> {
        if name.trim().is_empty() {
            return Err(MiError::invalid("component name must not be empty"));
        }
        if self.component_index.contains_key(name) {
            return Err(MiError::duplicate("component", name));
        }
        Ok(())
    }

    /// Remove a component and every interaction that references it.
    pub fn remove_component(&mut self, name: &str) -> MiResult<Component> {
        let Some(&idx) = self.component_index.get(name) else {
            return Err(MiError::not_found("component", name));
        };

        let removed = self.components.remove(idx);
        let before = self.interactions.len();
        self.interactions.retain(|i| !i.touches(name));
        let cascaded = before - self.interactions.len();

        self.rebuild_component_index();
        if cascaded > 0 {
            self.rebuild_interaction_index();
        }
        debug!(name, cascaded, "component removed");
        Ok(removed)
    }

    /// Add an interaction between two existing components.
    ///
    /// An interaction already present for the same (source, target) pair is
    /// overwritten in place: its type is replaced and its position kept.
    pub fn add_interaction(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: InteractionKind,
    ) -> MiResult<Interaction> {
        let source = source.into();
        let target = target.into();
        if !self.component_index.contains_key(&source) {
            return Err(MiError::not_found("component", source));
        }
        if !self.component_index.contains_key(&target) {
            return Err(MiError::not_found("component", target));
        }

        let interaction = Interaction {
            source,
            target,
            kind,
        };
        let key = interaction.key();
        match self.interaction_index.get(&key) {
            Some(&idx) => {
                debug!(key = %key, previous = %self.interactions[idx].kind, kind = %interaction.kind, "interaction overwritten");
                self.interactions[idx] = interaction.clone();
            }
            None => {
                debug!(key = %key, kind = %interaction.kind, "interaction added");
                self.interaction_index.insert(key, self.interactions.len());
                self.interactions.push(interaction.clone());
            }
        }
        Ok(interaction)
    }

    /// Remove the interaction for a (source, target) pair.
    pub fn remove_interaction(&mut self, source: &str, target: &str) -> MiResult<Interaction> {
        let key = InteractionKey::new(source, target);
        let Some(&idx) = self.interaction_index.get(&key) else {
            return Err(MiError::not_found("interaction", key.to_string()));
        };
        let removed = self.interactions.remove(idx);
        self.rebuild_interaction_index();
        debug!(key = %key, "interaction removed");
        Ok(removed)
    }

    /// Snapshot of all components, in insertion order.
    pub fn list_components(&self) -> Vec<Component> {
        self.components.clone()
    }

    /// Snapshot of all interactions, in insertion order.
    pub fn list_interactions(&self) -> Vec<Interaction> {
        self.interactions.clone()
    }

    /// Snapshot of the whole graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            components: self.list_components(),
            interactions: self.list_interactions(),
        }
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.component_index.get(name).map(|&i| &self.components[i])
    }

    pub fn interaction(&self, source: &str, target: &str) -> Option<&Interaction> {
        self.interaction_index
            .get(&InteractionKey::new(source, target))
            .map(|&i| &self.interactions[i])
    }

    pub fn contains_component(&self, name: &str) -> bool {
        self.component_index.contains_key(name)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Empty the store.
    pub fn clear(&mut self) {
        *self = Self::default();
        debug!("graph cleared");
    }

    /// Replace the whole graph with `snapshot`.
    ///
    /// The snapshot is replayed into a staging store first (components, then
    /// interactions); the live store is only swapped once every entry was
    /// accepted. Duplicate interaction pairs collapse last-write-wins.
    pub fn replace_with(&mut self, snapshot: &GraphSnapshot) -> MiResult<()> {
        let mut staged = GraphStore::new();
        for c in &snapshot.components {
            staged.add_component(c.name.clone(), c.kind.clone())?;
        }
        for i in &snapshot.interactions {
            staged.add_interaction(i.source.clone(), i.target.clone(), i.kind.clone())?;
        }
        *self = staged;
        debug!(
            components = self.components.len(),
            interactions = self.interactions.len(),
            "graph replaced"
        );
        Ok(())
    }

    /// Re-check the store's internal invariants.
    pub fn validate(&self) -> MiResult<()> {
        validate::validate_store(self)
    }

    fn rebuild_component_index(&mut self) {
        self.component_index = self
            .components
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
    }

    fn rebuild_interaction_index(&mut self) {
        self.interaction_index = self
            .interactions
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key(), i))
            .collect();
    }
}
