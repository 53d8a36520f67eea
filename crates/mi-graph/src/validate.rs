//! Store validation logic.

use std::collections::HashSet;

use mi_core::{MiError, MiResult};

use crate::store::GraphStore;

/// Validate the store: names unique and non-empty, indexes consistent, no
/// interaction referencing an absent component.
pub(crate) fn validate_store(store: &GraphStore) -> MiResult<()> {
    let mut names: HashSet<&str> = HashSet::new();
    for (i, comp) in store.components.iter().enumerate() {
        if comp.name.trim().is_empty() {
            return Err(MiError::invalid(format!("component at position {i} has an empty name")));
        }
        if !names.insert(comp.name.as_str()) {
            return Err(MiError::duplicate("component", comp.name.clone()));
        }
        if store.component_index.get(&comp.name) != Some(&i) {
            return Err(MiError::conflict(format!(
                "component index out of sync for {}",
                comp.name
            )));
        }
    }
    if store.component_index.len() != store.components.len() {
        return Err(MiError::conflict("component index has stale entries"));
    }

    for (i, edge) in store.interactions.iter().enumerate() {
        for endpoint in [&edge.source, &edge.target] {
            if !names.contains(endpoint.as_str()) {
                return Err(MiError::not_found("component", endpoint.clone()));
            }
        }
        let key = edge.key();
        if store.interaction_index.get(&key) != Some(&i) {
            return Err(MiError::conflict(format!("interaction index out of sync for {key}")));
        }
    }
    if store.interaction_index.len() != store.interactions.len() {
        return Err(MiError::conflict("interaction index has stale entries"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Interaction;
    use mi_core::{ComponentKind, InteractionKind};

    #[test]
    fn validate_empty_store() {
        assert!(validate_store(&GraphStore::new()).is_ok());
    }

    #[test]
    fn validate_detects_dangling_interaction() {
        let mut store = GraphStore::new();
        store.add_component("A", ComponentKind::Species).unwrap();
        // Bypass the mutation API to simulate corruption.
        store.interactions.push(Interaction {
            source: "A".into(),
            target: "Ghost".into(),
            kind: InteractionKind::Activation,
        });
        let result = validate_store(&store);
        assert!(matches!(result, Err(MiError::NotFound { .. })));
    }

    #[test]
    fn validate_detects_stale_index() {
        let mut store = GraphStore::new();
        store.add_component("A", ComponentKind::Species).unwrap();
        store.component_index.insert("B".into(), 7);
        assert!(validate_store(&store).is_err());
    }
}
