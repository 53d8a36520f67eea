//! mi-graph: graph/model layer for modelit.
//!
//! Provides:
//! - Core graph data structures (Component, Interaction, GraphSnapshot)
//! - The mutable `GraphStore` with identity and cascade rules
//! - Invariant validation
//!
//! # Example
//!
//! ```
//! use mi_core::{ComponentKind, InteractionKind};
//! use mi_graph::GraphStore;
//!
//! let mut store = GraphStore::new();
//! store.add_component("Glucose", ComponentKind::Species).unwrap();
//! store.add_component("Hexokinase", ComponentKind::Reaction).unwrap();
//! store
//!     .add_interaction("Hexokinase", "Glucose", InteractionKind::Catalysis)
//!     .unwrap();
//!
//! store.remove_component("Glucose").unwrap();
//! assert_eq!(store.list_interactions().len(), 0);
//! ```

pub mod graph;
pub mod store;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use graph::{Component, GraphSnapshot, Interaction, InteractionKey};
pub use store::GraphStore;
