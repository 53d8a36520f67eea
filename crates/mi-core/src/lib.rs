//! mi-core: stable foundation for modelit.
//!
//! Contains:
//! - error (shared error taxonomy)
//! - kinds (component and interaction type tags)

pub mod error;
pub mod kinds;

// Re-exports: nice ergonomics for downstream crates
pub use error::{MiError, MiResult};
pub use kinds::{ComponentKind, InteractionKind};
