//! Component and interaction type tags.
//!
//! Both tags are open: strings outside the known set are carried as `Custom`
//! and written back unchanged, so simulator-defined types survive a round trip.

use core::fmt;

/// Type of a model component (graph node).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum ComponentKind {
    #[default]
    Species,
    Reaction,
    Parameter,
    Compartment,
    Custom(String),
}

impl ComponentKind {
    pub fn as_str(&self) -> &str {
        match self {
            ComponentKind::Species => "species",
            ComponentKind::Reaction => "reaction",
            ComponentKind::Parameter => "parameter",
            ComponentKind::Compartment => "compartment",
            ComponentKind::Custom(s) => s,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ComponentKind::Custom(_))
    }
}

impl From<&str> for ComponentKind {
    fn from(s: &str) -> Self {
        match s {
            "" | "species" => ComponentKind::Species,
            "reaction" => ComponentKind::Reaction,
            "parameter" => ComponentKind::Parameter,
            "compartment" => ComponentKind::Compartment,
            other => ComponentKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for ComponentKind {
    fn from(s: String) -> Self {
        ComponentKind::from(s.as_str())
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Custom(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of an interaction (directed graph edge).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum InteractionKind {
    #[default]
    Activation,
    Inhibition,
    Catalysis,
    Custom(String),
}

impl InteractionKind {
    pub fn as_str(&self) -> &str {
        match self {
            InteractionKind::Activation => "activation",
            InteractionKind::Inhibition => "inhibition",
            InteractionKind::Catalysis => "catalysis",
            InteractionKind::Custom(s) => s,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, InteractionKind::Custom(_))
    }
}

impl From<&str> for InteractionKind {
    fn from(s: &str) -> Self {
        match s {
            "" | "activation" => InteractionKind::Activation,
            "inhibition" => InteractionKind::Inhibition,
            "catalysis" => InteractionKind::Catalysis,
            other => InteractionKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for InteractionKind {
    fn from(s: String) -> Self {
        InteractionKind::from(s.as_str())
    }
}

impl From<InteractionKind> for String {
    fn from(kind: InteractionKind) -> Self {
        match kind {
            InteractionKind::Custom(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
