use thiserror::Error;

pub type MiResult<T> = Result<T, MiError>;

/// Error taxonomy shared by the graph store, codec, reconciler and session.
///
/// Every variant except [`MiError::OutOfOrderEvent`] leaves the state it was
/// raised from untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MiError {
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("Duplicate {kind}: {name}")]
    DuplicateIdentity { kind: &'static str, name: String },

    #[error("Conflict: {what}")]
    Conflict { what: String },

    #[error("Out-of-order event dropped: {what}")]
    OutOfOrderEvent { what: String },

    #[error("Transport failure: {what}")]
    Transport { what: String },
}

impl MiError {
    pub fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArgument { what: what.into() }
    }

    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateIdentity {
            kind,
            name: name.into(),
        }
    }

    pub fn conflict(what: impl Into<String>) -> Self {
        Self::Conflict { what: what.into() }
    }

    pub fn out_of_order(what: impl Into<String>) -> Self {
        Self::OutOfOrderEvent { what: what.into() }
    }

    pub fn transport(what: impl Into<String>) -> Self {
        Self::Transport { what: what.into() }
    }

    /// Out-of-order events are warnings: the event is dropped and processing continues.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::OutOfOrderEvent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_is_not_fatal() {
        assert!(!MiError::out_of_order("late update").is_fatal());
        assert!(MiError::conflict("run in flight").is_fatal());
        assert!(MiError::transport("refused").is_fatal());
    }

    #[test]
    fn display_names_kind() {
        let err = MiError::not_found("component", "ATP");
        assert_eq!(err.to_string(), "component not found: ATP");
        let err = MiError::duplicate("component", "ATP");
        assert_eq!(err.to_string(), "Duplicate component: ATP");
    }
}
