use sable_core::{ClassType, MethodSignature};

pub type Result<T> = std::result::Result<T, HierarchyError>;

/// Errors raised while assembling a class universe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("method {method} cannot be added to class {class}")]
    ForeignMethod {
        class: ClassType,
        method: MethodSignature,
    },

    #[error("class {class} is declared more than once")]
    DuplicateClass { class: ClassType },

    #[error("inheritance cycle through {class}")]
    InheritanceCycle { class: ClassType },
}
