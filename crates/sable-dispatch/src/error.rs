use sable_core::{ClassType, MethodSignature};

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Fatal dispatch failures.
///
/// These signal a broken precondition (an inconsistent or incomplete class
/// universe, or a call with no implementation at all). An abstract method with
/// no concrete target is not an error; it resolves to `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("could not resolve {class}, but it is named by the type hierarchy")]
    ClassNotInView { class: ClassType },

    #[error("could not find a concrete method for {method} because the method is abstract")]
    AbstractMethod { method: MethodSignature },

    #[error("could not find a concrete method for {method}")]
    NoConcreteImplementation { method: MethodSignature },

    #[error("{method} has {} maximally specific interface declarations", .candidates.len())]
    AmbiguousDefaultMethod {
        method: MethodSignature,
        candidates: Vec<MethodSignature>,
    },

    #[error("{method} is not invoked through a special invocation")]
    NotSpecialInvoke { method: MethodSignature },
}
