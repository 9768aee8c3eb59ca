//! Class declarations, the subtype relation over them and a frozen in-memory
//! class universe implementing both.

#![forbid(unsafe_code)]

mod decl;
mod error;
mod hierarchy;
mod modifiers;
mod universe;

pub use decl::{ClassDecl, MethodDecl};
pub use error::{HierarchyError, Result};
pub use hierarchy::{TypeHierarchy, View};
pub use modifiers::{ClassModifiers, MethodModifiers};
pub use universe::{ClassUniverse, ClassUniverseBuilder};
