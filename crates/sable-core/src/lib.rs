//! Core value types shared by the Sable crates.
//!
//! Everything in here is a small, immutable value object: source positions,
//! the type model, and the field/method signatures the IR and the dispatch
//! resolver key their lookups on.

#![forbid(unsafe_code)]

mod descriptor;
mod position;
mod signature;
mod types;

pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor, DescriptorError};
pub use crate::position::StmtPosition;
pub use crate::signature::{FieldSignature, MethodSignature, MethodSubSignature};
pub use crate::types::{ClassType, PrimitiveType, Type};

/// Identifier text (method names, local names, package segments).
pub type Name = smol_str::SmolStr;

/// Name of instance initializers in JVM bytecode.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Name of the static initializer in JVM bytecode.
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";
