use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ClassType, Name, Type, CONSTRUCTOR_NAME, STATIC_INITIALIZER_NAME};

/// Method signature without its declaring class.
///
/// Two methods override each other iff their sub-signatures are equal, which
/// makes this the lookup key for declared methods.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodSubSignature {
    name: Name,
    parameter_types: Vec<Type>,
    return_type: Type,
}

impl MethodSubSignature {
    pub fn new(name: impl Into<Name>, parameter_types: Vec<Type>, return_type: Type) -> Self {
        Self {
            name: name.into(),
            parameter_types,
            return_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[Type] {
        &self.parameter_types
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn is_static_initializer(&self) -> bool {
        self.name == STATIC_INITIALIZER_NAME
    }
}

impl fmt::Display for MethodSubSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (idx, param) in self.parameter_types.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

/// Fully-qualified method signature: declaring class plus sub-signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodSignature {
    declaring_class: ClassType,
    sub_signature: MethodSubSignature,
}

impl MethodSignature {
    pub fn new(declaring_class: ClassType, sub_signature: MethodSubSignature) -> Self {
        Self {
            declaring_class,
            sub_signature,
        }
    }

    pub fn declaring_class(&self) -> &ClassType {
        &self.declaring_class
    }

    pub fn sub_signature(&self) -> &MethodSubSignature {
        &self.sub_signature
    }

    pub fn name(&self) -> &str {
        self.sub_signature.name()
    }

    pub fn parameter_types(&self) -> &[Type] {
        self.sub_signature.parameter_types()
    }

    pub fn return_type(&self) -> &Type {
        self.sub_signature.return_type()
    }

    /// The same sub-signature, declared on `class`.
    #[must_use]
    pub fn with_declaring_class(&self, class: ClassType) -> Self {
        Self::new(class, self.sub_signature.clone())
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.declaring_class, self.sub_signature)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldSignature {
    declaring_class: ClassType,
    name: Name,
    ty: Type,
}

impl FieldSignature {
    pub fn new(declaring_class: ClassType, name: impl Into<Name>, ty: Type) -> Self {
        Self {
            declaring_class,
            name: name.into(),
            ty,
        }
    }

    pub fn declaring_class(&self) -> &ClassType {
        &self.declaring_class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl fmt::Display for FieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {} {}>", self.declaring_class, self.ty, self.name)
    }
}
