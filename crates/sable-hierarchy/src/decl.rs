use indexmap::IndexMap;
use sable_core::{ClassType, MethodSignature, MethodSubSignature};

use crate::error::{HierarchyError, Result};
use crate::modifiers::{ClassModifiers, MethodModifiers};

/// A declared method: its signature and access flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDecl {
    signature: MethodSignature,
    modifiers: MethodModifiers,
}

impl MethodDecl {
    pub fn new(signature: MethodSignature, modifiers: MethodModifiers) -> Self {
        Self {
            signature,
            modifiers,
        }
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    pub fn sub_signature(&self) -> &MethodSubSignature {
        self.signature.sub_signature()
    }

    pub fn declaring_class(&self) -> &ClassType {
        self.signature.declaring_class()
    }

    pub fn modifiers(&self) -> MethodModifiers {
        self.modifiers
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(MethodModifiers::ABSTRACT)
    }

    pub fn is_private(&self) -> bool {
        self.modifiers.contains(MethodModifiers::PRIVATE)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }

    pub fn is_native(&self) -> bool {
        self.modifiers.contains(MethodModifiers::NATIVE)
    }

    /// Abstract and native methods carry no body.
    pub fn has_body(&self) -> bool {
        !self.is_abstract() && !self.is_native()
    }
}

/// A class or interface declaration.
///
/// Methods are keyed by sub-signature and keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    ty: ClassType,
    modifiers: ClassModifiers,
    superclass: Option<ClassType>,
    interfaces: Vec<ClassType>,
    methods: IndexMap<MethodSubSignature, MethodDecl>,
}

impl ClassDecl {
    pub fn new(
        ty: ClassType,
        modifiers: ClassModifiers,
        superclass: Option<ClassType>,
        interfaces: Vec<ClassType>,
    ) -> Self {
        Self {
            ty,
            modifiers,
            superclass,
            interfaces,
            methods: IndexMap::new(),
        }
    }

    /// Add a method declared on this class. A later declaration with the same
    /// sub-signature replaces the earlier one.
    pub fn with_method(mut self, method: MethodDecl) -> Result<Self> {
        if method.declaring_class() != &self.ty {
            return Err(HierarchyError::ForeignMethod {
                class: self.ty,
                method: method.signature,
            });
        }
        self.methods.insert(method.sub_signature().clone(), method);
        Ok(self)
    }

    pub fn ty(&self) -> &ClassType {
        &self.ty
    }

    pub fn modifiers(&self) -> ClassModifiers {
        self.modifiers
    }

    pub fn superclass(&self) -> Option<&ClassType> {
        self.superclass.as_ref()
    }

    /// Directly implemented (or, for interfaces, extended) interfaces in
    /// declaration order.
    pub fn interfaces(&self) -> &[ClassType] {
        &self.interfaces
    }

    pub fn method(&self, sub_signature: &MethodSubSignature) -> Option<&MethodDecl> {
        self.methods.get(sub_signature)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> + '_ {
        self.methods.values()
    }

    pub fn is_interface(&self) -> bool {
        self.modifiers.contains(ClassModifiers::INTERFACE)
    }

    /// Interfaces count as abstract.
    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.modifiers.contains(ClassModifiers::ABSTRACT)
    }

    /// Direct supertypes: the superclass first, then interfaces.
    pub fn direct_supertypes(&self) -> impl Iterator<Item = &ClassType> + '_ {
        self.superclass.iter().chain(self.interfaces.iter())
    }
}
