use std::collections::{HashSet, VecDeque};

use sable_core::{ClassType, Type};

use crate::decl::ClassDecl;

const CLONEABLE: &str = "java.lang.Cloneable";
const SERIALIZABLE: &str = "java.io.Serializable";

/// Read-only subtype relation over class and interface types.
///
/// Implementors provide the direct edges; the transitive queries have default
/// implementations on top of them. Types outside the hierarchy are allowed as
/// supertypes and simply end a walk.
pub trait TypeHierarchy: Send + Sync {
    fn contains(&self, ty: &ClassType) -> bool;

    fn superclass_of(&self, ty: &ClassType) -> Option<ClassType>;

    /// Directly implemented or extended interfaces, in declaration order.
    fn interfaces_of(&self, ty: &ClassType) -> Vec<ClassType>;

    /// Classes and interfaces naming `ty` as a direct supertype, sorted.
    fn direct_subtypes_of(&self, ty: &ClassType) -> Vec<ClassType>;

    /// All transitive subtypes of `ty`, excluding `ty` itself.
    ///
    /// Breadth-first, nearest subtypes first; siblings keep the order of
    /// [`TypeHierarchy::direct_subtypes_of`].
    fn subtypes_of(&self, ty: &ClassType) -> Vec<ClassType> {
        let mut out = Vec::new();
        let mut seen: HashSet<ClassType> = HashSet::new();
        seen.insert(ty.clone());
        let mut queue: VecDeque<ClassType> = self.direct_subtypes_of(ty).into();

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.clone()) {
                continue;
            }
            queue.extend(self.direct_subtypes_of(&next));
            out.push(next);
        }

        out
    }

    /// Superclass chain of `ty`, nearest first and excluding `ty`.
    ///
    /// The chain stops before the first ancestor missing from the hierarchy;
    /// an incomplete universe shows up as a short chain, never as an error.
    fn incomplete_superclasses_of(&self, ty: &ClassType) -> Vec<ClassType> {
        let mut out: Vec<ClassType> = Vec::new();
        let mut current = ty.clone();
        while let Some(parent) = self.superclass_of(&current) {
            if !self.contains(&parent) || &parent == ty || out.contains(&parent) {
                break;
            }
            out.push(parent.clone());
            current = parent;
        }
        out
    }

    /// Every interface `ty` implements, directly or through its superclasses
    /// and super-interfaces. Breadth-first, each interface once.
    fn implemented_interfaces_of(&self, ty: &ClassType) -> Vec<ClassType> {
        let mut out = Vec::new();
        let mut seen: HashSet<ClassType> = HashSet::new();
        let mut queue: VecDeque<ClassType> = VecDeque::new();

        queue.extend(self.interfaces_of(ty));
        for class in self.incomplete_superclasses_of(ty) {
            queue.extend(self.interfaces_of(&class));
        }

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.clone()) {
                continue;
            }
            queue.extend(self.interfaces_of(&next));
            out.push(next);
        }

        out
    }

    /// Whether `sub` is `sup` or a (transitive) subtype of it.
    ///
    /// Reference arrays are covariant, every array is a subtype of `Object`,
    /// `Cloneable` and `Serializable`, and the null type is a subtype of every
    /// reference type.
    fn is_subtype(&self, sub: &Type, sup: &Type) -> bool {
        if sub == sup {
            return true;
        }
        match (sub, sup) {
            (Type::Null, sup) => sup.is_reference(),
            (Type::Class(sub), Type::Class(sup)) => self.is_class_subtype(sub, sup),
            (Type::Array(_), Type::Class(sup)) => {
                let name = sup.fully_qualified_name();
                sup.is_object() || name == CLONEABLE || name == SERIALIZABLE
            }
            (Type::Array(sub), Type::Array(sup)) => {
                sub.is_reference() && sup.is_reference() && self.is_subtype(sub, sup)
            }
            _ => false,
        }
    }

    /// Class-graph part of [`TypeHierarchy::is_subtype`].
    fn is_class_subtype(&self, sub: &ClassType, sup: &ClassType) -> bool {
        if sub == sup || sup.is_object() {
            return true;
        }
        let mut seen: HashSet<ClassType> = HashSet::new();
        let mut queue: VecDeque<ClassType> = VecDeque::from([sub.clone()]);
        while let Some(next) = queue.pop_front() {
            if !seen.insert(next.clone()) {
                continue;
            }
            let supers = self.superclass_of(&next).into_iter().chain(self.interfaces_of(&next));
            for parent in supers {
                if &parent == sup {
                    return true;
                }
                queue.push_back(parent);
            }
        }
        false
    }
}

/// A closed world of class declarations.
pub trait View: Send + Sync {
    fn class(&self, ty: &ClassType) -> Option<&ClassDecl>;

    fn type_hierarchy(&self) -> &dyn TypeHierarchy;

    fn classes(&self) -> Box<dyn Iterator<Item = &ClassDecl> + '_>;
}
