use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use sable_core::ClassType;

use crate::decl::ClassDecl;
use crate::error::{HierarchyError, Result};
use crate::hierarchy::{TypeHierarchy, View};

/// Collects class declarations before freezing them into a [`ClassUniverse`].
#[derive(Debug, Default)]
pub struct ClassUniverseBuilder {
    classes: IndexMap<ClassType, ClassDecl>,
    duplicate: Option<ClassType>,
}

impl ClassUniverseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, decl: ClassDecl) -> &mut Self {
        let ty = decl.ty().clone();
        if self.classes.insert(ty.clone(), decl).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(ty);
        }
        self
    }

    /// Freeze the collected declarations.
    ///
    /// Fails on the first duplicate declaration or on any inheritance cycle
    /// among the collected classes.
    pub fn build(self) -> Result<ClassUniverse> {
        if let Some(class) = self.duplicate {
            return Err(HierarchyError::DuplicateClass { class });
        }
        if let Some(class) = find_cycle(&self.classes) {
            return Err(HierarchyError::InheritanceCycle { class });
        }

        let mut subtypes: HashMap<ClassType, Vec<ClassType>> = HashMap::new();
        for decl in self.classes.values() {
            for parent in decl.direct_supertypes() {
                subtypes
                    .entry(parent.clone())
                    .or_default()
                    .push(decl.ty().clone());
            }
        }
        for children in subtypes.values_mut() {
            children.sort();
            children.dedup();
        }

        tracing::debug!(
            target: "sable.hierarchy",
            classes = self.classes.len(),
            edges = subtypes.values().map(Vec::len).sum::<usize>(),
            "built class universe"
        );

        Ok(ClassUniverse {
            inner: Arc::new(Inner {
                classes: self.classes,
                subtypes,
            }),
        })
    }
}

#[derive(Debug)]
struct Inner {
    classes: IndexMap<ClassType, ClassDecl>,
    subtypes: HashMap<ClassType, Vec<ClassType>>,
}

/// An immutable set of class declarations together with its subtype graph.
///
/// Cloning is cheap and clones share the same data, so one universe can be
/// handed to any number of worker threads.
#[derive(Debug, Clone)]
pub struct ClassUniverse {
    inner: Arc<Inner>,
}

impl ClassUniverse {
    pub fn builder() -> ClassUniverseBuilder {
        ClassUniverseBuilder::new()
    }

    pub fn from_classes(classes: impl IntoIterator<Item = ClassDecl>) -> Result<Self> {
        let mut builder = ClassUniverseBuilder::new();
        for decl in classes {
            builder.add_class(decl);
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.inner.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.classes.is_empty()
    }
}

impl TypeHierarchy for ClassUniverse {
    fn contains(&self, ty: &ClassType) -> bool {
        self.inner.classes.contains_key(ty)
    }

    fn superclass_of(&self, ty: &ClassType) -> Option<ClassType> {
        self.inner.classes.get(ty)?.superclass().cloned()
    }

    fn interfaces_of(&self, ty: &ClassType) -> Vec<ClassType> {
        self.inner
            .classes
            .get(ty)
            .map(|decl| decl.interfaces().to_vec())
            .unwrap_or_default()
    }

    fn direct_subtypes_of(&self, ty: &ClassType) -> Vec<ClassType> {
        self.inner.subtypes.get(ty).cloned().unwrap_or_default()
    }
}

impl View for ClassUniverse {
    fn class(&self, ty: &ClassType) -> Option<&ClassDecl> {
        self.inner.classes.get(ty)
    }

    fn type_hierarchy(&self) -> &dyn TypeHierarchy {
        self
    }

    fn classes(&self) -> Box<dyn Iterator<Item = &ClassDecl> + '_> {
        Box::new(self.inner.classes.values())
    }
}

/// Some class on an inheritance cycle, if there is one.
fn find_cycle(classes: &IndexMap<ClassType, ClassDecl>) -> Option<ClassType> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Visiting,
        Done,
    }

    let mut marks: HashMap<&ClassType, Mark> = HashMap::new();
    for root in classes.keys() {
        if marks.contains_key(root) {
            continue;
        }
        marks.insert(root, Mark::Visiting);
        let mut stack: Vec<(&ClassType, usize)> = vec![(root, 0)];

        while let Some(top) = stack.last_mut() {
            let node = top.0;
            let next = classes[node].direct_supertypes().nth(top.1);
            top.1 += 1;

            let Some(parent) = next else {
                marks.insert(node, Mark::Done);
                stack.pop();
                continue;
            };
            let Some((parent, _)) = classes.get_key_value(parent) else {
                continue;
            };
            match marks.get(parent) {
                Some(Mark::Visiting) => return Some(parent.clone()),
                Some(Mark::Done) => {}
                None => {
                    marks.insert(parent, Mark::Visiting);
                    stack.push((parent, 0));
                }
            }
        }
    }
    None
}
