//! Method dispatch over a frozen [`View`].
//!
//! Every function here is a pure function of its arguments: the same view and
//! the same call always give the same answer, and concurrent calls need no
//! synchronisation.

use std::collections::{BTreeSet, HashSet, VecDeque};

use sable_core::{ClassType, MethodSignature};
use sable_hierarchy::{ClassDecl, MethodDecl, TypeHierarchy, View};
use sable_ir::{InvokeExpr, InvokeKind};

use crate::config::{DiamondPolicy, DispatchConfig};
use crate::error::{ResolveError, Result};

/// Result of [`partition_dispatches_in_classes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchPartition {
    /// Targets declared in one of the requested classes.
    pub kept: BTreeSet<MethodSignature>,
    /// Targets that exist in the view but fall outside the requested classes.
    pub excluded: BTreeSet<MethodSignature>,
}

fn class_of<'v, V: View + ?Sized>(view: &'v V, ty: &ClassType) -> Result<&'v ClassDecl> {
    view.class(ty).ok_or_else(|| ResolveError::ClassNotInView { class: ty.clone() })
}

/// Every subtype of `m`'s declaring class that may receive a call to `m`,
/// retargeted to that subtype.
///
/// A subtype qualifies when it either does not declare the method (and so
/// inherits an implementation) or declares it concretely. This over-approximates
/// the real targets.
pub fn resolve_all_dispatches<V: View + ?Sized>(
    view: &V,
    m: &MethodSignature,
) -> Result<BTreeSet<MethodSignature>> {
    let hierarchy = view.type_hierarchy();
    let mut targets = BTreeSet::new();

    for subtype in hierarchy.subtypes_of(m.declaring_class()) {
        let class = class_of(view, &subtype)?;
        let receives = class
            .method(m.sub_signature())
            .map_or(true, |decl| !decl.is_abstract());
        if receives {
            targets.insert(m.with_declaring_class(subtype));
        }
    }

    tracing::trace!(
        target: "sable.dispatch",
        method = %m,
        targets = targets.len(),
        "resolved all dispatches"
    );
    Ok(targets)
}

/// Concrete overrides of `m` declared by its subtypes.
///
/// Always a subset of [`resolve_all_dispatches`].
pub fn resolve_abstract_dispatch<V: View + ?Sized>(
    view: &V,
    m: &MethodSignature,
) -> Result<BTreeSet<MethodSignature>> {
    let hierarchy = view.type_hierarchy();
    let mut targets = BTreeSet::new();

    for subtype in hierarchy.subtypes_of(m.declaring_class()) {
        let class = class_of(view, &subtype)?;
        if let Some(decl) = class.method(m.sub_signature()) {
            if !decl.is_abstract() {
                targets.insert(decl.signature().clone());
            }
        }
    }

    tracing::trace!(
        target: "sable.dispatch",
        method = %m,
        targets = targets.len(),
        "resolved abstract dispatch"
    );
    Ok(targets)
}

/// [`resolve_all_dispatches`] restricted to targets declared in `classes`.
pub fn resolve_all_dispatches_in_classes<V: View + ?Sized>(
    view: &V,
    m: &MethodSignature,
    classes: &HashSet<ClassType>,
) -> Result<BTreeSet<MethodSignature>> {
    Ok(partition_dispatches_in_classes(view, m, classes)?.kept)
}

/// Split [`resolve_all_dispatches`] into the targets inside `classes` and the
/// ones outside it. The two halves are disjoint and together give the
/// unfiltered result.
pub fn partition_dispatches_in_classes<V: View + ?Sized>(
    view: &V,
    m: &MethodSignature,
    classes: &HashSet<ClassType>,
) -> Result<DispatchPartition> {
    let (kept, excluded): (BTreeSet<_>, BTreeSet<_>) = resolve_all_dispatches(view, m)?
        .into_iter()
        .partition(|sig| classes.contains(sig.declaring_class()));
    Ok(DispatchPartition { kept, excluded })
}

/// Whether `target` can override `called`: same name, same parameter types,
/// and a return type equal to or a subtype of the called one.
pub fn can_dispatch<H: TypeHierarchy + ?Sized>(
    called: &MethodSignature,
    target: &MethodSignature,
    hierarchy: &H,
) -> bool {
    called.name() == target.name()
        && called.parameter_types() == target.parameter_types()
        && (called.return_type() == target.return_type()
            || hierarchy.is_subtype(target.return_type(), called.return_type()))
}

/// The implementation a virtual call to `m` on an instance of exactly `m`'s
/// declaring class would run. Uses the default [`DispatchConfig`].
pub fn resolve_concrete_dispatch<V: View + ?Sized>(
    view: &V,
    m: &MethodSignature,
) -> Result<Option<MethodSignature>> {
    resolve_concrete_dispatch_with(view, m, &DispatchConfig::default())
}

/// Like [`resolve_concrete_dispatch`], with an explicit configuration.
///
/// The superclass chain is searched first, nearest class first. Only when no
/// class in the chain declares the method are interface default methods
/// considered. `Ok(None)` means the method stays abstract for an abstract
/// starting class.
pub fn resolve_concrete_dispatch_with<V: View + ?Sized>(
    view: &V,
    m: &MethodSignature,
    config: &DispatchConfig,
) -> Result<Option<MethodSignature>> {
    let hierarchy = view.type_hierarchy();
    let start = class_of(view, m.declaring_class())?;
    let sub = m.sub_signature();

    let mut chain = vec![start];
    chain.extend(
        hierarchy
            .incomplete_superclasses_of(start.ty())
            .iter()
            .filter_map(|ty| view.class(ty)),
    );

    for class in &chain {
        let Some(decl) = class.method(sub) else {
            continue;
        };
        if !decl.is_abstract() {
            return Ok(Some(decl.signature().clone()));
        }
        if start.is_abstract() && decl.declaring_class() != start.ty() {
            tracing::trace!(
                target: "sable.dispatch",
                method = %m,
                declared_in = %decl.declaring_class(),
                "abstract class inherits an unimplemented method"
            );
            return Ok(None);
        }
        return Err(ResolveError::AbstractMethod {
            method: decl.signature().clone(),
        });
    }

    let search = search_default_methods(view, &chain, m);
    if search.defaults.is_empty() {
        return match search.abstracts.first() {
            Some(decl) => abstract_outcome(start, decl),
            None => Err(ResolveError::NoConcreteImplementation { method: m.clone() }),
        };
    }

    if config.diamond == DiamondPolicy::Strict {
        let declared: Vec<&MethodDecl> = search
            .defaults
            .iter()
            .chain(&search.abstracts)
            .copied()
            .collect();
        let competing = most_specific_defaults(hierarchy, &declared);
        if competing.len() > 1 {
            return Err(ResolveError::AmbiguousDefaultMethod {
                method: m.clone(),
                candidates: competing
                    .iter()
                    .map(|decl| decl.signature().clone())
                    .collect(),
            });
        }
        if let Some(decl) = competing.first().filter(|decl| decl.is_abstract()) {
            return abstract_outcome(start, decl);
        }
    }

    let most_specific = most_specific_defaults(hierarchy, &search.defaults);
    if most_specific.len() > 1 {
        match config.diamond {
            DiamondPolicy::Strict => {
                return Err(ResolveError::AmbiguousDefaultMethod {
                    method: m.clone(),
                    candidates: most_specific
                        .iter()
                        .map(|decl| decl.signature().clone())
                        .collect(),
                });
            }
            DiamondPolicy::DiscoveryOrder => {
                tracing::debug!(
                    target: "sable.dispatch",
                    method = %m,
                    candidates = most_specific.len(),
                    "unrelated default methods; taking the first discovered"
                );
            }
        }
    }

    Ok(most_specific.first().map(|decl| decl.signature().clone()))
}

/// An abstract interface declaration is the only thing reachable: nothing to
/// run for an abstract class, a broken hierarchy for a concrete one.
fn abstract_outcome(start: &ClassDecl, decl: &MethodDecl) -> Result<Option<MethodSignature>> {
    if start.is_abstract() {
        Ok(None)
    } else {
        Err(ResolveError::AbstractMethod {
            method: decl.signature().clone(),
        })
    }
}

struct DefaultSearch<'v> {
    /// Concrete interface declarations, in discovery order.
    defaults: Vec<&'v MethodDecl>,
    /// Abstract re-declarations that ended a branch, in discovery order.
    abstracts: Vec<&'v MethodDecl>,
}

/// Breadth-first walk over the interfaces of every class in `chain`.
///
/// An interface that declares the method ends the walk along its branch,
/// whether the declaration is a default method or an abstract re-declaration.
fn search_default_methods<'v, V: View + ?Sized>(
    view: &'v V,
    chain: &[&'v ClassDecl],
    m: &MethodSignature,
) -> DefaultSearch<'v> {
    let mut queue: VecDeque<&'v ClassDecl> = chain
        .iter()
        .flat_map(|class| interfaces_in_view(view, class))
        .collect();
    let mut processed: HashSet<&'v ClassType> = HashSet::new();
    let mut search = DefaultSearch {
        defaults: Vec::new(),
        abstracts: Vec::new(),
    };

    while let Some(iface) = queue.pop_front() {
        if !processed.insert(iface.ty()) {
            continue;
        }
        match iface.method(m.sub_signature()) {
            Some(decl) if decl.is_abstract() => search.abstracts.push(decl),
            Some(decl) => search.defaults.push(decl),
            None => queue.extend(interfaces_in_view(view, iface)),
        }
    }

    search
}

fn interfaces_in_view<'v, V: View + ?Sized>(view: &'v V, class: &ClassDecl) -> Vec<&'v ClassDecl> {
    class
        .interfaces()
        .iter()
        .filter_map(|ty| view.class(ty))
        .collect()
}

/// Declarations whose interface has no strict sub-interface among the other
/// declarations' interfaces, in input order.
fn most_specific_defaults<'v>(
    hierarchy: &dyn TypeHierarchy,
    candidates: &[&'v MethodDecl],
) -> Vec<&'v MethodDecl> {
    candidates
        .iter()
        .copied()
        .filter(|candidate| {
            let iface = candidate.declaring_class();
            !candidates.iter().any(|other| {
                let other = other.declaring_class();
                other != iface && hierarchy.is_class_subtype(other, iface)
            })
        })
        .collect()
}

/// Target of a special invocation (`super.m()`, private calls, constructors)
/// made from inside `container`.
///
/// Constructors and private methods are returned unchanged. A call whose
/// target class is `container`'s own class or one of its ancestors resolves
/// through [`resolve_concrete_dispatch`]; any other target is returned
/// unchanged.
pub fn resolve_special_dispatch<V: View + ?Sized>(
    view: &V,
    invoke: &InvokeExpr,
    container: &MethodSignature,
) -> Result<Option<MethodSignature>> {
    let target = invoke.method();
    if invoke.kind() != InvokeKind::Special {
        return Err(ResolveError::NotSpecialInvoke {
            method: target.clone(),
        });
    }

    if target.sub_signature().is_constructor() {
        return Ok(Some(target.clone()));
    }

    let is_private = view
        .class(target.declaring_class())
        .and_then(|class| class.method(target.sub_signature()))
        .is_some_and(MethodDecl::is_private);
    if is_private {
        return Ok(Some(target.clone()));
    }

    if view
        .type_hierarchy()
        .is_class_subtype(container.declaring_class(), target.declaring_class())
    {
        return resolve_concrete_dispatch(view, target);
    }

    Ok(Some(target.clone()))
}
