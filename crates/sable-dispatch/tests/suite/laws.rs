use std::collections::HashSet;

use proptest::prelude::*;
use sable_core::{ClassType, MethodSignature, MethodSubSignature, Type};
use sable_dispatch::{
    can_dispatch, partition_dispatches_in_classes, resolve_abstract_dispatch,
    resolve_all_dispatches, resolve_all_dispatches_in_classes, resolve_concrete_dispatch,
};
use sable_hierarchy::{ClassUniverse, TypeHierarchy};

use super::fixtures::{abstract_class, class, object, sig, universe, ClassSpec};

const PROPTEST_CASES: u32 = 128;

#[derive(Debug, Clone, Copy)]
enum Decl {
    None,
    Abstract,
    Concrete,
}

fn name(i: usize) -> String {
    format!("gen.C{i}")
}

/// Class `i` extends `Object` or some class `j < i`, and may declare `m`.
fn arb_universe() -> impl Strategy<Value = (ClassUniverse, usize)> {
    let decl = prop_oneof![Just(Decl::None), Just(Decl::Abstract), Just(Decl::Concrete)];
    (1usize..10)
        .prop_flat_map(move |n| {
            let classes: Vec<_> = (0..n)
                .map(|i| {
                    let parent = if i == 0 {
                        Just(None).boxed()
                    } else {
                        proptest::option::of(0..i).boxed()
                    };
                    (parent, decl.clone())
                })
                .collect();
            classes
        })
        .prop_map(|classes| {
            let n = classes.len();
            let specs = classes.into_iter().enumerate().map(|(i, (parent, decl))| {
                let parent = parent.map_or_else(|| "java.lang.Object".to_string(), name);
                let spec: ClassSpec = match decl {
                    Decl::None => class(&name(i), &parent, &[]),
                    Decl::Abstract => abstract_class(&name(i), &parent, &[]).abstract_("m"),
                    Decl::Concrete => class(&name(i), &parent, &[]).concrete("m"),
                };
                spec
            });
            (universe(std::iter::once(object()).chain(specs)), n)
        })
}

fn arb_case() -> impl Strategy<Value = (ClassUniverse, MethodSignature, HashSet<ClassType>)> {
    arb_universe().prop_flat_map(|(universe, n)| {
        (0..n, proptest::collection::vec(any::<bool>(), n)).prop_map(move |(start, mask)| {
            let known: HashSet<ClassType> = mask
                .iter()
                .enumerate()
                .filter(|(_, keep)| **keep)
                .map(|(i, _)| ClassType::parse(&name(i)))
                .collect();
            (universe.clone(), sig(&name(start), "m"), known)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: PROPTEST_CASES, .. ProptestConfig::default() })]

    #[test]
    fn abstract_dispatch_is_a_subset_of_all_dispatches((view, m, _) in arb_case()) {
        let all = resolve_all_dispatches(&view, &m).unwrap();
        let precise = resolve_abstract_dispatch(&view, &m).unwrap();
        prop_assert!(precise.is_subset(&all));
    }

    #[test]
    fn partition_splits_all_dispatches_exactly((view, m, known) in arb_case()) {
        let all = resolve_all_dispatches(&view, &m).unwrap();
        let partition = partition_dispatches_in_classes(&view, &m, &known).unwrap();

        prop_assert!(partition.kept.is_disjoint(&partition.excluded));
        let union: std::collections::BTreeSet<_> =
            partition.kept.union(&partition.excluded).cloned().collect();
        prop_assert_eq!(&union, &all);
        prop_assert_eq!(
            &partition.kept,
            &resolve_all_dispatches_in_classes(&view, &m, &known).unwrap()
        );
        prop_assert!(partition.kept.iter().all(|s| known.contains(s.declaring_class())));
    }

    #[test]
    fn targets_are_strict_subtypes((view, m, _) in arb_case()) {
        let subtypes = view.subtypes_of(m.declaring_class());
        for target in resolve_all_dispatches(&view, &m).unwrap() {
            prop_assert!(subtypes.contains(target.declaring_class()));
        }
    }

    #[test]
    fn resolution_is_repeatable((view, m, _) in arb_case()) {
        prop_assert_eq!(resolve_all_dispatches(&view, &m), resolve_all_dispatches(&view, &m));
        prop_assert_eq!(resolve_concrete_dispatch(&view, &m), resolve_concrete_dispatch(&view, &m));
    }

    #[test]
    fn concrete_target_is_declared_on_an_ancestor((view, m, _) in arb_case()) {
        if let Ok(Some(target)) = resolve_concrete_dispatch(&view, &m) {
            prop_assert!(view.is_class_subtype(m.declaring_class(), target.declaring_class()));
        }
    }

    #[test]
    fn can_dispatch_matches_name_params_and_covariant_return(
        (view, _, _) in arb_case(),
        called_name in prop::sample::select(vec!["m", "n"]),
        target_name in prop::sample::select(vec!["m", "n"]),
        called_ret in 0usize..3,
        target_ret in 0usize..3,
        same_params in any::<bool>(),
    ) {
        let ret = |i: usize| Type::class(&name(i));
        let target_params = if same_params { vec![] } else { vec![Type::class("java.lang.Object")] };
        let called = MethodSignature::new(
            ClassType::parse("gen.Caller"),
            MethodSubSignature::new(called_name, vec![], ret(called_ret)),
        );
        let target = MethodSignature::new(
            ClassType::parse("gen.Target"),
            MethodSubSignature::new(target_name, target_params, ret(target_ret)),
        );

        let expected = called_name == target_name
            && same_params
            && (called_ret == target_ret || view.is_subtype(&ret(target_ret), &ret(called_ret)));
        prop_assert_eq!(can_dispatch(&called, &target, &view), expected);
    }
}
