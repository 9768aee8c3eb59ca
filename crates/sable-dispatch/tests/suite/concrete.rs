use pretty_assertions::assert_eq;
use sable_core::ClassType;
use sable_dispatch::{
    resolve_concrete_dispatch, resolve_concrete_dispatch_with, DispatchConfig, ResolveError,
};

use super::fixtures::{abstract_class, class, interface, object, sig, universe, HidingView};

#[test]
fn overriding_sub_interface_default_wins() {
    // C implements B, B extends A; A has a default foo, B overrides it.
    let view = universe([
        object(),
        interface("p.A", &[]).concrete("foo"),
        interface("p.B", &["p.A"]).concrete("foo"),
        class("p.C", "java.lang.Object", &["p.B"]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.C", "foo")),
        Ok(Some(sig("p.B", "foo")))
    );
}

#[test]
fn unimplemented_abstract_method_in_concrete_class_is_fatal() {
    let view = universe([
        object(),
        abstract_class("p.X", "java.lang.Object", &[]).abstract_("bar"),
        class("p.Y", "p.X", &[]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.Y", "bar")),
        Err(ResolveError::AbstractMethod {
            method: sig("p.X", "bar")
        })
    );
}

#[test]
fn abstract_class_inheriting_an_abstract_method_has_no_target() {
    let view = universe([
        object(),
        abstract_class("p.X", "java.lang.Object", &[]).abstract_("bar"),
        abstract_class("p.W", "p.X", &[]),
    ]);

    assert_eq!(resolve_concrete_dispatch(&view, &sig("p.W", "bar")), Ok(None));
    // Declared abstract on the starting class itself: there is nothing to run.
    assert!(matches!(
        resolve_concrete_dispatch(&view, &sig("p.X", "bar")),
        Err(ResolveError::AbstractMethod { .. })
    ));
}

#[test]
fn nearest_superclass_implementation_is_chosen() {
    let view = universe([
        object().concrete("toString"),
        class("p.A", "java.lang.Object", &[]).concrete("run"),
        class("p.B", "p.A", &[]).concrete("run"),
        class("p.C", "p.B", &[]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.C", "run")),
        Ok(Some(sig("p.B", "run")))
    );
    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.C", "toString")),
        Ok(Some(sig("java.lang.Object", "toString")))
    );
}

#[test]
fn class_implementation_beats_interface_default() {
    let view = universe([
        object(),
        interface("p.I", &[]).concrete("run"),
        class("p.A", "java.lang.Object", &[]).concrete("run"),
        class("p.B", "p.A", &["p.I"]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.B", "run")),
        Ok(Some(sig("p.A", "run")))
    );
}

fn diamond() -> sable_hierarchy::ClassUniverse {
    universe([
        object(),
        interface("p.R1", &[]),
        interface("p.R2", &[]),
        interface("p.I1", &["p.R1"]).concrete("m"),
        interface("p.I2", &["p.R2"]).concrete("m"),
        class("p.Z", "java.lang.Object", &["p.I1", "p.I2"]),
    ])
}

#[test]
fn true_diamond_takes_first_discovered_default() {
    let view = diamond();
    let first = resolve_concrete_dispatch(&view, &sig("p.Z", "m"));
    assert_eq!(first, Ok(Some(sig("p.I1", "m"))));
    for _ in 0..8 {
        assert_eq!(resolve_concrete_dispatch(&view, &sig("p.Z", "m")), first);
    }
}

#[test]
fn true_diamond_is_rejected_under_strict_policy() {
    let view = diamond();
    assert_eq!(
        resolve_concrete_dispatch_with(&view, &sig("p.Z", "m"), &DispatchConfig::strict()),
        Err(ResolveError::AmbiguousDefaultMethod {
            method: sig("p.Z", "m"),
            candidates: vec![sig("p.I1", "m"), sig("p.I2", "m")],
        })
    );
}

#[test]
fn more_specific_default_wins_regardless_of_discovery_order() {
    let view = universe([
        object(),
        interface("p.Sup", &[]).concrete("m"),
        interface("p.Sub", &["p.Sup"]).concrete("m"),
        class("p.K", "java.lang.Object", &["p.Sup", "p.Sub"]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch_with(&view, &sig("p.K", "m"), &DispatchConfig::strict()),
        Ok(Some(sig("p.Sub", "m")))
    );
}

#[test]
fn defaults_are_found_through_superclass_interfaces() {
    let view = universe([
        object(),
        interface("p.Base", &[]).concrete("m"),
        interface("p.Mid", &["p.Base"]),
        class("p.A", "java.lang.Object", &["p.Mid"]),
        class("p.B", "p.A", &[]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.B", "m")),
        Ok(Some(sig("p.Base", "m")))
    );
}

#[test]
fn abstract_interface_redeclaration_hides_inherited_default() {
    let view = universe([
        object(),
        interface("p.Base", &[]).concrete("m"),
        interface("p.Mid", &["p.Base"]).abstract_("m"),
        class("p.Q", "java.lang.Object", &["p.Mid"]),
        abstract_class("p.AQ", "java.lang.Object", &["p.Mid"]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.Q", "m")),
        Err(ResolveError::AbstractMethod {
            method: sig("p.Mid", "m")
        })
    );
    assert_eq!(resolve_concrete_dispatch(&view, &sig("p.AQ", "m")), Ok(None));
}

#[test]
fn undeclared_method_is_fatal() {
    let view = universe([object(), class("p.A", "java.lang.Object", &[])]);
    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.A", "missing")),
        Err(ResolveError::NoConcreteImplementation {
            method: sig("p.A", "missing")
        })
    );
}

#[test]
fn starting_class_outside_the_view_is_reported() {
    let view = HidingView {
        inner: universe([object(), class("p.A", "java.lang.Object", &[]).concrete("m")]),
        hidden: vec![ClassType::parse("p.A")],
    };
    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.A", "m")),
        Err(ResolveError::ClassNotInView {
            class: ClassType::parse("p.A")
        })
    );
}

fn abstract_diamond() -> sable_hierarchy::ClassUniverse {
    // I2 re-declares I1's default abstractly; I3 is an unrelated default.
    universe([
        object(),
        interface("p.I1", &[]).concrete("m"),
        interface("p.I2", &["p.I1"]).abstract_("m"),
        interface("p.I3", &[]).concrete("m"),
        class("p.Z", "java.lang.Object", &["p.I2", "p.I3"]),
    ])
}

#[test]
fn abstract_redeclaration_competes_under_strict_policy() {
    let view = abstract_diamond();

    assert_eq!(
        resolve_concrete_dispatch_with(&view, &sig("p.Z", "m"), &DispatchConfig::strict()),
        Err(ResolveError::AmbiguousDefaultMethod {
            method: sig("p.Z", "m"),
            candidates: vec![sig("p.I3", "m"), sig("p.I2", "m")],
        })
    );
    // Discovery order only considers default methods.
    assert_eq!(
        resolve_concrete_dispatch(&view, &sig("p.Z", "m")),
        Ok(Some(sig("p.I3", "m")))
    );
}

#[test]
fn more_specific_abstract_redeclaration_wins_under_strict_policy() {
    // Z reaches I1's default directly and through I2, which re-declares it.
    let view = universe([
        object(),
        interface("p.I1", &[]).concrete("m"),
        interface("p.I2", &["p.I1"]).abstract_("m"),
        class("p.Z", "java.lang.Object", &["p.I2", "p.I1"]),
        abstract_class("p.AZ", "java.lang.Object", &["p.I2", "p.I1"]),
    ]);
    let strict = DispatchConfig::strict();

    assert_eq!(
        resolve_concrete_dispatch_with(&view, &sig("p.Z", "m"), &strict),
        Err(ResolveError::AbstractMethod {
            method: sig("p.I2", "m")
        })
    );
    assert_eq!(
        resolve_concrete_dispatch_with(&view, &sig("p.AZ", "m"), &strict),
        Ok(None)
    );
}

#[test]
fn less_specific_abstract_redeclaration_does_not_compete() {
    // I2 overrides I1's abstract declaration with a default.
    let view = universe([
        object(),
        interface("p.I1", &[]).abstract_("m"),
        interface("p.I2", &["p.I1"]).concrete("m"),
        class("p.Z", "java.lang.Object", &["p.I1", "p.I2"]),
    ]);

    assert_eq!(
        resolve_concrete_dispatch_with(&view, &sig("p.Z", "m"), &DispatchConfig::strict()),
        Ok(Some(sig("p.I2", "m")))
    );
}
