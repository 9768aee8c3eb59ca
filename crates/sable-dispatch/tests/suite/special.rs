use pretty_assertions::assert_eq;
use sable_core::{ClassType, MethodSignature, MethodSubSignature, Type};
use sable_dispatch::{resolve_special_dispatch, ResolveError};
use sable_ir::{InvokeExpr, Local};

use super::fixtures::{class, interface, object, sig, universe};

fn this(class: &str) -> Local {
    Local::new("this", Type::class(class))
}

fn special(caller: &str, target: MethodSignature) -> InvokeExpr {
    InvokeExpr::special_invoke(this(caller), target, vec![])
}

#[test]
fn private_target_is_returned_unchanged() {
    let view = universe([
        object(),
        class("p.A", "java.lang.Object", &[]).private("secret"),
        class("p.B", "p.A", &[]).concrete("secret"),
        class("p.Other", "java.lang.Object", &[]),
    ]);
    let target = sig("p.A", "secret");

    for container in [sig("p.A", "run"), sig("p.B", "run"), sig("p.Other", "run")] {
        let caller = container.declaring_class().fully_qualified_name();
        assert_eq!(
            resolve_special_dispatch(&view, &special(&caller, target.clone()), &container),
            Ok(Some(target.clone()))
        );
    }
}

#[test]
fn constructors_are_never_dispatched() {
    let view = universe([object(), class("p.A", "java.lang.Object", &[])]);
    let init = MethodSignature::new(
        ClassType::parse("java.lang.Object"),
        MethodSubSignature::new("<init>", vec![], Type::Void),
    );
    assert_eq!(
        resolve_special_dispatch(&view, &special("p.A", init.clone()), &sig("p.A", "<init>")),
        Ok(Some(init))
    );
}

#[test]
fn super_call_resolves_to_nearest_ancestor_implementation() {
    let view = universe([
        object(),
        class("p.A", "java.lang.Object", &[]).concrete("run"),
        class("p.B", "p.A", &[]),
        class("p.C", "p.B", &[]).concrete("run"),
    ]);
    // Inside C.run: super.run() names B.run, which B inherits from A.
    assert_eq!(
        resolve_special_dispatch(&view, &special("p.C", sig("p.B", "run")), &sig("p.C", "run")),
        Ok(Some(sig("p.A", "run")))
    );
}

#[test]
fn interface_super_call_outside_the_lineage_is_unchanged() {
    let view = universe([
        object(),
        interface("p.I", &[]).concrete("m"),
        class("p.A", "java.lang.Object", &["p.I"]).concrete("m"),
        class("p.Unrelated", "java.lang.Object", &[]),
    ]);
    assert_eq!(
        resolve_special_dispatch(
            &view,
            &special("p.Unrelated", sig("p.A", "m")),
            &sig("p.Unrelated", "m")
        ),
        Ok(Some(sig("p.A", "m")))
    );
}

#[test]
fn non_special_invocations_are_rejected() {
    let view = universe([object(), class("p.A", "java.lang.Object", &[]).concrete("run")]);
    let virtual_call = InvokeExpr::virtual_invoke(this("p.A"), sig("p.A", "run"), vec![]);
    assert_eq!(
        resolve_special_dispatch(&view, &virtual_call, &sig("p.A", "main")),
        Err(ResolveError::NotSpecialInvoke {
            method: sig("p.A", "run")
        })
    );
}
