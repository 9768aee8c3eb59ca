use sable_core::{ClassType, MethodSignature, MethodSubSignature, PrimitiveType, StmtPosition, Type};
use sable_ir::{Body, Constant, InvokeExpr, InvokeStmt, Local, ReturnStmt, Stmt};

fn method(name: &str) -> MethodSignature {
    MethodSignature::new(
        ClassType::parse("p.A"),
        MethodSubSignature::new(name, vec![], Type::Primitive(PrimitiveType::Int)),
    )
}

fn sample_body() -> Body {
    let x = Local::new("x", Type::Primitive(PrimitiveType::Int));
    Body::new(
        method("main"),
        vec![x.clone()],
        [
            Stmt::assign(
                x.clone(),
                InvokeExpr::static_invoke(method("f"), vec![]),
                StmtPosition::line(1, 1, 5),
            )
            .unwrap(),
            InvokeStmt::new(
                InvokeExpr::static_invoke(method("g"), vec![]),
                StmtPosition::line(2, 1, 5),
            )
            .into(),
            Stmt::nop(StmtPosition::NONE),
            ReturnStmt::new(x.into(), StmtPosition::line(3, 1, 5)).into(),
        ],
    )
}

#[test]
fn invoke_sites_cover_assignments_and_invoke_statements() {
    let body = sample_body();
    let called: Vec<&str> = body
        .invoke_sites()
        .map(|(_, invoke)| invoke.method().name())
        .collect();
    assert_eq!(called, vec!["f", "g"]);
}

#[test]
fn replace_stmt_swaps_by_identity_only() {
    let mut body = sample_body();
    let held = body.stmts()[2].clone();

    let removed = body
        .replace_stmt(&held, ReturnStmt::new(Constant::Int(0).into(), StmtPosition::NONE).into())
        .unwrap();

    assert_eq!(removed, held);
    assert_eq!(held.to_string(), "nop");
    assert_eq!(body.stmts()[2].to_string(), "return 0");
    assert_eq!(body.index_of(&held), None);
    assert!(body.replace_stmt(&held, Stmt::nop(StmtPosition::NONE)).is_none());
}

#[test]
fn structurally_equal_statements_keep_separate_slots() {
    let nop = Stmt::nop(StmtPosition::NONE);
    let body = Body::new(method("m"), vec![], [nop.clone(), nop]);
    assert_ne!(body.stmts()[0], body.stmts()[1]);
    assert_eq!(body.index_of(&body.stmts()[1]), Some(1));
}
