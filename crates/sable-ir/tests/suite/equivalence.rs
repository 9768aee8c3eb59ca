use pretty_assertions::assert_eq;
use sable_core::{ClassType, MethodSignature, MethodSubSignature, PrimitiveType, StmtPosition, Type};
use sable_ir::{
    AssignStmt, BinaryExpr, BinaryOp, Constant, Expr, IrComparator, InvokeExpr, LValue, Local,
    ReturnStmt, Stmt, StmtNode, StructuralComparator,
};

fn int(name: &str) -> Local {
    Local::new(name, Type::Primitive(PrimitiveType::Int))
}

fn add(lhs: &str, rhs: i32) -> Expr {
    Expr::Binary(BinaryExpr::new(
        BinaryOp::Add,
        int(lhs).into(),
        Constant::Int(rhs).into(),
    ))
}

fn assign(target: &str, value: Expr, line: u32) -> Stmt {
    Stmt::assign(int(target), value, StmtPosition::line(line, 1, 10)).unwrap()
}

#[test]
fn distinct_assignments_with_equal_operands_are_equivalent() {
    let a = assign("x", add("y", 1), 3);
    let b = assign("x", add("y", 1), 7);

    assert!(a.equiv_to(&b, &StructuralComparator));
    assert!(b.equiv_to(&a, &StructuralComparator));
    assert_eq!(a.equiv_hash(), b.equiv_hash());
}

#[test]
fn assignments_differing_in_an_operand_are_not_equivalent() {
    let a = assign("x", add("y", 1), 3);
    let b = assign("x", add("y", 2), 3);
    let c = assign("z", add("y", 1), 3);

    assert!(!a.equiv_to(&b, &StructuralComparator));
    assert!(!a.equiv_to(&c, &StructuralComparator));
}

#[test]
fn nops_are_always_equivalent() {
    let a = Stmt::nop(StmtPosition::line(1, 1, 4));
    let b = Stmt::nop(StmtPosition::NONE);

    assert!(a.equiv_to(&b, &StructuralComparator));
    assert_eq!(a.equiv_hash(), 42);
    assert_eq!(b.equiv_hash(), 42);
}

#[test]
fn different_variants_are_never_equivalent() {
    let ret = Stmt::from(ReturnStmt::new(int("x").into(), StmtPosition::NONE));
    let nop = Stmt::nop(StmtPosition::NONE);

    assert!(!ret.equiv_to(&nop, &StructuralComparator));
    assert!(!nop.equiv_to(&ret, &StructuralComparator));
}

/// Treats locals of the same type as interchangeable.
struct ByLocalType;

impl IrComparator for ByLocalType {
    fn case_local(&self, a: &Local, b: &Local) -> bool {
        a.ty() == b.ty()
    }
}

#[test]
fn comparator_overrides_reach_nested_operands() {
    let a = assign("x", add("y", 1), 1);
    let b = assign("p", add("q", 1), 1);

    assert!(!a.equiv_to(&b, &StructuralComparator));
    assert!(a.equiv_to(&b, &ByLocalType));
}

#[test]
fn invoke_arguments_compare_pairwise() {
    let method = MethodSignature::new(
        ClassType::parse("p.A"),
        MethodSubSignature::new("f", vec![Type::Primitive(PrimitiveType::Int)], Type::Void),
    );
    let call = |arg: &str| {
        Stmt::from(sable_ir::InvokeStmt::new(
            InvokeExpr::static_invoke(method.clone(), vec![int(arg).into()]),
            StmtPosition::NONE,
        ))
    };

    assert!(call("a").equiv_to(&call("a"), &StructuralComparator));
    assert!(!call("a").equiv_to(&call("b"), &StructuralComparator));
    assert!(call("a").equiv_to(&call("b"), &ByLocalType));
}

#[test]
fn with_operations_leave_the_original_untouched() {
    let original = AssignStmt::new(
        LValue::Local(int("x")),
        Constant::Int(1).into(),
        StmtPosition::NONE,
    )
    .unwrap();

    let moved = original.with_position(StmtPosition::line(9, 1, 2));
    let renamed = original.with_new_def(int("y"));
    let reassigned = original.with_rvalue(Constant::Int(2).into()).unwrap();

    assert_eq!(original.to_string(), "x = 1");
    assert!(original.position().is_none());
    assert_eq!(moved.position(), StmtPosition::line(9, 1, 2));
    assert_eq!(renamed.to_string(), "y = 1");
    assert_eq!(reassigned.to_string(), "x = 2");
    assert!(Stmt::from(moved).equiv_to(&Stmt::from(original), &StructuralComparator));
}
