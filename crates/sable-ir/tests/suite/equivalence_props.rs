use proptest::prelude::*;
use sable_core::{PrimitiveType, StmtPosition, Type};
use sable_ir::{
    BinaryExpr, BinaryOp, Constant, Expr, Immediate, Local, ReturnStmt, Stmt,
    StructuralComparator, ThrowStmt, UnaryExpr, UnaryOp, Value,
};

const PROPTEST_CASES: u32 = 256;

fn arb_local() -> impl Strategy<Value = Local> {
    prop::sample::select(vec!["a", "b", "c"])
        .prop_map(|name| Local::new(name, Type::Primitive(PrimitiveType::Int)))
}

fn arb_immediate() -> impl Strategy<Value = Immediate> {
    prop_oneof![
        arb_local().prop_map(Immediate::Local),
        (-2i32..3).prop_map(|v| Immediate::Constant(Constant::Int(v))),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let op = prop::sample::select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul]);
    prop_oneof![
        arb_immediate().prop_map(Value::Immediate),
        (op, arb_immediate(), arb_immediate())
            .prop_map(|(op, l, r)| Value::Expr(Expr::Binary(BinaryExpr::new(op, l, r)))),
        arb_immediate().prop_map(|i| Value::Expr(Expr::Unary(UnaryExpr::new(UnaryOp::Neg, i)))),
    ]
}

fn arb_stmt() -> impl Strategy<Value = Stmt> {
    let pos = (0u32..5).prop_map(|line| StmtPosition::line(line, 1, 2));
    prop_oneof![
        pos.clone().prop_map(Stmt::nop),
        (arb_local(), arb_value(), pos.clone())
            .prop_map(|(l, v, p)| Stmt::assign(l, v, p).expect("rhs is never an identity ref")),
        (arb_immediate(), pos.clone()).prop_map(|(i, p)| ReturnStmt::new(i, p).into()),
        (arb_immediate(), pos).prop_map(|(i, p)| ThrowStmt::new(i, p).into()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: PROPTEST_CASES, .. ProptestConfig::default() })]

    #[test]
    fn equivalent_statements_hash_alike(a in arb_stmt(), b in arb_stmt()) {
        if a.equiv_to(&b, &StructuralComparator) {
            prop_assert_eq!(a.equiv_hash(), b.equiv_hash());
        }
    }

    #[test]
    fn equivalence_is_reflexive_and_symmetric(a in arb_stmt(), b in arb_stmt()) {
        prop_assert!(a.equiv_to(&a, &StructuralComparator));
        prop_assert_eq!(
            a.equiv_to(&b, &StructuralComparator),
            b.equiv_to(&a, &StructuralComparator)
        );
    }

    #[test]
    fn position_never_affects_equivalence(a in arb_stmt(), line in 0u32..100) {
        let moved = a.with_position(StmtPosition::line(line, 3, 4));
        prop_assert!(a.equiv_to(&moved, &StructuralComparator));
        prop_assert_eq!(a.equiv_hash(), moved.equiv_hash());
    }
}
