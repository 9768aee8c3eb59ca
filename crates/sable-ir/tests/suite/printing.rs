use pretty_assertions::assert_eq;
use sable_core::{ClassType, MethodSignature, MethodSubSignature, PrimitiveType, StmtPosition, Type};
use sable_ir::{
    CastExpr, Constant, Expr, IdentityRef, IdentityStmt, InvokeExpr, InvokeStmt, Local,
    ParameterRef, PlainStmtPrinter, ReturnVoidStmt, Stmt, StmtPrinter, ThrowStmt,
};

fn printed(stmt: &Stmt) -> String {
    let mut printer = PlainStmtPrinter::new();
    stmt.print(&mut printer);
    printer.finish()
}

fn sample_stmts() -> Vec<Stmt> {
    let obj = Local::new("r0", Type::class("p.A"));
    let method = MethodSignature::new(
        ClassType::parse("p.A"),
        MethodSubSignature::new(
            "m",
            vec![Type::Primitive(PrimitiveType::Int), Type::class("java.lang.String")],
            Type::Void,
        ),
    );
    vec![
        IdentityStmt::new(
            Local::new("i0", Type::Primitive(PrimitiveType::Int)),
            IdentityRef::Parameter(ParameterRef::new(0, Type::Primitive(PrimitiveType::Int))),
            StmtPosition::NONE,
        )
        .into(),
        InvokeStmt::new(
            InvokeExpr::virtual_invoke(
                obj.clone(),
                method,
                vec![Constant::Int(1).into(), Constant::string("s").into()],
            ),
            StmtPosition::NONE,
        )
        .into(),
        Stmt::assign(
            Local::new("r1", Type::class("java.lang.Object")),
            Expr::Cast(CastExpr::new(obj.clone().into(), Type::class("java.lang.Object"))),
            StmtPosition::NONE,
        )
        .unwrap(),
        ThrowStmt::new(obj.into(), StmtPosition::NONE).into(),
        ReturnVoidStmt::new(StmtPosition::NONE).into(),
    ]
}

#[test]
fn printer_output_matches_display() {
    for stmt in sample_stmts() {
        assert_eq!(printed(&stmt), stmt.to_string());
    }
}

#[test]
fn statements_render_in_jimple_like_form() {
    let text: Vec<String> = sample_stmts().iter().map(ToString::to_string).collect();
    assert_eq!(
        text,
        vec![
            "i0 := @parameter0: int",
            "virtualinvoke r0.<p.A: void m(int,java.lang.String)>(1, \"s\")",
            "r1 = (java.lang.Object) r0",
            "throw r0",
            "return",
        ]
    );
}

/// Prints every type by its simple name.
#[derive(Default)]
struct ShortTypes(String);

impl StmtPrinter for ShortTypes {
    fn literal(&mut self, text: &str) {
        self.0.push_str(text);
    }

    fn type_name(&mut self, ty: &Type) {
        match ty.as_class() {
            Some(class) => self.literal(class.simple_name()),
            None => self.literal(&ty.to_string()),
        }
    }
}

#[test]
fn custom_printer_controls_fragments() {
    let stmt = &sample_stmts()[2];
    let mut printer = ShortTypes::default();
    stmt.print(&mut printer);
    assert_eq!(printer.0, "r1 = (Object) r0");
}
