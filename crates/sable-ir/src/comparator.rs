//! Pluggable structural comparison of statements and values.

use crate::stmt::{
    AssignStmt, GotoStmt, IdentityStmt, IfStmt, InvokeStmt, NopStmt, ReturnStmt, ReturnVoidStmt,
    Stmt, ThrowStmt,
};
use crate::value::{
    BinaryExpr, ConcreteRef, Constant, Expr, IdentityRef, Immediate, InvokeExpr, LValue, Local,
    Ref, Value,
};

/// Decides whether two IR nodes are equivalent.
///
/// Every method has a default implementing deep structural comparison, so an
/// implementor only overrides the cases it wants to loosen or tighten. The
/// statement cases take the concrete variant on the left and any statement on
/// the right; a variant mismatch is never equivalent.
pub trait IrComparator {
    fn case_nop_stmt(&self, _stmt: &NopStmt, other: &Stmt) -> bool {
        matches!(other, Stmt::Nop(_))
    }

    fn case_assign_stmt(&self, stmt: &AssignStmt, other: &Stmt) -> bool {
        match other {
            Stmt::Assign(o) => {
                self.case_lvalue(stmt.lhs(), o.lhs()) && self.case_value(stmt.rhs(), o.rhs())
            }
            _ => false,
        }
    }

    fn case_identity_stmt(&self, stmt: &IdentityStmt, other: &Stmt) -> bool {
        match other {
            Stmt::Identity(o) => {
                self.case_local(stmt.local(), o.local())
                    && self.case_identity_ref(stmt.rhs(), o.rhs())
            }
            _ => false,
        }
    }

    fn case_invoke_stmt(&self, stmt: &InvokeStmt, other: &Stmt) -> bool {
        match other {
            Stmt::Invoke(o) => self.case_invoke_expr(stmt.invoke_expr(), o.invoke_expr()),
            _ => false,
        }
    }

    fn case_return_stmt(&self, stmt: &ReturnStmt, other: &Stmt) -> bool {
        match other {
            Stmt::Return(o) => self.case_immediate(stmt.op(), o.op()),
            _ => false,
        }
    }

    fn case_return_void_stmt(&self, _stmt: &ReturnVoidStmt, other: &Stmt) -> bool {
        matches!(other, Stmt::ReturnVoid(_))
    }

    fn case_throw_stmt(&self, stmt: &ThrowStmt, other: &Stmt) -> bool {
        match other {
            Stmt::Throw(o) => self.case_immediate(stmt.op(), o.op()),
            _ => false,
        }
    }

    fn case_goto_stmt(&self, _stmt: &GotoStmt, other: &Stmt) -> bool {
        matches!(other, Stmt::Goto(_))
    }

    fn case_if_stmt(&self, stmt: &IfStmt, other: &Stmt) -> bool {
        match other {
            Stmt::If(o) => self.case_binary_expr(stmt.condition(), o.condition()),
            _ => false,
        }
    }

    fn case_local(&self, a: &Local, b: &Local) -> bool {
        a == b
    }

    fn case_constant(&self, a: &Constant, b: &Constant) -> bool {
        a == b
    }

    fn case_immediate(&self, a: &Immediate, b: &Immediate) -> bool {
        match (a, b) {
            (Immediate::Local(a), Immediate::Local(b)) => self.case_local(a, b),
            (Immediate::Constant(a), Immediate::Constant(b)) => self.case_constant(a, b),
            _ => false,
        }
    }

    fn case_concrete_ref(&self, a: &ConcreteRef, b: &ConcreteRef) -> bool {
        match (a, b) {
            (ConcreteRef::StaticField(a), ConcreteRef::StaticField(b)) => a.field() == b.field(),
            (ConcreteRef::InstanceField(a), ConcreteRef::InstanceField(b)) => {
                a.field() == b.field() && self.case_local(a.base(), b.base())
            }
            (ConcreteRef::Array(a), ConcreteRef::Array(b)) => {
                self.case_local(a.base(), b.base()) && self.case_immediate(a.index(), b.index())
            }
            _ => false,
        }
    }

    fn case_identity_ref(&self, a: &IdentityRef, b: &IdentityRef) -> bool {
        a == b
    }

    fn case_ref(&self, a: &Ref, b: &Ref) -> bool {
        match (a, b) {
            (Ref::Concrete(a), Ref::Concrete(b)) => self.case_concrete_ref(a, b),
            (Ref::Identity(a), Ref::Identity(b)) => self.case_identity_ref(a, b),
            _ => false,
        }
    }

    fn case_binary_expr(&self, a: &BinaryExpr, b: &BinaryExpr) -> bool {
        a.op() == b.op()
            && self.case_immediate(a.lhs(), b.lhs())
            && self.case_immediate(a.rhs(), b.rhs())
    }

    fn case_invoke_expr(&self, a: &InvokeExpr, b: &InvokeExpr) -> bool {
        let bases = match (a.base(), b.base()) {
            (Some(a), Some(b)) => self.case_local(a, b),
            (None, None) => true,
            _ => false,
        };
        a.kind() == b.kind()
            && a.method() == b.method()
            && bases
            && a.args().len() == b.args().len()
            && a
                .args()
                .iter()
                .zip(b.args())
                .all(|(a, b)| self.case_immediate(a, b))
    }

    fn case_expr(&self, a: &Expr, b: &Expr) -> bool {
        match (a, b) {
            (Expr::Binary(a), Expr::Binary(b)) => self.case_binary_expr(a, b),
            (Expr::Unary(a), Expr::Unary(b)) => {
                a.op() == b.op() && self.case_immediate(a.operand(), b.operand())
            }
            (Expr::Cast(a), Expr::Cast(b)) => {
                a.cast_type() == b.cast_type() && self.case_immediate(a.operand(), b.operand())
            }
            (Expr::InstanceOf(a), Expr::InstanceOf(b)) => {
                a.check_type() == b.check_type() && self.case_immediate(a.operand(), b.operand())
            }
            (Expr::New(a), Expr::New(b)) => a == b,
            (Expr::NewArray(a), Expr::NewArray(b)) => {
                a.element_type() == b.element_type() && self.case_immediate(a.size(), b.size())
            }
            (Expr::Invoke(a), Expr::Invoke(b)) => self.case_invoke_expr(a, b),
            _ => false,
        }
    }

    fn case_value(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Immediate(a), Value::Immediate(b)) => self.case_immediate(a, b),
            (Value::Ref(a), Value::Ref(b)) => self.case_ref(a, b),
            (Value::Expr(a), Value::Expr(b)) => self.case_expr(a, b),
            _ => false,
        }
    }

    fn case_lvalue(&self, a: &LValue, b: &LValue) -> bool {
        match (a, b) {
            (LValue::Local(a), LValue::Local(b)) => self.case_local(a, b),
            (LValue::Ref(a), LValue::Ref(b)) => self.case_concrete_ref(a, b),
            _ => false,
        }
    }
}

/// Deep structural comparison with no overrides. `equiv_hash` is consistent
/// with this comparator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralComparator;

impl IrComparator for StructuralComparator {}
