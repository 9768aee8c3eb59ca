//! Visitors over the closed IR variant sets.
//!
//! Every `case_*` method defaults to `default_case`, which itself does nothing.
//! Implementors override only the cases they care about. The `accept` methods
//! on [`crate::Stmt`], [`Ref`], [`Expr`] and [`Constant`] perform the one `match`
//! over the variants.

use std::fmt;

use sable_core::{PrimitiveType, Type};

use crate::stmt::{
    AssignStmt, GotoStmt, IdentityStmt, IfStmt, InvokeStmt, NopStmt, ReturnStmt, ReturnVoidStmt,
    StmtNode, ThrowStmt,
};
use crate::value::{
    ArrayRef, BinaryExpr, CastExpr, CaughtExceptionRef, ConcreteRef, Constant, Expr,
    IdentityRef, InstanceFieldRef, InstanceOfExpr, InvokeExpr, NewArrayExpr, NewExpr,
    ParameterRef, Ref, StaticFieldRef, ThisRef, UnaryExpr, UnaryOp,
};

pub trait StmtVisitor {
    fn case_nop_stmt(&mut self, stmt: &NopStmt) {
        self.default_case(stmt);
    }

    fn case_assign_stmt(&mut self, stmt: &AssignStmt) {
        self.default_case(stmt);
    }

    fn case_identity_stmt(&mut self, stmt: &IdentityStmt) {
        self.default_case(stmt);
    }

    fn case_invoke_stmt(&mut self, stmt: &InvokeStmt) {
        self.default_case(stmt);
    }

    fn case_return_stmt(&mut self, stmt: &ReturnStmt) {
        self.default_case(stmt);
    }

    fn case_return_void_stmt(&mut self, stmt: &ReturnVoidStmt) {
        self.default_case(stmt);
    }

    fn case_throw_stmt(&mut self, stmt: &ThrowStmt) {
        self.default_case(stmt);
    }

    fn case_goto_stmt(&mut self, stmt: &GotoStmt) {
        self.default_case(stmt);
    }

    fn case_if_stmt(&mut self, stmt: &IfStmt) {
        self.default_case(stmt);
    }

    fn default_case(&mut self, _stmt: &dyn StmtNode) {}
}

/// Common view of every reference variant, handed to [`RefVisitor::default_case`].
pub trait RefNode: fmt::Debug + fmt::Display {
    fn ty(&self) -> Type;

    fn is_identity(&self) -> bool;
}

macro_rules! ref_node {
    ($ty:ty, identity = $identity:expr, |$this:ident| $ty_expr:expr) => {
        impl RefNode for $ty {
            fn ty(&self) -> Type {
                let $this = self;
                $ty_expr
            }

            fn is_identity(&self) -> bool {
                $identity
            }
        }
    };
}

ref_node!(StaticFieldRef, identity = false, |r| r.field().ty().clone());
ref_node!(InstanceFieldRef, identity = false, |r| r.field().ty().clone());
ref_node!(ArrayRef, identity = false, |r| r
    .base()
    .ty()
    .element_type()
    .cloned()
    .unwrap_or(Type::Unknown));
ref_node!(ThisRef, identity = true, |r| Type::Class(r.class_type().clone()));
ref_node!(ParameterRef, identity = true, |r| r.ty().clone());
ref_node!(CaughtExceptionRef, identity = true, |r| r.ty().clone());

pub trait RefVisitor {
    fn case_static_field_ref(&mut self, r: &StaticFieldRef) {
        self.default_case(r);
    }

    fn case_instance_field_ref(&mut self, r: &InstanceFieldRef) {
        self.default_case(r);
    }

    fn case_array_ref(&mut self, r: &ArrayRef) {
        self.default_case(r);
    }

    fn case_this_ref(&mut self, r: &ThisRef) {
        self.default_case(r);
    }

    fn case_parameter_ref(&mut self, r: &ParameterRef) {
        self.default_case(r);
    }

    fn case_caught_exception_ref(&mut self, r: &CaughtExceptionRef) {
        self.default_case(r);
    }

    fn default_case(&mut self, _r: &dyn RefNode) {}
}

impl ConcreteRef {
    pub fn accept<V: RefVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            ConcreteRef::StaticField(r) => visitor.case_static_field_ref(r),
            ConcreteRef::InstanceField(r) => visitor.case_instance_field_ref(r),
            ConcreteRef::Array(r) => visitor.case_array_ref(r),
        }
    }
}

impl IdentityRef {
    pub fn accept<V: RefVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            IdentityRef::This(r) => visitor.case_this_ref(r),
            IdentityRef::Parameter(r) => visitor.case_parameter_ref(r),
            IdentityRef::CaughtException(r) => visitor.case_caught_exception_ref(r),
        }
    }
}

impl Ref {
    pub fn accept<V: RefVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Ref::Concrete(r) => r.accept(visitor),
            Ref::Identity(r) => r.accept(visitor),
        }
    }
}

/// Common view of every expression variant, handed to [`ExprVisitor::default_case`].
pub trait ExprNode: fmt::Debug + fmt::Display {
    fn ty(&self) -> Type;
}

impl ExprNode for BinaryExpr {
    fn ty(&self) -> Type {
        BinaryExpr::ty(self)
    }
}

impl ExprNode for UnaryExpr {
    fn ty(&self) -> Type {
        match self.op() {
            UnaryOp::Neg => self.operand().ty(),
            UnaryOp::Length => Type::Primitive(PrimitiveType::Int),
        }
    }
}

impl ExprNode for CastExpr {
    fn ty(&self) -> Type {
        self.cast_type().clone()
    }
}

impl ExprNode for InstanceOfExpr {
    fn ty(&self) -> Type {
        Type::Primitive(PrimitiveType::Boolean)
    }
}

impl ExprNode for NewExpr {
    fn ty(&self) -> Type {
        Type::Class(self.class_type().clone())
    }
}

impl ExprNode for NewArrayExpr {
    fn ty(&self) -> Type {
        Type::array_of(self.element_type().clone())
    }
}

impl ExprNode for InvokeExpr {
    fn ty(&self) -> Type {
        self.method().return_type().clone()
    }
}

pub trait ExprVisitor {
    fn case_binary_expr(&mut self, expr: &BinaryExpr) {
        self.default_case(expr);
    }

    fn case_unary_expr(&mut self, expr: &UnaryExpr) {
        self.default_case(expr);
    }

    fn case_cast_expr(&mut self, expr: &CastExpr) {
        self.default_case(expr);
    }

    fn case_instance_of_expr(&mut self, expr: &InstanceOfExpr) {
        self.default_case(expr);
    }

    fn case_new_expr(&mut self, expr: &NewExpr) {
        self.default_case(expr);
    }

    fn case_new_array_expr(&mut self, expr: &NewArrayExpr) {
        self.default_case(expr);
    }

    fn case_invoke_expr(&mut self, expr: &InvokeExpr) {
        self.default_case(expr);
    }

    fn default_case(&mut self, _expr: &dyn ExprNode) {}
}

impl Expr {
    pub fn as_node(&self) -> &dyn ExprNode {
        match self {
            Expr::Binary(e) => e,
            Expr::Unary(e) => e,
            Expr::Cast(e) => e,
            Expr::InstanceOf(e) => e,
            Expr::New(e) => e,
            Expr::NewArray(e) => e,
            Expr::Invoke(e) => e,
        }
    }

    pub fn accept<V: ExprVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Expr::Binary(e) => visitor.case_binary_expr(e),
            Expr::Unary(e) => visitor.case_unary_expr(e),
            Expr::Cast(e) => visitor.case_cast_expr(e),
            Expr::InstanceOf(e) => visitor.case_instance_of_expr(e),
            Expr::New(e) => visitor.case_new_expr(e),
            Expr::NewArray(e) => visitor.case_new_array_expr(e),
            Expr::Invoke(e) => visitor.case_invoke_expr(e),
        }
    }
}

/// Constant cases receive the payload directly; the fallback receives the
/// whole constant.
pub trait ConstantVisitor {
    fn case_boolean_constant(&mut self, value: bool) {
        self.default_case(&Constant::Boolean(value));
    }

    fn case_int_constant(&mut self, value: i32) {
        self.default_case(&Constant::Int(value));
    }

    fn case_long_constant(&mut self, value: i64) {
        self.default_case(&Constant::Long(value));
    }

    fn case_float_constant(&mut self, value: f32) {
        self.default_case(&Constant::Float(value));
    }

    fn case_double_constant(&mut self, value: f64) {
        self.default_case(&Constant::Double(value));
    }

    fn case_string_constant(&mut self, value: &str) {
        self.default_case(&Constant::string(value));
    }

    fn case_class_constant(&mut self, ty: &Type) {
        self.default_case(&Constant::Class(ty.clone()));
    }

    fn case_null_constant(&mut self) {
        self.default_case(&Constant::Null);
    }

    fn default_case(&mut self, _constant: &Constant) {}
}

impl Constant {
    pub fn accept<V: ConstantVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Constant::Boolean(v) => visitor.case_boolean_constant(*v),
            Constant::Int(v) => visitor.case_int_constant(*v),
            Constant::Long(v) => visitor.case_long_constant(*v),
            Constant::Float(v) => visitor.case_float_constant(*v),
            Constant::Double(v) => visitor.case_double_constant(*v),
            Constant::String(v) => visitor.case_string_constant(v),
            Constant::Class(ty) => visitor.case_class_constant(ty),
            Constant::Null => visitor.case_null_constant(),
        }
    }
}
