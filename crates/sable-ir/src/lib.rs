//! Statement/value intermediate representation for JVM method bodies.
//!
//! Nodes are immutable values. Structural equivalence is pluggable through
//! [`IrComparator`]; identity of statements within a body goes through
//! [`StmtRef`].

#![forbid(unsafe_code)]

mod body;
mod comparator;
mod error;
mod printer;
mod stmt;
mod value;
mod visitor;

pub use body::{Body, StmtRef};
pub use comparator::{IrComparator, StructuralComparator};
pub use error::{IrError, Result};
pub use printer::{PlainStmtPrinter, StmtPrinter};
pub use stmt::{
    AssignStmt, GotoStmt, IdentityStmt, IfStmt, InvokeStmt, NopStmt, ReturnStmt, ReturnVoidStmt,
    Stmt, StmtKind, StmtNode, ThrowStmt,
};
pub use value::{
    ArrayRef, BinaryExpr, BinaryOp, CastExpr, CaughtExceptionRef, ConcreteRef, Constant, Expr,
    IdentityRef, Immediate, InstanceFieldRef, InstanceOfExpr, InvokeExpr, InvokeKind, LValue,
    Local, NewArrayExpr, NewExpr, ParameterRef, Ref, StaticFieldRef, ThisRef, UnaryExpr, UnaryOp,
    Value,
};
pub use visitor::{ConstantVisitor, ExprNode, ExprVisitor, RefNode, RefVisitor, StmtVisitor};
