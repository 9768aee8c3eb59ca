//! The statement layer of the IR.
//!
//! Statements are immutable: every `with_*` method returns a new statement and
//! leaves `self` untouched. There are no setters.

use std::fmt;

use sable_core::StmtPosition;

use crate::comparator::IrComparator;
use crate::error::{IrError, Result};
use crate::printer::{render, StmtPrinter};
use crate::value::{
    ArrayRef, BinaryExpr, ConcreteRef, Expr, IdentityRef, Immediate, InvokeExpr, LValue, Local,
    Ref, Value,
};
use crate::visitor::StmtVisitor;

/// Fixed structural hash shared by every `nop`.
const NOP_EQUIV_HASH: u64 = 42;
const RETURN_VOID_EQUIV_HASH: u64 = 43;
const GOTO_EQUIV_HASH: u64 = 44;
const MIX: u64 = 31;

fn mix(a: u64, b: u64) -> u64 {
    a.wrapping_add(MIX.wrapping_mul(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtKind {
    Nop,
    Assign,
    Identity,
    Invoke,
    Return,
    ReturnVoid,
    Throw,
    Goto,
    If,
}

/// Behaviour shared by every statement variant.
///
/// Visitors receive a `&dyn StmtNode` in their fallback case.
pub trait StmtNode: fmt::Debug + fmt::Display {
    fn kind(&self) -> StmtKind;

    fn position(&self) -> StmtPosition;

    /// Whether control may continue with the next statement.
    fn falls_through(&self) -> bool;

    /// Whether control may jump to a statement other than the next one.
    fn branches(&self) -> bool;

    fn print(&self, printer: &mut dyn StmtPrinter);
}

macro_rules! stmt_node {
    ($ty:ty, $kind:ident, falls_through = $ft:expr, branches = $br:expr) => {
        impl StmtNode for $ty {
            fn kind(&self) -> StmtKind {
                StmtKind::$kind
            }

            fn position(&self) -> StmtPosition {
                self.position
            }

            fn falls_through(&self) -> bool {
                $ft
            }

            fn branches(&self) -> bool {
                $br
            }

            fn print(&self, printer: &mut dyn StmtPrinter) {
                self.print_to(printer)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&render(|p| self.print_to(p)))
            }
        }

        impl $ty {
            #[must_use]
            pub fn with_position(&self, position: StmtPosition) -> Self {
                Self {
                    position,
                    ..self.clone()
                }
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct NopStmt {
    position: StmtPosition,
}

impl NopStmt {
    pub fn new(position: StmtPosition) -> Self {
        Self { position }
    }

    pub fn equiv_hash(&self) -> u64 {
        NOP_EQUIV_HASH
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("nop");
    }
}

stmt_node!(NopStmt, Nop, falls_through = true, branches = false);

/// `lhs = rhs`, where `rhs` is an immediate, a concrete reference or an
/// expression.
#[derive(Debug, Clone)]
pub struct AssignStmt {
    lhs: LValue,
    rhs: Value,
    position: StmtPosition,
}

impl AssignStmt {
    /// Build an assignment. Identity references are rejected: they may only be
    /// read by an [`IdentityStmt`].
    pub fn new(lhs: LValue, rhs: Value, position: StmtPosition) -> Result<Self> {
        if !Self::is_valid_rhs(&rhs) {
            return Err(IrError::IllegalAssignmentOperand {
                operand: rhs.to_string(),
            });
        }
        Ok(Self { lhs, rhs, position })
    }

    fn is_valid_rhs(rhs: &Value) -> bool {
        rhs.is_immediate() || rhs.is_concrete_ref() || rhs.is_expr()
    }

    pub fn lhs(&self) -> &LValue {
        &self.lhs
    }

    pub fn rhs(&self) -> &Value {
        &self.rhs
    }

    pub fn contains_invoke_expr(&self) -> bool {
        self.rhs.as_invoke_expr().is_some()
    }

    pub fn invoke_expr(&self) -> Result<&InvokeExpr> {
        self.rhs
            .as_invoke_expr()
            .ok_or_else(|| IrError::MissingInvokeExpr {
                stmt: self.to_string(),
            })
    }

    pub fn contains_array_ref(&self) -> bool {
        self.lhs.as_array_ref().is_some() || self.rhs.as_array_ref().is_some()
    }

    /// The array reference on the left, or failing that, on the right.
    pub fn array_ref(&self) -> Result<&ArrayRef> {
        self.lhs
            .as_array_ref()
            .or_else(|| self.rhs.as_array_ref())
            .ok_or_else(|| IrError::MissingArrayRef {
                stmt: self.to_string(),
            })
    }

    pub fn contains_field_ref(&self) -> bool {
        self.lhs.as_field_ref().is_some() || self.rhs.as_field_ref().is_some()
    }

    /// The field reference on the left, or failing that, on the right.
    pub fn field_ref(&self) -> Result<&ConcreteRef> {
        self.lhs
            .as_field_ref()
            .or_else(|| self.rhs.as_field_ref())
            .ok_or_else(|| IrError::MissingFieldRef {
                stmt: self.to_string(),
            })
    }

    #[must_use]
    pub fn with_variable(&self, lhs: LValue) -> Self {
        Self {
            lhs,
            rhs: self.rhs.clone(),
            position: self.position,
        }
    }

    pub fn with_rvalue(&self, rhs: Value) -> Result<Self> {
        Self::new(self.lhs.clone(), rhs, self.position)
    }

    /// Replace the local this statement writes to.
    ///
    /// For array and instance-field targets the base local is replaced; a
    /// static field target has no local and is returned unchanged.
    #[must_use]
    pub fn with_new_def(&self, local: Local) -> Self {
        let lhs = match &self.lhs {
            LValue::Local(_) => LValue::Local(local),
            LValue::Ref(ConcreteRef::Array(r)) => LValue::Ref(ConcreteRef::Array(r.with_base(local))),
            LValue::Ref(ConcreteRef::InstanceField(r)) => {
                LValue::Ref(ConcreteRef::InstanceField(r.with_base(local)))
            }
            LValue::Ref(ConcreteRef::StaticField(_)) => return self.clone(),
        };
        self.with_variable(lhs)
    }

    pub fn equiv_hash(&self) -> u64 {
        mix(self.lhs.equiv_hash(), self.rhs.equiv_hash())
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        self.lhs.print(printer);
        printer.literal(" = ");
        self.rhs.print(printer);
    }
}

stmt_node!(AssignStmt, Assign, falls_through = true, branches = false);

/// `local := @this` / `@parameterN` / `@caughtexception`.
#[derive(Debug, Clone)]
pub struct IdentityStmt {
    local: Local,
    rhs: IdentityRef,
    position: StmtPosition,
}

impl IdentityStmt {
    pub fn new(local: Local, rhs: IdentityRef, position: StmtPosition) -> Self {
        Self {
            local,
            rhs,
            position,
        }
    }

    /// Build an identity statement from an arbitrary value, rejecting anything
    /// that is not an identity reference.
    pub fn from_value(local: Local, rhs: Value, position: StmtPosition) -> Result<Self> {
        match rhs {
            Value::Ref(Ref::Identity(r)) => Ok(Self::new(local, r, position)),
            other => Err(IrError::IllegalIdentityOperand {
                operand: other.to_string(),
            }),
        }
    }

    pub fn local(&self) -> &Local {
        &self.local
    }

    pub fn rhs(&self) -> &IdentityRef {
        &self.rhs
    }

    #[must_use]
    pub fn with_local(&self, local: Local) -> Self {
        Self::new(local, self.rhs.clone(), self.position)
    }

    pub fn equiv_hash(&self) -> u64 {
        mix(self.local.equiv_hash(), self.rhs.equiv_hash())
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        printer.local(&self.local);
        printer.literal(" := ");
        self.rhs.print(printer);
    }
}

stmt_node!(IdentityStmt, Identity, falls_through = true, branches = false);

#[derive(Debug, Clone)]
pub struct InvokeStmt {
    invoke: InvokeExpr,
    position: StmtPosition,
}

impl InvokeStmt {
    pub fn new(invoke: InvokeExpr, position: StmtPosition) -> Self {
        Self { invoke, position }
    }

    pub fn invoke_expr(&self) -> &InvokeExpr {
        &self.invoke
    }

    #[must_use]
    pub fn with_invoke_expr(&self, invoke: InvokeExpr) -> Self {
        Self::new(invoke, self.position)
    }

    pub fn equiv_hash(&self) -> u64 {
        self.invoke.equiv_hash()
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        self.invoke.print(printer);
    }
}

stmt_node!(InvokeStmt, Invoke, falls_through = true, branches = false);

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    op: Immediate,
    position: StmtPosition,
}

impl ReturnStmt {
    pub fn new(op: Immediate, position: StmtPosition) -> Self {
        Self { op, position }
    }

    pub fn op(&self) -> &Immediate {
        &self.op
    }

    #[must_use]
    pub fn with_op(&self, op: Immediate) -> Self {
        Self::new(op, self.position)
    }

    pub fn equiv_hash(&self) -> u64 {
        mix(17, self.op.equiv_hash())
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("return ");
        self.op.print(printer);
    }
}

stmt_node!(ReturnStmt, Return, falls_through = false, branches = false);

#[derive(Debug, Clone)]
pub struct ReturnVoidStmt {
    position: StmtPosition,
}

impl ReturnVoidStmt {
    pub fn new(position: StmtPosition) -> Self {
        Self { position }
    }

    pub fn equiv_hash(&self) -> u64 {
        RETURN_VOID_EQUIV_HASH
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("return");
    }
}

stmt_node!(ReturnVoidStmt, ReturnVoid, falls_through = false, branches = false);

#[derive(Debug, Clone)]
pub struct ThrowStmt {
    op: Immediate,
    position: StmtPosition,
}

impl ThrowStmt {
    pub fn new(op: Immediate, position: StmtPosition) -> Self {
        Self { op, position }
    }

    pub fn op(&self) -> &Immediate {
        &self.op
    }

    #[must_use]
    pub fn with_op(&self, op: Immediate) -> Self {
        Self::new(op, self.position)
    }

    pub fn equiv_hash(&self) -> u64 {
        mix(19, self.op.equiv_hash())
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("throw ");
        self.op.print(printer);
    }
}

stmt_node!(ThrowStmt, Throw, falls_through = false, branches = false);

/// Unconditional jump. The target lives in the body's control-flow graph,
/// not in the statement.
#[derive(Debug, Clone)]
pub struct GotoStmt {
    position: StmtPosition,
}

impl GotoStmt {
    pub fn new(position: StmtPosition) -> Self {
        Self { position }
    }

    pub fn equiv_hash(&self) -> u64 {
        GOTO_EQUIV_HASH
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("goto");
    }
}

stmt_node!(GotoStmt, Goto, falls_through = false, branches = true);

/// Conditional jump on a comparison.
#[derive(Debug, Clone)]
pub struct IfStmt {
    condition: BinaryExpr,
    position: StmtPosition,
}

impl IfStmt {
    pub fn new(condition: BinaryExpr, position: StmtPosition) -> Result<Self> {
        if !condition.op().is_condition() {
            return Err(IrError::InvalidCondition {
                condition: condition.to_string(),
            });
        }
        Ok(Self {
            condition,
            position,
        })
    }

    pub fn condition(&self) -> &BinaryExpr {
        &self.condition
    }

    pub fn with_condition(&self, condition: BinaryExpr) -> Result<Self> {
        Self::new(condition, self.position)
    }

    pub fn equiv_hash(&self) -> u64 {
        self.condition.equiv_hash()
    }

    fn print_to(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("if ");
        self.condition.print(printer);
    }
}

stmt_node!(IfStmt, If, falls_through = true, branches = true);

/// A statement of a method body.
///
/// `Stmt` has no `PartialEq`: structural comparison goes through
/// [`Stmt::equiv_to`], identity through [`crate::StmtRef`].
#[derive(Debug, Clone)]
pub enum Stmt {
    Nop(NopStmt),
    Assign(AssignStmt),
    Identity(IdentityStmt),
    Invoke(InvokeStmt),
    Return(ReturnStmt),
    ReturnVoid(ReturnVoidStmt),
    Throw(ThrowStmt),
    Goto(GotoStmt),
    If(IfStmt),
}

macro_rules! each_stmt {
    ($stmt:expr, $s:ident => $body:expr) => {
        match $stmt {
            Stmt::Nop($s) => $body,
            Stmt::Assign($s) => $body,
            Stmt::Identity($s) => $body,
            Stmt::Invoke($s) => $body,
            Stmt::Return($s) => $body,
            Stmt::ReturnVoid($s) => $body,
            Stmt::Throw($s) => $body,
            Stmt::Goto($s) => $body,
            Stmt::If($s) => $body,
        }
    };
}

impl Stmt {
    pub fn nop(position: StmtPosition) -> Self {
        Stmt::Nop(NopStmt::new(position))
    }

    pub fn assign(lhs: impl Into<LValue>, rhs: impl Into<Value>, position: StmtPosition) -> Result<Self> {
        AssignStmt::new(lhs.into(), rhs.into(), position).map(Stmt::Assign)
    }

    pub fn as_node(&self) -> &dyn StmtNode {
        each_stmt!(self, s => s as &dyn StmtNode)
    }

    pub fn kind(&self) -> StmtKind {
        self.as_node().kind()
    }

    pub fn position(&self) -> StmtPosition {
        self.as_node().position()
    }

    #[must_use]
    pub fn with_position(&self, position: StmtPosition) -> Self {
        match self {
            Stmt::Nop(s) => Stmt::Nop(s.with_position(position)),
            Stmt::Assign(s) => Stmt::Assign(s.with_position(position)),
            Stmt::Identity(s) => Stmt::Identity(s.with_position(position)),
            Stmt::Invoke(s) => Stmt::Invoke(s.with_position(position)),
            Stmt::Return(s) => Stmt::Return(s.with_position(position)),
            Stmt::ReturnVoid(s) => Stmt::ReturnVoid(s.with_position(position)),
            Stmt::Throw(s) => Stmt::Throw(s.with_position(position)),
            Stmt::Goto(s) => Stmt::Goto(s.with_position(position)),
            Stmt::If(s) => Stmt::If(s.with_position(position)),
        }
    }

    pub fn falls_through(&self) -> bool {
        self.as_node().falls_through()
    }

    pub fn branches(&self) -> bool {
        self.as_node().branches()
    }

    pub fn accept<V: StmtVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Stmt::Nop(s) => visitor.case_nop_stmt(s),
            Stmt::Assign(s) => visitor.case_assign_stmt(s),
            Stmt::Identity(s) => visitor.case_identity_stmt(s),
            Stmt::Invoke(s) => visitor.case_invoke_stmt(s),
            Stmt::Return(s) => visitor.case_return_stmt(s),
            Stmt::ReturnVoid(s) => visitor.case_return_void_stmt(s),
            Stmt::Throw(s) => visitor.case_throw_stmt(s),
            Stmt::Goto(s) => visitor.case_goto_stmt(s),
            Stmt::If(s) => visitor.case_if_stmt(s),
        }
    }

    /// Structural equivalence under `comparator`.
    pub fn equiv_to<C: IrComparator + ?Sized>(&self, other: &Stmt, comparator: &C) -> bool {
        match self {
            Stmt::Nop(s) => comparator.case_nop_stmt(s, other),
            Stmt::Assign(s) => comparator.case_assign_stmt(s, other),
            Stmt::Identity(s) => comparator.case_identity_stmt(s, other),
            Stmt::Invoke(s) => comparator.case_invoke_stmt(s, other),
            Stmt::Return(s) => comparator.case_return_stmt(s, other),
            Stmt::ReturnVoid(s) => comparator.case_return_void_stmt(s, other),
            Stmt::Throw(s) => comparator.case_throw_stmt(s, other),
            Stmt::Goto(s) => comparator.case_goto_stmt(s, other),
            Stmt::If(s) => comparator.case_if_stmt(s, other),
        }
    }

    /// Hash consistent with [`Stmt::equiv_to`] under the structural comparator.
    pub fn equiv_hash(&self) -> u64 {
        each_stmt!(self, s => s.equiv_hash())
    }

    pub fn contains_invoke_expr(&self) -> bool {
        match self {
            Stmt::Assign(s) => s.contains_invoke_expr(),
            Stmt::Invoke(_) => true,
            _ => false,
        }
    }

    pub fn invoke_expr(&self) -> Result<&InvokeExpr> {
        match self {
            Stmt::Assign(s) => s.invoke_expr(),
            Stmt::Invoke(s) => Ok(s.invoke_expr()),
            _ => Err(IrError::MissingInvokeExpr {
                stmt: self.to_string(),
            }),
        }
    }

    pub fn contains_array_ref(&self) -> bool {
        match self {
            Stmt::Assign(s) => s.contains_array_ref(),
            _ => false,
        }
    }

    pub fn array_ref(&self) -> Result<&ArrayRef> {
        match self {
            Stmt::Assign(s) => s.array_ref(),
            _ => Err(IrError::MissingArrayRef {
                stmt: self.to_string(),
            }),
        }
    }

    pub fn contains_field_ref(&self) -> bool {
        match self {
            Stmt::Assign(s) => s.contains_field_ref(),
            _ => false,
        }
    }

    pub fn field_ref(&self) -> Result<&ConcreteRef> {
        match self {
            Stmt::Assign(s) => s.field_ref(),
            _ => Err(IrError::MissingFieldRef {
                stmt: self.to_string(),
            }),
        }
    }

    /// The local written by this statement, if any.
    pub fn defined_local(&self) -> Option<&Local> {
        match self {
            Stmt::Assign(s) => s.lhs().as_local(),
            Stmt::Identity(s) => Some(s.local()),
            _ => None,
        }
    }

    /// Locals read by this statement, in operand order. Bases of a reference
    /// on the left-hand side count as reads.
    pub fn used_locals(&self) -> Vec<&Local> {
        let mut out = Vec::new();
        match self {
            Stmt::Assign(s) => {
                if let LValue::Ref(r) = s.lhs() {
                    concrete_ref_locals(r, &mut out);
                }
                value_locals(s.rhs(), &mut out);
            }
            Stmt::Invoke(s) => invoke_locals(s.invoke_expr(), &mut out),
            Stmt::Return(s) => out.extend(s.op().as_local()),
            Stmt::Throw(s) => out.extend(s.op().as_local()),
            Stmt::If(s) => {
                out.extend(s.condition().lhs().as_local());
                out.extend(s.condition().rhs().as_local());
            }
            Stmt::Nop(_) | Stmt::Identity(_) | Stmt::ReturnVoid(_) | Stmt::Goto(_) => {}
        }
        out
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        self.as_node().print(printer);
    }
}

fn concrete_ref_locals<'a>(r: &'a ConcreteRef, out: &mut Vec<&'a Local>) {
    match r {
        ConcreteRef::StaticField(_) => {}
        ConcreteRef::InstanceField(f) => out.push(f.base()),
        ConcreteRef::Array(a) => {
            out.push(a.base());
            out.extend(a.index().as_local());
        }
    }
}

fn invoke_locals<'a>(invoke: &'a InvokeExpr, out: &mut Vec<&'a Local>) {
    out.extend(invoke.base());
    out.extend(invoke.args().iter().filter_map(Immediate::as_local));
}

fn value_locals<'a>(value: &'a Value, out: &mut Vec<&'a Local>) {
    match value {
        Value::Immediate(imm) => out.extend(imm.as_local()),
        Value::Ref(Ref::Concrete(r)) => concrete_ref_locals(r, out),
        Value::Ref(Ref::Identity(_)) => {}
        Value::Expr(expr) => match expr {
            Expr::Binary(e) => {
                out.extend(e.lhs().as_local());
                out.extend(e.rhs().as_local());
            }
            Expr::Unary(e) => out.extend(e.operand().as_local()),
            Expr::Cast(e) => out.extend(e.operand().as_local()),
            Expr::InstanceOf(e) => out.extend(e.operand().as_local()),
            Expr::New(_) => {}
            Expr::NewArray(e) => out.extend(e.size().as_local()),
            Expr::Invoke(e) => invoke_locals(e, out),
        },
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_node(), f)
    }
}

impl From<NopStmt> for Stmt {
    fn from(value: NopStmt) -> Self {
        Stmt::Nop(value)
    }
}

impl From<AssignStmt> for Stmt {
    fn from(value: AssignStmt) -> Self {
        Stmt::Assign(value)
    }
}

impl From<IdentityStmt> for Stmt {
    fn from(value: IdentityStmt) -> Self {
        Stmt::Identity(value)
    }
}

impl From<InvokeStmt> for Stmt {
    fn from(value: InvokeStmt) -> Self {
        Stmt::Invoke(value)
    }
}

impl From<ReturnStmt> for Stmt {
    fn from(value: ReturnStmt) -> Self {
        Stmt::Return(value)
    }
}

impl From<ReturnVoidStmt> for Stmt {
    fn from(value: ReturnVoidStmt) -> Self {
        Stmt::ReturnVoid(value)
    }
}

impl From<ThrowStmt> for Stmt {
    fn from(value: ThrowStmt) -> Self {
        Stmt::Throw(value)
    }
}

impl From<GotoStmt> for Stmt {
    fn from(value: GotoStmt) -> Self {
        Stmt::Goto(value)
    }
}

impl From<IfStmt> for Stmt {
    fn from(value: IfStmt) -> Self {
        Stmt::If(value)
    }
}
