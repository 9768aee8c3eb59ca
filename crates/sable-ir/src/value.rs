//! Operands of IR statements.
//!
//! The value model is a closed set: immediates (locals and constants),
//! references (concrete field/array references and identity references) and
//! expressions. Statements only depend on it through capability checks such as
//! [`Value::is_identity_ref`].

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use sable_core::{ClassType, FieldSignature, MethodSignature, Name, PrimitiveType, Type};

use crate::error::{IrError, Result};
use crate::printer::{render, StmtPrinter};
use crate::visitor::ExprNode;

pub(crate) fn structural_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

macro_rules! display_via_printer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&render(|p| self.print(p)))
                }
            }
        )*
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Local {
    name: Name,
    ty: Type,
}

impl Local {
    pub fn new(name: impl Into<Name>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[must_use]
    pub fn with_name(&self, name: impl Into<Name>) -> Self {
        Self::new(name, self.ty.clone())
    }

    #[must_use]
    pub fn with_type(&self, ty: Type) -> Self {
        Self::new(self.name.clone(), ty)
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.local(self);
    }
}

#[derive(Debug, Clone)]
pub enum Constant {
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Name),
    /// A class literal such as `String.class`.
    Class(Type),
    Null,
}

// Floating point constants compare by bit pattern so `NaN == NaN` and the
// `Eq`/`Hash` contract holds.
impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constant::Boolean(a), Constant::Boolean(b)) => a == b,
            (Constant::Int(a), Constant::Int(b)) => a == b,
            (Constant::Long(a), Constant::Long(b)) => a == b,
            (Constant::Float(a), Constant::Float(b)) => a.to_bits() == b.to_bits(),
            (Constant::Double(a), Constant::Double(b)) => a.to_bits() == b.to_bits(),
            (Constant::String(a), Constant::String(b)) => a == b,
            (Constant::Class(a), Constant::Class(b)) => a == b,
            (Constant::Null, Constant::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Constant::Boolean(v) => v.hash(state),
            Constant::Int(v) => v.hash(state),
            Constant::Long(v) => v.hash(state),
            Constant::Float(v) => v.to_bits().hash(state),
            Constant::Double(v) => v.to_bits().hash(state),
            Constant::String(v) => v.hash(state),
            Constant::Class(v) => v.hash(state),
            Constant::Null => {}
        }
    }
}

impl Constant {
    pub fn string(value: impl Into<Name>) -> Self {
        Constant::String(value.into())
    }

    pub fn ty(&self) -> Type {
        match self {
            Constant::Boolean(_) => Type::Primitive(PrimitiveType::Boolean),
            Constant::Int(_) => Type::Primitive(PrimitiveType::Int),
            Constant::Long(_) => Type::Primitive(PrimitiveType::Long),
            Constant::Float(_) => Type::Primitive(PrimitiveType::Float),
            Constant::Double(_) => Type::Primitive(PrimitiveType::Double),
            Constant::String(_) => Type::class("java.lang.String"),
            Constant::Class(_) => Type::class("java.lang.Class"),
            Constant::Null => Type::Null,
        }
    }

    pub(crate) fn render(&self) -> String {
        match self {
            Constant::Boolean(v) => v.to_string(),
            Constant::Int(v) => v.to_string(),
            Constant::Long(v) => format!("{v}L"),
            Constant::Float(v) => format!("{v:?}F"),
            Constant::Double(v) => format!("{v:?}"),
            Constant::String(v) => format!("{:?}", v.as_str()),
            Constant::Class(ty) => format!("class \"{ty}\""),
            Constant::Null => "null".to_string(),
        }
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.constant(self);
    }
}

/// Operands that need no further evaluation: a local or a constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Immediate {
    Local(Local),
    Constant(Constant),
}

impl Immediate {
    pub fn ty(&self) -> Type {
        match self {
            Immediate::Local(local) => local.ty().clone(),
            Immediate::Constant(constant) => constant.ty(),
        }
    }

    pub fn as_local(&self) -> Option<&Local> {
        match self {
            Immediate::Local(local) => Some(local),
            Immediate::Constant(_) => None,
        }
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        match self {
            Immediate::Local(local) => local.print(printer),
            Immediate::Constant(constant) => constant.print(printer),
        }
    }
}

impl From<Local> for Immediate {
    fn from(value: Local) -> Self {
        Immediate::Local(value)
    }
}

impl From<Constant> for Immediate {
    fn from(value: Constant) -> Self {
        Immediate::Constant(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticFieldRef {
    field: FieldSignature,
}

impl StaticFieldRef {
    pub fn new(field: FieldSignature) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &FieldSignature {
        &self.field
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.field_signature(&self.field);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceFieldRef {
    base: Local,
    field: FieldSignature,
}

impl InstanceFieldRef {
    pub fn new(base: Local, field: FieldSignature) -> Self {
        Self { base, field }
    }

    pub fn base(&self) -> &Local {
        &self.base
    }

    pub fn field(&self) -> &FieldSignature {
        &self.field
    }

    #[must_use]
    pub fn with_base(&self, base: Local) -> Self {
        Self::new(base, self.field.clone())
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.local(&self.base);
        printer.literal(".");
        printer.field_signature(&self.field);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayRef {
    base: Local,
    index: Immediate,
}

impl ArrayRef {
    pub fn new(base: Local, index: Immediate) -> Self {
        Self { base, index }
    }

    pub fn base(&self) -> &Local {
        &self.base
    }

    pub fn index(&self) -> &Immediate {
        &self.index
    }

    #[must_use]
    pub fn with_base(&self, base: Local) -> Self {
        Self::new(base, self.index.clone())
    }

    #[must_use]
    pub fn with_index(&self, index: Immediate) -> Self {
        Self::new(self.base.clone(), index)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.local(&self.base);
        printer.literal("[");
        self.index.print(printer);
        printer.literal("]");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThisRef {
    ty: ClassType,
}

impl ThisRef {
    pub fn new(ty: ClassType) -> Self {
        Self { ty }
    }

    pub fn class_type(&self) -> &ClassType {
        &self.ty
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("@this: ");
        printer.type_name(&Type::Class(self.ty.clone()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterRef {
    index: u32,
    ty: Type,
}

impl ParameterRef {
    pub fn new(index: u32, ty: Type) -> Self {
        Self { index, ty }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal(&format!("@parameter{}: ", self.index));
        printer.type_name(&self.ty);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaughtExceptionRef {
    ty: Type,
}

impl CaughtExceptionRef {
    pub fn new(ty: Type) -> Self {
        Self { ty }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("@caughtexception");
    }
}

/// References to memory: fields and array elements. Legal on either side of an
/// assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConcreteRef {
    StaticField(StaticFieldRef),
    InstanceField(InstanceFieldRef),
    Array(ArrayRef),
}

impl ConcreteRef {
    pub fn ty(&self) -> Type {
        match self {
            ConcreteRef::StaticField(r) => r.field().ty().clone(),
            ConcreteRef::InstanceField(r) => r.field().ty().clone(),
            ConcreteRef::Array(r) => r
                .base()
                .ty()
                .element_type()
                .cloned()
                .unwrap_or(Type::Unknown),
        }
    }

    pub fn is_field_ref(&self) -> bool {
        matches!(
            self,
            ConcreteRef::StaticField(_) | ConcreteRef::InstanceField(_)
        )
    }

    pub fn field_signature(&self) -> Option<&FieldSignature> {
        match self {
            ConcreteRef::StaticField(r) => Some(r.field()),
            ConcreteRef::InstanceField(r) => Some(r.field()),
            ConcreteRef::Array(_) => None,
        }
    }

    pub fn as_array_ref(&self) -> Option<&ArrayRef> {
        match self {
            ConcreteRef::Array(r) => Some(r),
            _ => None,
        }
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        match self {
            ConcreteRef::StaticField(r) => r.print(printer),
            ConcreteRef::InstanceField(r) => r.print(printer),
            ConcreteRef::Array(r) => r.print(printer),
        }
    }
}

/// References that name the implicit inputs of a method body. Only an
/// identity statement may use them as its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityRef {
    This(ThisRef),
    Parameter(ParameterRef),
    CaughtException(CaughtExceptionRef),
}

impl IdentityRef {
    pub fn ty(&self) -> Type {
        match self {
            IdentityRef::This(r) => Type::Class(r.class_type().clone()),
            IdentityRef::Parameter(r) => r.ty().clone(),
            IdentityRef::CaughtException(r) => r.ty().clone(),
        }
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        match self {
            IdentityRef::This(r) => r.print(printer),
            IdentityRef::Parameter(r) => r.print(printer),
            IdentityRef::CaughtException(r) => r.print(printer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ref {
    Concrete(ConcreteRef),
    Identity(IdentityRef),
}

impl Ref {
    pub fn ty(&self) -> Type {
        match self {
            Ref::Concrete(r) => r.ty(),
            Ref::Identity(r) => r.ty(),
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self, Ref::Concrete(_))
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Ref::Identity(_))
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        match self {
            Ref::Concrete(r) => r.print(printer),
            Ref::Identity(r) => r.print(printer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Ushr,
    Cmp,
    Cmpl,
    Cmpg,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Ushr => ">>>",
            BinaryOp::Cmp => "cmp",
            BinaryOp::Cmpl => "cmpl",
            BinaryOp::Cmpg => "cmpg",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
        }
    }

    /// Conditions usable by an `if` statement.
    pub fn is_condition(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Length,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinaryExpr {
    op: BinaryOp,
    lhs: Immediate,
    rhs: Immediate,
}

impl BinaryExpr {
    pub fn new(op: BinaryOp, lhs: Immediate, rhs: Immediate) -> Self {
        Self { op, lhs, rhs }
    }

    pub fn op(&self) -> BinaryOp {
        self.op
    }

    pub fn lhs(&self) -> &Immediate {
        &self.lhs
    }

    pub fn rhs(&self) -> &Immediate {
        &self.rhs
    }

    pub fn ty(&self) -> Type {
        match self.op {
            BinaryOp::Cmp
            | BinaryOp::Cmpl
            | BinaryOp::Cmpg
            | BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => Type::Primitive(PrimitiveType::Int),
            _ => self.lhs.ty(),
        }
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        self.lhs.print(printer);
        printer.literal(" ");
        printer.literal(self.op.symbol());
        printer.literal(" ");
        self.rhs.print(printer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnaryExpr {
    op: UnaryOp,
    operand: Immediate,
}

impl UnaryExpr {
    pub fn new(op: UnaryOp, operand: Immediate) -> Self {
        Self { op, operand }
    }

    pub fn op(&self) -> UnaryOp {
        self.op
    }

    pub fn operand(&self) -> &Immediate {
        &self.operand
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal(match self.op {
            UnaryOp::Neg => "neg ",
            UnaryOp::Length => "lengthof ",
        });
        self.operand.print(printer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CastExpr {
    operand: Immediate,
    ty: Type,
}

impl CastExpr {
    pub fn new(operand: Immediate, ty: Type) -> Self {
        Self { operand, ty }
    }

    pub fn operand(&self) -> &Immediate {
        &self.operand
    }

    pub fn cast_type(&self) -> &Type {
        &self.ty
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("(");
        printer.type_name(&self.ty);
        printer.literal(") ");
        self.operand.print(printer);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceOfExpr {
    operand: Immediate,
    check_type: Type,
}

impl InstanceOfExpr {
    pub fn new(operand: Immediate, check_type: Type) -> Self {
        Self {
            operand,
            check_type,
        }
    }

    pub fn operand(&self) -> &Immediate {
        &self.operand
    }

    pub fn check_type(&self) -> &Type {
        &self.check_type
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        self.operand.print(printer);
        printer.literal(" instanceof ");
        printer.type_name(&self.check_type);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewExpr {
    ty: ClassType,
}

impl NewExpr {
    pub fn new(ty: ClassType) -> Self {
        Self { ty }
    }

    pub fn class_type(&self) -> &ClassType {
        &self.ty
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("new ");
        printer.type_name(&Type::Class(self.ty.clone()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewArrayExpr {
    element: Type,
    size: Immediate,
}

impl NewArrayExpr {
    pub fn new(element: Type, size: Immediate) -> Self {
        Self { element, size }
    }

    pub fn element_type(&self) -> &Type {
        &self.element
    }

    pub fn size(&self) -> &Immediate {
        &self.size
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal("newarray (");
        printer.type_name(&self.element);
        printer.literal(")[");
        self.size.print(printer);
        printer.literal("]");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvokeKind {
    Virtual,
    Interface,
    Special,
    Static,
    Dynamic,
}

impl InvokeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            InvokeKind::Virtual => "virtualinvoke",
            InvokeKind::Interface => "interfaceinvoke",
            InvokeKind::Special => "specialinvoke",
            InvokeKind::Static => "staticinvoke",
            InvokeKind::Dynamic => "dynamicinvoke",
        }
    }

    /// Whether the invocation needs a receiver.
    pub fn has_receiver(self) -> bool {
        matches!(
            self,
            InvokeKind::Virtual | InvokeKind::Interface | InvokeKind::Special
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvokeExpr {
    kind: InvokeKind,
    base: Option<Local>,
    method: MethodSignature,
    args: Vec<Immediate>,
}

impl InvokeExpr {
    /// Build an invocation, checking that the receiver matches the kind.
    pub fn new(
        kind: InvokeKind,
        base: Option<Local>,
        method: MethodSignature,
        args: Vec<Immediate>,
    ) -> Result<Self> {
        match (kind.has_receiver(), base.is_some()) {
            (true, false) => Err(IrError::InvalidInvokeBase {
                kind: kind.keyword(),
                method,
                problem: "requires a receiver",
            }),
            (false, true) => Err(IrError::InvalidInvokeBase {
                kind: kind.keyword(),
                method,
                problem: "must not have a receiver",
            }),
            _ => Ok(Self {
                kind,
                base,
                method,
                args,
            }),
        }
    }

    pub fn virtual_invoke(base: Local, method: MethodSignature, args: Vec<Immediate>) -> Self {
        Self::instance(InvokeKind::Virtual, base, method, args)
    }

    pub fn interface_invoke(base: Local, method: MethodSignature, args: Vec<Immediate>) -> Self {
        Self::instance(InvokeKind::Interface, base, method, args)
    }

    pub fn special_invoke(base: Local, method: MethodSignature, args: Vec<Immediate>) -> Self {
        Self::instance(InvokeKind::Special, base, method, args)
    }

    pub fn static_invoke(method: MethodSignature, args: Vec<Immediate>) -> Self {
        Self {
            kind: InvokeKind::Static,
            base: None,
            method,
            args,
        }
    }

    fn instance(
        kind: InvokeKind,
        base: Local,
        method: MethodSignature,
        args: Vec<Immediate>,
    ) -> Self {
        Self {
            kind,
            base: Some(base),
            method,
            args,
        }
    }

    pub fn kind(&self) -> InvokeKind {
        self.kind
    }

    pub fn base(&self) -> Option<&Local> {
        self.base.as_ref()
    }

    pub fn method(&self) -> &MethodSignature {
        &self.method
    }

    pub fn args(&self) -> &[Immediate] {
        &self.args
    }

    #[must_use]
    pub fn with_method(&self, method: MethodSignature) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_args(&self, args: Vec<Immediate>) -> Self {
        Self {
            args,
            ..self.clone()
        }
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.literal(self.kind.keyword());
        printer.literal(" ");
        if let Some(base) = &self.base {
            printer.local(base);
            printer.literal(".");
        }
        printer.method_signature(&self.method);
        printer.literal("(");
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                printer.literal(", ");
            }
            arg.print(printer);
        }
        printer.literal(")");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Cast(CastExpr),
    InstanceOf(InstanceOfExpr),
    New(NewExpr),
    NewArray(NewArrayExpr),
    Invoke(InvokeExpr),
}

impl Expr {
    pub fn ty(&self) -> Type {
        self.as_node().ty()
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        match self {
            Expr::Binary(e) => e.print(printer),
            Expr::Unary(e) => e.print(printer),
            Expr::Cast(e) => e.print(printer),
            Expr::InstanceOf(e) => e.print(printer),
            Expr::New(e) => e.print(printer),
            Expr::NewArray(e) => e.print(printer),
            Expr::Invoke(e) => e.print(printer),
        }
    }
}

/// Any operand a statement may read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Immediate(Immediate),
    Ref(Ref),
    Expr(Expr),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Immediate(v) => v.ty(),
            Value::Ref(v) => v.ty(),
            Value::Expr(v) => v.ty(),
        }
    }

    pub fn is_immediate(&self) -> bool {
        matches!(self, Value::Immediate(_))
    }

    pub fn is_concrete_ref(&self) -> bool {
        matches!(self, Value::Ref(Ref::Concrete(_)))
    }

    pub fn is_identity_ref(&self) -> bool {
        matches!(self, Value::Ref(Ref::Identity(_)))
    }

    pub fn is_expr(&self) -> bool {
        matches!(self, Value::Expr(_))
    }

    pub fn as_invoke_expr(&self) -> Option<&InvokeExpr> {
        match self {
            Value::Expr(Expr::Invoke(e)) => Some(e),
            _ => None,
        }
    }

    pub fn as_array_ref(&self) -> Option<&ArrayRef> {
        match self {
            Value::Ref(Ref::Concrete(r)) => r.as_array_ref(),
            _ => None,
        }
    }

    pub fn as_field_ref(&self) -> Option<&ConcreteRef> {
        match self {
            Value::Ref(Ref::Concrete(r)) if r.is_field_ref() => Some(r),
            _ => None,
        }
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        match self {
            Value::Immediate(v) => v.print(printer),
            Value::Ref(v) => v.print(printer),
            Value::Expr(v) => v.print(printer),
        }
    }
}

impl From<Immediate> for Value {
    fn from(value: Immediate) -> Self {
        Value::Immediate(value)
    }
}

impl From<Local> for Value {
    fn from(value: Local) -> Self {
        Value::Immediate(Immediate::Local(value))
    }
}

impl From<Constant> for Value {
    fn from(value: Constant) -> Self {
        Value::Immediate(Immediate::Constant(value))
    }
}

impl From<Ref> for Value {
    fn from(value: Ref) -> Self {
        Value::Ref(value)
    }
}

impl From<ConcreteRef> for Value {
    fn from(value: ConcreteRef) -> Self {
        Value::Ref(Ref::Concrete(value))
    }
}

impl From<IdentityRef> for Value {
    fn from(value: IdentityRef) -> Self {
        Value::Ref(Ref::Identity(value))
    }
}

impl From<Expr> for Value {
    fn from(value: Expr) -> Self {
        Value::Expr(value)
    }
}

impl From<InvokeExpr> for Value {
    fn from(value: InvokeExpr) -> Self {
        Value::Expr(Expr::Invoke(value))
    }
}

impl From<LValue> for Value {
    fn from(value: LValue) -> Self {
        match value {
            LValue::Local(local) => local.into(),
            LValue::Ref(r) => r.into(),
        }
    }
}

/// Assignment targets: a local or a concrete reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LValue {
    Local(Local),
    Ref(ConcreteRef),
}

impl LValue {
    pub fn ty(&self) -> Type {
        match self {
            LValue::Local(local) => local.ty().clone(),
            LValue::Ref(r) => r.ty(),
        }
    }

    pub fn as_local(&self) -> Option<&Local> {
        match self {
            LValue::Local(local) => Some(local),
            LValue::Ref(_) => None,
        }
    }

    pub fn as_array_ref(&self) -> Option<&ArrayRef> {
        match self {
            LValue::Ref(r) => r.as_array_ref(),
            LValue::Local(_) => None,
        }
    }

    pub fn as_field_ref(&self) -> Option<&ConcreteRef> {
        match self {
            LValue::Ref(r) if r.is_field_ref() => Some(r),
            _ => None,
        }
    }

    pub fn equiv_hash(&self) -> u64 {
        structural_hash(self)
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        match self {
            LValue::Local(local) => local.print(printer),
            LValue::Ref(r) => r.print(printer),
        }
    }
}

impl From<Local> for LValue {
    fn from(value: Local) -> Self {
        LValue::Local(value)
    }
}

impl From<ConcreteRef> for LValue {
    fn from(value: ConcreteRef) -> Self {
        LValue::Ref(value)
    }
}

display_via_printer!(
    Local,
    Constant,
    Immediate,
    StaticFieldRef,
    InstanceFieldRef,
    ArrayRef,
    ThisRef,
    ParameterRef,
    CaughtExceptionRef,
    ConcreteRef,
    IdentityRef,
    Ref,
    BinaryExpr,
    UnaryExpr,
    CastExpr,
    InstanceOfExpr,
    NewExpr,
    NewArrayExpr,
    InvokeExpr,
    Expr,
    Value,
    LValue,
);
