use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use sable_core::MethodSignature;

use crate::printer::{render, StmtPrinter};
use crate::stmt::Stmt;
use crate::value::{InvokeExpr, Local};

/// Shared handle to a statement with identity semantics.
///
/// Two handles are equal only if they point at the same allocation, so
/// structurally equal statements at different places in a body stay distinct
/// keys in maps and sets.
#[derive(Debug, Clone)]
pub struct StmtRef(Arc<Stmt>);

impl StmtRef {
    pub fn new(stmt: Stmt) -> Self {
        Self(Arc::new(stmt))
    }

    pub fn stmt(&self) -> &Stmt {
        &self.0
    }
}

impl Deref for StmtRef {
    type Target = Stmt;

    fn deref(&self) -> &Stmt {
        &self.0
    }
}

impl PartialEq for StmtRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for StmtRef {}

impl Hash for StmtRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl From<Stmt> for StmtRef {
    fn from(stmt: Stmt) -> Self {
        Self::new(stmt)
    }
}

impl fmt::Display for StmtRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.stmt(), f)
    }
}

/// The statements of one method, in program order.
#[derive(Debug, Clone)]
pub struct Body {
    method: MethodSignature,
    locals: Vec<Local>,
    stmts: Vec<StmtRef>,
}

impl Body {
    pub fn new(
        method: MethodSignature,
        locals: Vec<Local>,
        stmts: impl IntoIterator<Item = Stmt>,
    ) -> Self {
        Self {
            method,
            locals,
            stmts: stmts.into_iter().map(StmtRef::new).collect(),
        }
    }

    pub fn method(&self) -> &MethodSignature {
        &self.method
    }

    pub fn locals(&self) -> &[Local] {
        &self.locals
    }

    pub fn stmts(&self) -> &[StmtRef] {
        &self.stmts
    }

    pub fn index_of(&self, stmt: &StmtRef) -> Option<usize> {
        self.stmts.iter().position(|s| s == stmt)
    }

    /// Every statement carrying an invocation, with that invocation.
    pub fn invoke_sites(&self) -> impl Iterator<Item = (&StmtRef, &InvokeExpr)> + '_ {
        self.stmts
            .iter()
            .filter_map(|stmt| stmt.invoke_expr().ok().map(|invoke| (stmt, invoke)))
    }

    /// Swap `old` for `new`, returning the handle that was removed.
    ///
    /// Lookup is by identity; other holders of `old` keep seeing the old
    /// statement.
    pub fn replace_stmt(&mut self, old: &StmtRef, new: Stmt) -> Option<StmtRef> {
        let idx = self.index_of(old)?;
        Some(std::mem::replace(&mut self.stmts[idx], StmtRef::new(new)))
    }

    pub fn print(&self, printer: &mut dyn StmtPrinter) {
        printer.method_signature(&self.method);
        printer.literal(" {");
        printer.new_line();
        for local in &self.locals {
            printer.literal("    ");
            printer.type_name(local.ty());
            printer.literal(" ");
            printer.local(local);
            printer.literal(";");
            printer.new_line();
        }
        if !self.locals.is_empty() && !self.stmts.is_empty() {
            printer.new_line();
        }
        for stmt in &self.stmts {
            printer.literal("    ");
            stmt.print(printer);
            printer.literal(";");
            printer.new_line();
        }
        printer.literal("}");
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(|p| self.print(p)))
    }
}
