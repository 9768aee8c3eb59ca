use sable_core::{FieldSignature, MethodSignature, Type};

use crate::value::{Constant, Local};

/// Sink for the textual form of IR nodes.
///
/// Nodes describe themselves as a sequence of typed fragments; printers decide
/// how each fragment is rendered (plain text, with short type names, with
/// markup for an editor, ...). Only [`StmtPrinter::literal`] is required.
pub trait StmtPrinter {
    fn literal(&mut self, text: &str);

    fn local(&mut self, local: &Local) {
        self.literal(local.name());
    }

    fn constant(&mut self, constant: &Constant) {
        self.literal(&constant.render());
    }

    fn type_name(&mut self, ty: &Type) {
        self.literal(&ty.to_string());
    }

    fn method_signature(&mut self, signature: &MethodSignature) {
        self.literal(&signature.to_string());
    }

    fn field_signature(&mut self, signature: &FieldSignature) {
        self.literal(&signature.to_string());
    }

    fn new_line(&mut self) {
        self.literal("\n");
    }
}

/// Collects printed fragments into a `String`.
///
/// `Display` for every IR node is implemented on top of this printer, so the
/// debug text and the printed text never diverge.
#[derive(Debug, Default, Clone)]
pub struct PlainStmtPrinter {
    out: String,
}

impl PlainStmtPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl StmtPrinter for PlainStmtPrinter {
    fn literal(&mut self, text: &str) {
        self.out.push_str(text);
    }
}

/// Render any printable node through a fresh [`PlainStmtPrinter`].
pub(crate) fn render(print: impl FnOnce(&mut dyn StmtPrinter)) -> String {
    let mut printer = PlainStmtPrinter::new();
    print(&mut printer);
    printer.finish()
}
