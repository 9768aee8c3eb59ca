use sable_core::MethodSignature;

pub type Result<T> = std::result::Result<T, IrError>;

/// Contract violations raised while constructing or querying IR nodes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    #[error("illegal assignment statement: right hand side `{operand}` is not a valid operand")]
    IllegalAssignmentOperand { operand: String },

    #[error("illegal identity statement: right hand side `{operand}` is not an identity reference")]
    IllegalIdentityOperand { operand: String },

    #[error("invoke_expr() called with no invoke expression present in `{stmt}`")]
    MissingInvokeExpr { stmt: String },

    #[error("array_ref() called with no array reference present in `{stmt}`")]
    MissingArrayRef { stmt: String },

    #[error("field_ref() called with no field reference present in `{stmt}`")]
    MissingFieldRef { stmt: String },

    #[error("{kind} invocation of {method} {problem}")]
    InvalidInvokeBase {
        kind: &'static str,
        method: MethodSignature,
        problem: &'static str,
    },

    #[error("if statement condition `{condition}` is not a comparison")]
    InvalidCondition { condition: String },
}
