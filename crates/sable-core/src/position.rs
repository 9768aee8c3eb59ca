use std::fmt;

use serde::{Deserialize, Serialize};

/// Source location attached to every IR statement.
///
/// The core never interprets positions; they are carried through edits so
/// diagnostics produced by later passes can point back at the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StmtPosition {
    pub first_line: u32,
    pub first_col: u32,
    pub last_line: u32,
    pub last_col: u32,
}

impl StmtPosition {
    /// Position of synthesised statements that have no source counterpart.
    pub const NONE: StmtPosition = StmtPosition {
        first_line: 0,
        first_col: 0,
        last_line: 0,
        last_col: 0,
    };

    #[inline]
    pub const fn new(first_line: u32, first_col: u32, last_line: u32, last_col: u32) -> Self {
        Self {
            first_line,
            first_col,
            last_line,
            last_col,
        }
    }

    /// Single-line position covering `first_col..last_col`.
    #[inline]
    pub const fn line(line: u32, first_col: u32, last_col: u32) -> Self {
        Self::new(line, first_col, line, last_col)
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for StmtPosition {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for StmtPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("<no position>");
        }
        write!(
            f,
            "{}:{}-{}:{}",
            self.first_line, self.first_col, self.last_line, self.last_col
        )
    }
}
