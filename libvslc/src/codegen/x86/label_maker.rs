// Copyright 2025-2026 Neil Henderson
//
//! The `label_maker` module defines the `AsmLabelMaker` type which hands out the
//! per-function mangle indices that keep control-flow labels unique, plus the label
//! formatters themselves.

use std::fmt;

use crate::ICE;

/// The name of an assembler label, without the trailing colon.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AsmLabelName(pub String);

impl AsmLabelName {
    /// The label text, for the writer.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AsmLabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out monotone mangle indices within the current function.
///
/// An index is claimed when a control structure starts emitting, so a structure and its
/// first nested child can never share one.
#[derive(Debug)]
pub struct AsmLabelMaker {
    next_index: usize,
}

impl AsmLabelMaker {
    /// Creates a new label maker.
    pub fn new() -> Self {
        Self { next_index: 0 }
    }

    /// Resets the mangle counter for a new function.
    pub fn reset_for_new_function(&mut self) {
        self.next_index = 0;
    }

    /// Claims the next mangle index for one control structure.
    pub fn claim_index(&mut self) -> usize {
        if self.next_index == usize::MAX {
            ICE!("Exhausted AsmLabelMaker indices for function");
        }

        let index = self.next_index;
        self.next_index += 1;
        index
    }
}

/// The jump target that skips an `if` statement's then-branch into its else-branch.
pub fn else_label(function: &str, index: usize) -> AsmLabelName {
    AsmLabelName(format!("._{function}_ELSE_{index}"))
}

/// The join point after an `if` statement.
pub fn end_if_label(function: &str, index: usize) -> AsmLabelName {
    AsmLabelName(format!("._{function}_ENDIF_{index}"))
}

/// A `while` loop's condition re-check point; also the target of `continue`.
pub fn while_check_label(function: &str, index: usize) -> AsmLabelName {
    AsmLabelName(format!("._{function}_WCHECK_{index}"))
}

/// The exit point of a `while` loop.
pub fn while_end_label(function: &str, index: usize) -> AsmLabelName {
    AsmLabelName(format!("._{function}_WEND_{index}"))
}
