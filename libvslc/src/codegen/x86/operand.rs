// Copyright 2025-2026 Neil Henderson
//
//! The `operand` module defines the `Destination` type: the storage location into which
//! an emitted expression must place its value.
//!
//! Every operand that reaches the output goes through the one `Display` formatter here,
//! so a malformed AT&T operand cannot be spelled at an emission site.

use std::fmt;

use super::registers::HwRegister;

/// Where an expression's value must end up.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Destination {
    /// A hardware register.
    Reg(HwRegister),

    /// A byte offset from `%rbp`: negative for the function's own slots, positive for
    /// parameters left above the saved frame pointer by the caller.
    FrameSlot(i32),

    /// A byte offset from `%rsp` inside the outgoing call-argument area.
    StackArg(u32),

    /// A global variable, addressed absolutely by its `.`-prefixed BSS label.
    Global(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Reg(register) => write!(f, "{register}"),
            Destination::FrameSlot(offset) => write!(f, "{offset}(%rbp)"),
            Destination::StackArg(offset) => write!(f, "{offset}(%rsp)"),
            Destination::Global(name) => write!(f, ".{name}"),
        }
    }
}

impl Destination {
    /// Is this destination `%rax`?
    ///
    /// Expression results are computed in `%rax`; a final copy is emitted only when the
    /// caller asked for some other destination.
    pub fn is_rax(&self) -> bool {
        matches!(self, Destination::Reg(HwRegister::RAX))
    }
}
