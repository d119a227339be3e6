// Copyright 2025-2026 Neil Henderson
//
//! The `registers` module defines the x86_64 hardware registers the fixed emission
//! scheme touches.
//!
//! RAX carries expression results and return values. R10 and R11 are the scratch
//! registers for binary operators and relations. The six parameter registers follow
//! the System V AMD64 integer argument order.

use std::fmt;

/// The 64-bit hardware registers generated code names as operands.
///
/// `%rbp` and `%rsp` appear only inside the fixed prologue/epilogue and memory-operand
/// text, never as value destinations, so they are not represented here.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HwRegister {
    RAX,
    RCX,
    RDX,
    RSI,
    RDI,
    R8,
    R9,
    R10,
    R11,
}

#[rustfmt::skip]
impl fmt::Display for HwRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HwRegister::RAX => write!(f, "%rax"),
            HwRegister::RCX => write!(f, "%rcx"),
            HwRegister::RDX => write!(f, "%rdx"),
            HwRegister::RSI => write!(f, "%rsi"),
            HwRegister::RDI => write!(f, "%rdi"),
            HwRegister::R8  => write!(f, "%r8"),
            HwRegister::R9  => write!(f, "%r9"),
            HwRegister::R10 => write!(f, "%r10"),
            HwRegister::R11 => write!(f, "%r11"),
        }
    }
}

/// The integer argument registers, in System V AMD64 order.
pub const PARAMETER_REGISTERS: [HwRegister; 6] = [
    HwRegister::RDI,
    HwRegister::RSI,
    HwRegister::RDX,
    HwRegister::RCX,
    HwRegister::R8,
    HwRegister::R9,
];
