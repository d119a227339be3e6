// Copyright 2025-2026 Neil Henderson
//
//! The `frame` module models the activation record: the shadow stack-alignment counter
//! and the mapping from variables to 8-byte frame slots.
//!
//! The counter tracks how many bytes have been pushed beyond the 16-byte-aligned state
//! established by the prologue. Every `call` must be emitted with the counter congruent
//! to 0 (mod 16); the align/unalign pair around each call site maintains that.

use std::cell::Cell;
use std::io::{Result, Write};

use crate::symbols::{Function, Symbol, SymbolKind};
use crate::ICE;

use super::registers::HwRegister;
use super::writer::AsmWriter;

const STACK_ALIGNMENT: u32 = 16;
const SLOT_SIZE: u32 = 8;

/// Compile-time bookkeeping for one function's stack frame.
///
/// The counter lives in a `Cell` so the frame can be shared immutably across the
/// recursive emission walk; the traversal is single-threaded by construction.
#[derive(Debug)]
pub struct StackFrame {
    alignment: Cell<u32>,
}

impl StackFrame {
    /// Creates the frame model for a function whose prologue has just run.
    pub fn new() -> Self {
        Self { alignment: Cell::new(0) }
    }

    /// Bytes currently pushed beyond the aligned post-prologue state, mod 16.
    pub fn misalignment(&self) -> u32 {
        self.alignment.get() % STACK_ALIGNMENT
    }

    /// Reserves `slots` 8-byte cells. Emits nothing when `slots` is zero.
    pub fn allocate_stack<W: Write>(&self, writer: &mut AsmWriter<W>, slots: usize) -> Result<()> {
        if slots == 0 {
            return Ok(());
        }

        let bytes = slots as u32 * SLOT_SIZE;
        self.alignment.set(self.alignment.get() + bytes);
        writer.write_instruction(&format!("subq ${bytes}, %rsp"))
    }

    /// Reserves `slots` 8-byte cells plus whatever padding restores 16-byte alignment,
    /// in a single adjustment. Returns the padding so the caller can reverse it with
    /// [`StackFrame::unalign_stack`] after the call.
    pub fn allocate_aligned_stack<W: Write>(&self, writer: &mut AsmWriter<W>, slots: usize) -> Result<u32> {
        let bytes = slots as u32 * SLOT_SIZE;
        let mut alignment = self.alignment.get() + bytes;

        let padding = if alignment % STACK_ALIGNMENT != 0 { STACK_ALIGNMENT - alignment % STACK_ALIGNMENT } else { 0 };
        alignment += padding;

        if bytes == 0 && padding == 0 {
            return Ok(0);
        }

        self.alignment.set(alignment);
        writer.write_instruction(&format!("subq ${}, %rsp", bytes + padding))?;

        Ok(padding)
    }

    /// Pads the stack to 16-byte alignment without reserving any cells. Returns the
    /// padding (zero when already aligned, in which case nothing is emitted).
    pub fn align_stack<W: Write>(&self, writer: &mut AsmWriter<W>) -> Result<u32> {
        if self.misalignment() == 0 {
            return Ok(0);
        }

        let padding = STACK_ALIGNMENT - self.misalignment();
        self.alignment.set(self.alignment.get() + padding);
        writer.write_instruction(&format!("subq ${padding}, %rsp"))?;

        Ok(padding)
    }

    /// Reverses a previous [`StackFrame::align_stack`] or
    /// [`StackFrame::allocate_aligned_stack`]. No-op when `padding` is zero.
    pub fn unalign_stack<W: Write>(&self, writer: &mut AsmWriter<W>, padding: u32) -> Result<()> {
        if padding == 0 {
            return Ok(());
        }

        writer.write_instruction(&format!("addq ${padding}, %rsp"))?;
        self.alignment.set(self.alignment.get() - padding);

        Ok(())
    }

    /// Emits `pushq` and accounts for it.
    pub fn push<W: Write>(&self, writer: &mut AsmWriter<W>, register: HwRegister) -> Result<()> {
        self.alignment.set(self.alignment.get() + SLOT_SIZE);
        writer.write_instruction(&format!("pushq {register}"))
    }

    /// Emits `popq` and accounts for it.
    pub fn pop<W: Write>(&self, writer: &mut AsmWriter<W>, register: HwRegister) -> Result<()> {
        self.alignment.set(self.alignment.get() - SLOT_SIZE);
        writer.write_instruction(&format!("popq {register}"))
    }

    /// Accounts for bytes that runtime-only pushes will leave on the stack, without
    /// emitting anything. Used by the process entry point, whose argument-conversion
    /// loop pushes a caller-dependent number of words.
    pub fn record_resident_bytes(&self, bytes: u32) {
        self.alignment.set(self.alignment.get() + bytes);
    }
}

/// The frame slot of a parameter or local variable.
///
/// The first six parameters occupy the slots nearest the saved frame pointer, the last
/// parameter closest; locals follow in declaration order. Parameters beyond the sixth
/// never get a slot; they are read where the caller left them (see
/// `variables::variable_operand`).
pub fn variable_slot(function: &Function, symbol: &Symbol) -> i32 {
    let nparms = function.nparms() as i32;
    let seq = symbol.seq as i32;

    match symbol.kind {
        SymbolKind::Parameter => {
            debug_assert!(seq < 6);
            nparms.min(6) - 1 - seq
        }
        SymbolKind::LocalVar => seq + nparms.min(6),
        _ => ICE!("No frame slot for symbol '{}'", symbol.name),
    }
}

/// The `%rbp`-relative byte offset of a frame slot.
pub fn slot_offset(slot: i32) -> i32 {
    -8 * (slot + 1)
}
