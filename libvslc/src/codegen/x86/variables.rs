// Copyright 2025-2026 Neil Henderson
//
//! The `variables` module translates symbol references into moves against their storage
//! locations: a BSS label for globals, a frame slot for locals and spilled parameters,
//! or the caller's frame for parameters passed on the stack.

use std::io::Write;

use crate::codegen::CodegenError;
use crate::symbols::{Function, Symbol, SymbolKind};

use super::frame;
use super::operand::Destination;
use super::registers::HwRegister;
use super::writer::AsmWriter;

/// Byte offset from `%rbp` to the first caller-resident parameter (above the saved
/// frame pointer and the return address).
const CALLER_FRAME_OFFSET: i32 = 16;

/// The storage location of a variable, parameter, or global.
///
/// A function symbol (or any other non-variable kind) has no value to read or write.
pub fn variable_operand(function: &Function, symbol: &Symbol) -> Result<Destination, CodegenError> {
    match symbol.kind {
        SymbolKind::GlobalVar => Ok(Destination::Global(symbol.name.clone())),

        // Parameters beyond the sixth stay where the caller pushed them.
        SymbolKind::Parameter if symbol.seq >= 6 => {
            Ok(Destination::FrameSlot(CALLER_FRAME_OFFSET + 8 * (symbol.seq as i32 - 6)))
        }

        SymbolKind::Parameter | SymbolKind::LocalVar => {
            Ok(Destination::FrameSlot(frame::slot_offset(frame::variable_slot(function, symbol))))
        }

        SymbolKind::Function => Err(CodegenError::UnsupportedSymbol { name: symbol.name.clone() }),
    }
}

/// Emits the one instruction that loads a variable's value into a register.
pub fn load_variable<W: Write>(
    writer: &mut AsmWriter<W>,
    function: &Function,
    register: HwRegister,
    symbol: &Symbol,
) -> Result<(), CodegenError> {
    let location = variable_operand(function, symbol)?;
    writer.write_instruction(&format!("movq {location}, {register}"))?;

    Ok(())
}

/// Emits the one instruction that stores a register into a variable's location.
pub fn store_variable<W: Write>(
    writer: &mut AsmWriter<W>,
    function: &Function,
    register: HwRegister,
    symbol: &Symbol,
) -> Result<(), CodegenError> {
    let location = variable_operand(function, symbol)?;
    writer.write_instruction(&format!("movq {register}, {location}"))?;

    Ok(())
}

/// Loads a variable's value into an arbitrary destination.
///
/// A register destination takes the single-instruction path. A memory destination is
/// staged through `%rax`, since no x86-64 move takes two memory operands; `%rax` is dead
/// at every site that asks for a memory destination.
pub fn load_variable_into<W: Write>(
    writer: &mut AsmWriter<W>,
    function: &Function,
    destination: &Destination,
    symbol: &Symbol,
) -> Result<(), CodegenError> {
    match destination {
        Destination::Reg(register) => load_variable(writer, function, *register, symbol),

        _ => {
            load_variable(writer, function, HwRegister::RAX, symbol)?;
            writer.write_instruction(&format!("movq %rax, {destination}"))?;

            Ok(())
        }
    }
}
