// Copyright 2025-2026 Neil Henderson
//
//! The `functions` module emits whole VSL functions: prologue, frame allocation,
//! parameter spill, body, and the implicit return.

use std::cell::Cell;
use std::io::Write;

use crate::codegen::CodegenError;
use crate::symbols::Function;

use super::super::frame::{self, StackFrame};
use super::super::registers::PARAMETER_REGISTERS;
use super::statement::emit_block;
use super::{EmitContext, Generator, FUNCTION_PREFIX};

/// Emits one function definition.
pub(super) fn emit_function<W: Write>(function: &Function, generator: &mut Generator<W>) -> Result<(), CodegenError> {
    let asm_name = format!("{FUNCTION_PREFIX}{}", function.name());

    generator.writer.write_global_directive(&asm_name)?;
    generator.writer.write_label(&asm_name)?;

    generator.writer.write_instruction("pushq %rbp")?;
    generator.writer.write_instruction("movq %rsp, %rbp")?;

    // The return address and the saved frame pointer are exactly one 16-byte unit, so
    // the stack is aligned here and the frame counter starts at zero.
    let stack_frame = StackFrame::new();

    let spilled_params = function.nparms().min(6);
    stack_frame.allocate_stack(&mut generator.writer, spilled_params + function.local_variable_count())?;

    // Spill the register parameters in reverse so the last one lands in slot 0, nearest
    // the frame pointer. Parameters beyond the sixth stay in the caller's frame.
    for slot in 0..spilled_params {
        let register = PARAMETER_REGISTERS[spilled_params - slot - 1];
        let offset = frame::slot_offset(slot as i32);
        generator.writer.write_instruction(&format!("movq {register}, {offset}(%rbp)"))?;
    }

    generator.labels.reset_for_new_function();

    let returned = Cell::new(false);
    let ctx = EmitContext { function, frame: &stack_frame, returned: &returned, continue_target: None };
    emit_block(function.body(), ctx, generator)?;

    // A body that never returned falls through to a synthesized `return 0`.
    if !returned.get() {
        generator.writer.write_instruction("movq $0, %rax")?;
        generator.writer.write_instruction("leave")?;
        generator.writer.write_instruction("ret")?;
    }

    Ok(())
}
