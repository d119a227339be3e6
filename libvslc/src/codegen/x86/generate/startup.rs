// Copyright 2025-2026 Neil Henderson
//
//! The `startup` module emits the process entry point: `main` validates the argument
//! count, converts each command-line argument with `strtol`, moves the results into the
//! entry function's parameter locations, and hands the return value to `exit`.

use std::io::Write;

use crate::codegen::CodegenError;
use crate::symbols::Function;

use super::super::frame::StackFrame;
use super::super::registers::PARAMETER_REGISTERS;
use super::{Generator, FUNCTION_PREFIX};

/// Emits the runtime `main` that dispatches to `entry`.
pub(super) fn emit_startup<W: Write>(entry: &Function, generator: &mut Generator<W>) -> Result<(), CodegenError> {
    let nparms = entry.nparms();

    generator.writer.write_global_directive("main")?;
    generator.writer.write_label("main")?;
    generator.writer.write_instruction("pushq %rbp")?;
    generator.writer.write_instruction("movq %rsp, %rbp")?;

    let stack_frame = StackFrame::new();

    // argc minus the program name must match the entry function's arity.
    generator.writer.write_instruction("subq $1, %rdi")?;
    generator.writer.write_instruction(&format!("cmpq ${nparms}, %rdi"))?;
    generator.writer.write_instruction("jne ABORT")?;
    generator.writer.write_instruction("cmpq $0, %rdi")?;
    generator.writer.write_instruction("jz SKIP_ARGS")?;

    // Arguments beyond the sixth stay on the stack for the callee, so they must sit at
    // 0(%rsp), 8(%rsp), ... when the call happens. With an odd number of them the
    // alignment padding goes underneath, before anything is pushed.
    let stack_resident = nparms.saturating_sub(6);
    if stack_resident % 2 == 1 {
        stack_frame.allocate_stack(&mut generator.writer, 1)?;
    }

    // Convert the arguments right to left with strtol, pushing each result; the loop
    // leaves them on the stack in argument order, first argument on top.
    generator.writer.write_instruction("movq %rdi, %rcx")?;
    generator.writer.write_instruction(&format!("addq ${}, %rsi", 8 * nparms))?;
    generator.writer.write_label("PARSE_ARGV")?;
    generator.writer.write_instruction("pushq %rcx")?;
    generator.writer.write_instruction("pushq %rsi")?;
    generator.writer.write_instruction("movq (%rsi), %rdi")?;
    generator.writer.write_instruction("movq $0, %rsi")?;
    generator.writer.write_instruction("movq $10, %rdx")?;
    generator.writer.write_instruction("call strtol")?;
    generator.writer.write_instruction("popq %rsi")?;
    generator.writer.write_instruction("popq %rcx")?;
    generator.writer.write_instruction("pushq %rax")?;
    generator.writer.write_instruction("subq $8, %rsi")?;
    generator.writer.write_instruction("loop PARSE_ARGV")?;

    for index in 0..nparms.min(6) {
        generator.writer.write_instruction(&format!("popq {}", PARAMETER_REGISTERS[index]))?;
    }

    stack_frame.record_resident_bytes(8 * stack_resident as u32);

    generator.writer.write_label("SKIP_ARGS")?;

    let padding = stack_frame.align_stack(&mut generator.writer)?;
    generator.writer.write_instruction(&format!("call {FUNCTION_PREFIX}{}", entry.name()))?;
    stack_frame.unalign_stack(&mut generator.writer, padding)?;

    generator.writer.write_instruction("jmp END")?;

    generator.writer.write_label("ABORT")?;
    generator.writer.write_instruction("movq $.errout, %rdi")?;
    generator.writer.write_instruction("call puts")?;

    generator.writer.write_label("END")?;
    generator.writer.write_instruction("movq %rax, %rdi")?;
    generator.writer.write_instruction("call exit")?;

    Ok(())
}
