// Copyright 2025-2026 Neil Henderson
//
//! The `expression` module emits arithmetic, bitwise, unary, and function-call
//! expressions into a caller-chosen destination.

use std::io::Write;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::codegen::CodegenError;
use crate::symbols::SymbolRef;

use super::super::operand::Destination;
use super::super::registers::{HwRegister, PARAMETER_REGISTERS};
use super::super::variables;
use super::{EmitContext, Generator, FUNCTION_PREFIX};

/// Emits `expr` so that its value ends up at `destination`.
pub(super) fn emit_expression<W: Write>(
    expr: &Expr,
    destination: &Destination,
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    match expr {
        Expr::Number(value) => {
            generator.writer.write_instruction(&format!("movq ${value}, {destination}"))?;
            Ok(())
        }

        Expr::Identifier(symbol) => {
            variables::load_variable_into(&mut generator.writer, ctx.function, destination, symbol)
        }

        Expr::Unary { op, operand } => {
            // The operand is built in place and the operator applied there; both negq
            // and notq accept a memory operand.
            emit_expression(operand, destination, ctx, generator)?;

            let mnemonic = match op {
                UnaryOp::Negate => "negq",
                UnaryOp::BitNot => "notq",
            };
            generator.writer.write_instruction(&format!("{mnemonic} {destination}"))?;

            Ok(())
        }

        Expr::Binary { op, lhs, rhs } => {
            emit_binary(*op, lhs, rhs, destination, ctx, generator)
        }

        Expr::Call { callee, args } => {
            emit_function_call(callee, args, ctx, generator)?;
            copy_rax_to(destination, generator)
        }
    }
}

/// Emits a binary expression. The right operand is computed first and parked on the
/// stack while the left is computed, so the operator always sees the left value in
/// `%rax` and the right in `%r10`.
fn emit_binary<W: Write>(
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    destination: &Destination,
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    let rax = Destination::Reg(HwRegister::RAX);

    emit_expression(rhs, &rax, ctx, generator)?;
    ctx.frame.push(&mut generator.writer, HwRegister::RAX)?;

    emit_expression(lhs, &rax, ctx, generator)?;
    ctx.frame.pop(&mut generator.writer, HwRegister::R10)?;

    match op {
        BinaryOp::Or => generator.writer.write_instruction("or %r10, %rax")?,
        BinaryOp::Xor => generator.writer.write_instruction("xor %r10, %rax")?,
        BinaryOp::And => generator.writer.write_instruction("and %r10, %rax")?,
        BinaryOp::Add => generator.writer.write_instruction("addq %r10, %rax")?,
        BinaryOp::Subtract => generator.writer.write_instruction("subq %r10, %rax")?,
        BinaryOp::Multiply => generator.writer.write_instruction("imulq %r10")?,
        BinaryOp::Divide => {
            // idivq divides %rdx:%rax; sign-extend first or negative dividends are UB.
            generator.writer.write_instruction("cqto")?;
            generator.writer.write_instruction("idivq %r10")?;
        }
    }

    copy_rax_to(destination, generator)
}

/// Emits a call to a VSL function, leaving the return value in `%rax`.
///
/// Arguments are written straight into their final call-site locations (the six
/// argument registers, then `(i-6)*8(%rsp)`), so a scalar argument is materialized in
/// one instruction instead of a push/pop pair. The argument area plus any alignment
/// padding is reserved beforehand so the stack is 16-byte aligned at the `call`.
fn emit_function_call<W: Write>(
    callee: &SymbolRef,
    args: &[Expr],
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    if args.len() != callee.nparms {
        return Err(CodegenError::ArgumentCountMismatch {
            callee: callee.name.clone(),
            caller: ctx.function.name().to_string(),
        });
    }

    let stack_args = callee.nparms.saturating_sub(6);
    let padding = ctx.frame.allocate_aligned_stack(&mut generator.writer, stack_args)?;

    for (index, arg) in args.iter().enumerate() {
        emit_expression(arg, &argument_accessor(index), ctx, generator)?;
    }

    generator.writer.write_instruction(&format!("call {FUNCTION_PREFIX}{}", callee.name))?;
    ctx.frame.unalign_stack(&mut generator.writer, padding)?;

    Ok(())
}

/// The call-site location of argument `index`.
fn argument_accessor(index: usize) -> Destination {
    if index < 6 {
        Destination::Reg(PARAMETER_REGISTERS[index])
    } else {
        Destination::StackArg((index as u32 - 6) * 8)
    }
}

/// Copies an expression result out of `%rax`, unless `%rax` is where it belongs.
fn copy_rax_to<W: Write>(destination: &Destination, generator: &mut Generator<W>) -> Result<(), CodegenError> {
    if !destination.is_rax() {
        generator.writer.write_instruction(&format!("movq %rax, {destination}"))?;
    }

    Ok(())
}
