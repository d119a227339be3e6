// Copyright 2025-2026 Neil Henderson
//
//! The `statement` module emits assignments, prints, returns, control flow, and block
//! walks, driving the expression emitter recursively.

use std::cell::Cell;
use std::io::Write;

use crate::ast::{ArithmeticOp, Block, BlockItem, PrintItem, Relation, RelationOp, Stmt};
use crate::codegen::CodegenError;

use super::super::label_maker;
use super::super::operand::Destination;
use super::super::registers::HwRegister;
use super::super::variables;
use super::expression::emit_expression;
use super::{EmitContext, Generator};

/// Emits one statement.
pub(super) fn emit_statement<W: Write>(
    stmt: &Stmt,
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    match stmt {
        Stmt::Block(block) => emit_block(block, ctx, generator),

        Stmt::Assign { target, value } => {
            // The value is built directly in the variable's location; only results that
            // pass through %rax (calls, binary operators) cost an extra move.
            let location = variables::variable_operand(ctx.function, target)?;
            emit_expression(value, &location, ctx, generator)
        }

        Stmt::Compound { op, target, value } => {
            emit_expression(value, &Destination::Reg(HwRegister::R10), ctx, generator)?;
            variables::load_variable(&mut generator.writer, ctx.function, HwRegister::RAX, target)?;

            match op {
                ArithmeticOp::Add => generator.writer.write_instruction("addq %r10, %rax")?,
                ArithmeticOp::Subtract => generator.writer.write_instruction("subq %r10, %rax")?,
                ArithmeticOp::Multiply => generator.writer.write_instruction("imulq %r10")?,
                ArithmeticOp::Divide => {
                    generator.writer.write_instruction("cqto")?;
                    generator.writer.write_instruction("idivq %r10")?;
                }
            }

            variables::store_variable(&mut generator.writer, ctx.function, HwRegister::RAX, target)
        }

        Stmt::Print(items) => emit_print(items, ctx, generator),

        Stmt::Return(value) => {
            ctx.returned.set(true);
            emit_expression(value, &Destination::Reg(HwRegister::RAX), ctx, generator)?;
            generator.writer.write_instruction("leave")?;
            generator.writer.write_instruction("ret")?;

            Ok(())
        }

        Stmt::If { condition, then_body, else_body } => {
            emit_if(condition, then_body, else_body.as_deref(), ctx, generator)
        }

        Stmt::While { condition, body } => emit_while(condition, body, ctx, generator),

        Stmt::Continue => match ctx.continue_target {
            Some(target) => {
                generator.writer.write_instruction(&format!("jmp {target}"))?;
                Ok(())
            }
            None => Err(CodegenError::ContinueOutsideLoop { function: ctx.function.name().to_string() }),
        },
    }
}

/// Walks a block's statements in order, skipping declarations. Emission stops at the
/// first statement that returns: everything after it on this path is dead.
pub(super) fn emit_block<W: Write>(
    block: &Block,
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    if ctx.returned.get() {
        return Ok(());
    }

    for item in &block.0 {
        let BlockItem::Statement(stmt) = item else {
            continue;
        };

        emit_statement(stmt, ctx, generator)?;

        if ctx.returned.get() {
            break;
        }
    }

    Ok(())
}

fn emit_if<W: Write>(
    condition: &Relation,
    then_body: &Stmt,
    else_body: Option<&Stmt>,
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    emit_relation(condition, ctx, generator)?;

    let index = generator.labels.claim_index();
    let function = ctx.function.name();
    let end_label = label_maker::end_if_label(function, index);
    let skip_label = if else_body.is_some() { label_maker::else_label(function, index) } else { end_label.clone() };

    generator.writer.write_instruction(&format!("{} {skip_label}", skip_jump(condition.op)))?;

    // Each branch gets its own returned flag: a return inside one branch must not
    // suppress the other branch or the statements after the join point, which stay
    // reachable.
    let then_returned = Cell::new(false);
    emit_statement(then_body, EmitContext { returned: &then_returned, ..ctx }, generator)?;

    if let Some(else_body) = else_body {
        generator.writer.write_instruction(&format!("jmp {end_label}"))?;
        generator.writer.write_label(skip_label.as_str())?;

        let else_returned = Cell::new(false);
        emit_statement(else_body, EmitContext { returned: &else_returned, ..ctx }, generator)?;
    }

    generator.writer.write_label(end_label.as_str())?;

    Ok(())
}

fn emit_while<W: Write>(
    condition: &Relation,
    body: &Stmt,
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    let index = generator.labels.claim_index();
    let function = ctx.function.name();
    let check_label = label_maker::while_check_label(function, index);
    let end_label = label_maker::while_end_label(function, index);

    generator.writer.write_label(check_label.as_str())?;
    emit_relation(condition, ctx, generator)?;
    generator.writer.write_instruction(&format!("{} {end_label}", skip_jump(condition.op)))?;

    let body_returned = Cell::new(false);
    let body_ctx = EmitContext { returned: &body_returned, continue_target: Some(&check_label), ..ctx };
    emit_statement(body, body_ctx, generator)?;

    generator.writer.write_instruction(&format!("jmp {check_label}"))?;
    generator.writer.write_label(end_label.as_str())?;

    Ok(())
}

/// Emits a relation, leaving the flags set for the inverse jump that skips the guarded
/// body. The left operand ends up in `%r10` and the right in `%r11`.
fn emit_relation<W: Write>(
    relation: &Relation,
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    emit_expression(&relation.lhs, &Destination::Reg(HwRegister::RAX), ctx, generator)?;
    ctx.frame.push(&mut generator.writer, HwRegister::RAX)?;

    emit_expression(&relation.rhs, &Destination::Reg(HwRegister::R11), ctx, generator)?;
    ctx.frame.pop(&mut generator.writer, HwRegister::R10)?;

    generator.writer.write_instruction("cmp %r11, %r10")?;

    Ok(())
}

/// The conditional jump that skips the guarded body when the relation does not hold.
fn skip_jump(op: RelationOp) -> &'static str {
    match op {
        RelationOp::Equal => "jne",
        RelationOp::Greater => "jng",
        RelationOp::Less => "jnl",
    }
}

/// Emits a `print` statement: one aligned `printf` call per item, then the newline.
///
/// Alignment is re-checked for every call because the expression items may have pushed
/// and popped in between.
fn emit_print<W: Write>(
    items: &[PrintItem],
    ctx: EmitContext,
    generator: &mut Generator<W>,
) -> Result<(), CodegenError> {
    for item in items {
        match item {
            PrintItem::StringLiteral(index) => {
                generator.writer.write_instruction("movq $.strout, %rdi")?;
                generator.writer.write_instruction(&format!("movq $.STR{index}, %rsi"))?;
            }

            PrintItem::Identifier(symbol) => {
                generator.writer.write_instruction("movq $.intout, %rdi")?;
                variables::load_variable(&mut generator.writer, ctx.function, HwRegister::RSI, symbol)?;
            }

            PrintItem::Expr(expr) => {
                // The expression may itself contain a call that clobbers %rdi, so the
                // format-string argument is loaded after the value is in place.
                emit_expression(expr, &Destination::Reg(HwRegister::RSI), ctx, generator)?;
                generator.writer.write_instruction("movq $.intout, %rdi")?;
            }
        }

        emit_aligned_printf_call(ctx, generator)?;
    }

    generator.writer.write_instruction("movq $.newline, %rdi")?;
    emit_aligned_printf_call(ctx, generator)?;

    Ok(())
}

fn emit_aligned_printf_call<W: Write>(ctx: EmitContext, generator: &mut Generator<W>) -> Result<(), CodegenError> {
    let padding = ctx.frame.align_stack(&mut generator.writer)?;
    generator.writer.write_instruction("call printf")?;
    ctx.frame.unalign_stack(&mut generator.writer, padding)?;

    Ok(())
}
