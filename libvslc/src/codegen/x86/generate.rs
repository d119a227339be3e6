// Copyright 2025-2026 Neil Henderson
//
//! The `generate` module drives x86_64 assembly generation: the read-only string table,
//! the BSS block for globals, every function body, and the process entry point.

mod expression;
mod functions;
mod startup;
mod statement;

use std::cell::Cell;
use std::io::Write;

use crate::codegen::CodegenError;
use crate::symbols::{Function, Program};

use super::frame::StackFrame;
use super::label_maker::{AsmLabelMaker, AsmLabelName};
use super::writer::{AsmSectionDirective, AsmWriter};

/// The assembly-name prefix for every VSL function.
///
/// Prefixing keeps user functions out of the C runtime's namespace; the process entry
/// symbol `main` is the one unprefixed name the generator emits.
pub const FUNCTION_PREFIX: &str = "_func_";

/// Generates the complete assembly text for `program` into `out`.
///
/// Output order is fixed: `.rodata` string table, `.bss` globals, `.text` functions,
/// then the process entry point that converts command-line arguments and dispatches to
/// the program's entry function. Emission is deterministic: the same program always
/// produces byte-identical text.
pub fn generate_program<W: Write>(program: &Program, out: W) -> Result<(), CodegenError> {
    let mut generator = Generator::new(program, out);
    generator.run()
}

/// Program-wide emission state.
pub(super) struct Generator<'a, W: Write> {
    pub(super) program: &'a Program,
    pub(super) writer: AsmWriter<W>,
    pub(super) labels: AsmLabelMaker,
}

/// Per-function state shared by the statement and expression emitters.
///
/// The frame's alignment counter and the returned flag sit behind shared references with
/// interior mutability so the context can be copied freely down the recursive walk; the
/// current node and the value destination travel as call-site arguments instead.
#[derive(Copy, Clone)]
pub(super) struct EmitContext<'a> {
    pub function: &'a Function,
    pub frame: &'a StackFrame,

    /// Set once a `return` has been emitted on this path; later siblings are dead code
    /// and are not emitted.
    pub returned: &'a Cell<bool>,

    /// The innermost enclosing loop's condition-check label, if any. `continue` outside
    /// a loop is an error.
    pub continue_target: Option<&'a AsmLabelName>,
}

impl<'a, W: Write> Generator<'a, W> {
    fn new(program: &'a Program, out: W) -> Self {
        Self { program, writer: AsmWriter::new(out), labels: AsmLabelMaker::new() }
    }

    fn run(&mut self) -> Result<(), CodegenError> {
        let entry = entry_function(self.program).ok_or(CodegenError::MissingEntryFunction)?;

        self.emit_string_table()?;
        self.emit_global_variables()?;
        self.emit_functions()?;
        startup::emit_startup(entry, self)?;

        self.writer.flush()?;

        Ok(())
    }

    /// Emits the `.rodata` section: the four fixed format strings, then one labeled
    /// `.asciz` entry per interned string literal.
    fn emit_string_table(&mut self) -> Result<(), CodegenError> {
        self.writer.write_section_directive(AsmSectionDirective::ReadOnlyData)?;

        self.writer.write_label(".newline")?;
        self.writer.write_asciz_directive("\"\\n\"")?;
        self.writer.write_label(".intout")?;
        self.writer.write_asciz_directive("\"%ld \"")?;
        self.writer.write_label(".strout")?;
        self.writer.write_asciz_directive("\"%s \"")?;
        self.writer.write_label(".errout")?;
        self.writer.write_asciz_directive("\"Wrong number of arguments\"")?;

        for (index, literal) in self.program.strings.iter().enumerate() {
            self.writer.write_label(&format!(".STR{index}"))?;
            self.writer.write_asciz_directive(literal)?;
        }

        Ok(())
    }

    /// Emits the `.bss` section with one `.`-prefixed label per global variable.
    fn emit_global_variables(&mut self) -> Result<(), CodegenError> {
        self.writer.write_section_directive(AsmSectionDirective::Bss)?;
        self.writer.write_align_directive(8)?;

        for symbol in self.program.global_variables() {
            self.writer.write_label(&format!(".{}", symbol.name))?;
        }

        Ok(())
    }

    /// Emits the `.text` section with every function, in declaration order.
    fn emit_functions(&mut self) -> Result<(), CodegenError> {
        self.writer.write_section_directive(AsmSectionDirective::Text)?;

        for function in self.program.functions() {
            functions::emit_function(function, self)?;
        }

        Ok(())
    }
}

/// Selects the program's entry function: the function named `main` if one exists,
/// otherwise the one declared first.
fn entry_function(program: &Program) -> Option<&Function> {
    let mut entry: Option<&Function> = None;

    for function in program.functions() {
        if function.name() == "main" {
            return Some(function);
        }

        if entry.map_or(true, |current| function.seq() < current.seq()) {
            entry = Some(function);
        }
    }

    entry
}
