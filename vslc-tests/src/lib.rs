// Copyright 2025-2026 Neil Henderson
//
//! Shared helpers for the back-end integration tests: VSL programs built as in-memory
//! ASTs, an emitted-assembly scanner, and a harness that assembles and runs the
//! generated code through the system C toolchain.

pub mod programs;
pub mod scan;
pub mod toolchain;

use libvslc::codegen::generate_program;
use libvslc::symbols::Program;

/// Generates the assembly text for a program, panicking on any codegen error.
pub fn emit(program: &Program) -> String {
    let mut out = Vec::new();
    generate_program(program, &mut out).expect("code generation failed");

    String::from_utf8(out).expect("generated assembly is not UTF-8")
}
