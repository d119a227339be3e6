// Copyright 2025-2026 Neil Henderson
//
//! The codegen module lowers a resolved VSL program to textual x86-64 assembly for the
//! System V AMD64 ABI and writes it to a caller-supplied sink.
//! In the future, we'll add other targets such as Arm64.

mod error;
mod x86;

pub use error::CodegenError;
pub use x86::{generate_program, FUNCTION_PREFIX};
