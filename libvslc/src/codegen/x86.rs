// Copyright 2025-2026 Neil Henderson
//
//! The `x86` module contains the codegen functionality for the `x86_64` System V ABI.

mod frame;
mod generate;
mod label_maker;
mod operand;
mod registers;
mod variables;
mod writer;

#[cfg(test)]
mod tests;

pub use generate::{generate_program, FUNCTION_PREFIX};
