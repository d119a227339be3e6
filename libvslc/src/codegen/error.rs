// Copyright 2025-2026 Neil Henderson
//
//! The `error` module defines the errors surfaced by the code generator.

use std::io;

use thiserror::Error;

/// An error produced while generating assembly.
///
/// All variants other than `Io` are properties of the input program that the earlier
/// passes are trusted not to produce; they are reported rather than silently
/// miscompiled. Drivers print the rendered message and exit with a non-zero status.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("wrong number of arguments for call to '{callee}' in '{caller}'")]
    ArgumentCountMismatch { callee: String, caller: String },

    #[error("unsupported symbol kind for identifier '{name}'")]
    UnsupportedSymbol { name: String },

    #[error("continue outside of a loop in '{function}'")]
    ContinueOutsideLoop { function: String },

    #[error("program has no function to use as the entry point")]
    MissingEntryFunction,

    #[error(transparent)]
    Io(#[from] io::Error),
}
