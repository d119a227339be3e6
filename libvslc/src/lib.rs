// Copyright 2025-2026 Neil Henderson
//
//! The VSL compiler back-end library.
//!
//! The front end (lexer, parser, name resolution) hands the back end a fully
//! resolved [`symbols::Program`]; [`codegen::generate_program`] lowers it to
//! textual x86-64 assembly for the System V AMD64 ABI, ready to be assembled
//! and linked against the C standard library.

#![doc(html_no_source)]

pub mod ast;
pub mod codegen;
pub mod core;
pub mod symbols;
