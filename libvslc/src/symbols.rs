// Copyright 2025-2026 Neil Henderson
//
//! The `symbols` module defines the resolved symbol-table view that the front end hands
//! to the code generator.
//!
//! The generator consumes these types; it never builds them from source text. Symbols are
//! shared by reference ([`SymbolRef`]) because the AST carries back-references into the
//! table. The traversal is single-threaded and the table is immutable for the lifetime of
//! a program, so `Rc` is sufficient.

use std::rc::Rc;

use crate::ast::Block;

/// The kind of a resolved symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SymbolKind {
    GlobalVar,
    LocalVar,
    Parameter,
    Function,
}

/// A named entity produced by name resolution.
///
/// `seq` is the declaration order within the symbol's scope: parameters and local
/// variables are numbered by separate zero-based sequences per function; functions and
/// global variables share one program-wide sequence.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub seq: usize,

    /// Number of declared parameters. Only meaningful for `SymbolKind::Function`.
    pub nparms: usize,
}

/// A shared reference to a symbol, as stored in AST back-references.
pub type SymbolRef = Rc<Symbol>;

impl Symbol {
    /// Creates a global variable symbol.
    pub fn global_var(name: &str, seq: usize) -> SymbolRef {
        Rc::new(Self { name: name.to_string(), kind: SymbolKind::GlobalVar, seq, nparms: 0 })
    }

    /// Creates a local variable symbol. `seq` counts locals only, starting at zero.
    pub fn local_var(name: &str, seq: usize) -> SymbolRef {
        Rc::new(Self { name: name.to_string(), kind: SymbolKind::LocalVar, seq, nparms: 0 })
    }

    /// Creates a parameter symbol. `seq` counts parameters only, starting at zero.
    pub fn parameter(name: &str, seq: usize) -> SymbolRef {
        Rc::new(Self { name: name.to_string(), kind: SymbolKind::Parameter, seq, nparms: 0 })
    }

    /// Creates a function symbol with the given arity.
    pub fn function(name: &str, seq: usize, nparms: usize) -> SymbolRef {
        Rc::new(Self { name: name.to_string(), kind: SymbolKind::Function, seq, nparms })
    }
}

/// A function definition: its symbol, the values view of its scope, and its body.
#[derive(Debug, Clone)]
pub struct Function {
    symbol: SymbolRef,
    locals: Vec<SymbolRef>,
    body: Block,
}

impl Function {
    /// Creates a function definition.
    ///
    /// `locals` is the declaration-ordered values view of the function's name→symbol
    /// scope mapping and covers both parameters and local variables.
    pub fn new(symbol: SymbolRef, locals: Vec<SymbolRef>, body: Block) -> Self {
        debug_assert!(symbol.kind == SymbolKind::Function);
        debug_assert!(locals.iter().filter(|sym| sym.kind == SymbolKind::Parameter).count() == symbol.nparms);

        Self { symbol, locals, body }
    }

    /// The function's symbol.
    pub fn symbol(&self) -> &SymbolRef {
        &self.symbol
    }

    /// The function's declared name, without any assembly prefix.
    pub fn name(&self) -> &str {
        &self.symbol.name
    }

    /// The function's program-wide declaration sequence number.
    pub fn seq(&self) -> usize {
        self.symbol.seq
    }

    /// The number of declared parameters.
    pub fn nparms(&self) -> usize {
        self.symbol.nparms
    }

    /// Parameters and local variables, in declaration order.
    pub fn locals(&self) -> &[SymbolRef] {
        &self.locals
    }

    /// The number of local variables, excluding parameters.
    pub fn local_variable_count(&self) -> usize {
        self.locals.len() - self.symbol.nparms
    }

    /// The function body.
    pub fn body(&self) -> &Block {
        &self.body
    }
}

/// A file-scope entry: a global variable or a function definition.
#[derive(Debug, Clone)]
pub enum GlobalEntry {
    Variable(SymbolRef),
    Function(Function),
}

/// A fully resolved program: the file-scope symbols in declaration order, plus the
/// interned string table.
///
/// Each string-table entry retains its surrounding double quotes and escape syntax,
/// ready to be emitted after an `.asciz` directive. A string's index is its identity.
#[derive(Debug, Clone)]
pub struct Program {
    pub globals: Vec<GlobalEntry>,
    pub strings: Vec<String>,
}

impl Program {
    /// Creates a program from its file-scope entries and string table.
    pub fn new(globals: Vec<GlobalEntry>, strings: Vec<String>) -> Self {
        Self { globals, strings }
    }

    /// The program's function definitions, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.globals.iter().filter_map(|entry| match entry {
            GlobalEntry::Function(function) => Some(function),
            GlobalEntry::Variable(_) => None,
        })
    }

    /// The program's global variables, in declaration order.
    pub fn global_variables(&self) -> impl Iterator<Item = &SymbolRef> {
        self.globals.iter().filter_map(|entry| match entry {
            GlobalEntry::Variable(symbol) => Some(symbol),
            GlobalEntry::Function(_) => None,
        })
    }
}
