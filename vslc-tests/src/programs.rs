// Copyright 2025-2026 Neil Henderson
//
//! VSL test programs, built the way the front end would hand them to the back end:
//! resolved symbols, interned strings, and typed ASTs.

use libvslc::ast::{
    ArithmeticOp, BinaryOp, Block, BlockItem, Expr, PrintItem, Relation, RelationOp, Stmt,
};
use libvslc::symbols::{Function, GlobalEntry, Program, Symbol, SymbolRef};

fn statements(stmts: Vec<Stmt>) -> Block {
    Block(stmts.into_iter().map(BlockItem::Statement).collect())
}

/// `func f(n) { return n }`
pub fn identity() -> Program {
    let n = Symbol::parameter("n", 0);

    let body = statements(vec![Stmt::Return(Expr::ident(&n))]);
    let f = Function::new(Symbol::function("f", 0, 1), vec![n], body);

    Program::new(vec![GlobalEntry::Function(f)], Vec::new())
}

/// A countdown loop: prints ten verses and returns 0.
///
/// ```text
/// func main() {
///     var b
///     b := 10
///     while b > 0 {
///         print "Bottles:", b
///         b -= 1
///     }
///     return 0
/// }
/// ```
pub fn bottles() -> Program {
    let b = Symbol::local_var("b", 0);

    let verse = Stmt::Print(vec![PrintItem::StringLiteral(0), PrintItem::Identifier(b.clone())]);
    let decrement = Stmt::Compound { op: ArithmeticOp::Subtract, target: b.clone(), value: Expr::Number(1) };

    let body = Block(vec![
        BlockItem::Declaration(b.clone()),
        BlockItem::Statement(Stmt::Assign { target: b.clone(), value: Expr::Number(10) }),
        BlockItem::Statement(Stmt::While {
            condition: Relation::new(RelationOp::Greater, Expr::ident(&b), Expr::Number(0)),
            body: Box::new(Stmt::Block(statements(vec![verse, decrement]))),
        }),
        BlockItem::Statement(Stmt::Return(Expr::Number(0))),
    ]);

    let main = Function::new(Symbol::function("main", 0, 0), vec![b], body);

    Program::new(vec![GlobalEntry::Function(main)], vec!["\"Bottles:\"".to_string()])
}

/// The stdout the bottles program must produce.
pub fn bottles_expected_output() -> String {
    (1..=10).rev().map(|verse| format!("Bottles: {verse} \n")).collect()
}

/// An entry function with two parameters, for exercising the argument-count check in
/// the generated startup code.
pub fn two_parameter_entry() -> Program {
    let a = Symbol::parameter("a", 0);
    let b = Symbol::parameter("b", 1);

    let body = statements(vec![Stmt::Return(Expr::binary(BinaryOp::Add, Expr::ident(&a), Expr::ident(&b)))]);
    let f = Function::new(Symbol::function("f", 0, 2), vec![a, b], body);

    Program::new(vec![GlobalEntry::Function(f)], Vec::new())
}

/// `func f(a,b,c,d,e,f,g,h) { return ((a+b)*(c-d) + (e|f)) ^ (g&h) }`
///
/// Eight parameters cross the register/stack argument boundary: `g` and `h` are read
/// from the caller's frame.
pub fn deep_arithmetic() -> Program {
    let params: Vec<SymbolRef> = ["a", "b", "c", "d", "e", "f", "g", "h"]
        .iter()
        .enumerate()
        .map(|(seq, name)| Symbol::parameter(name, seq))
        .collect();

    let product = Expr::binary(
        BinaryOp::Multiply,
        Expr::binary(BinaryOp::Add, Expr::ident(&params[0]), Expr::ident(&params[1])),
        Expr::binary(BinaryOp::Subtract, Expr::ident(&params[2]), Expr::ident(&params[3])),
    );
    let sum = Expr::binary(
        BinaryOp::Add,
        product,
        Expr::binary(BinaryOp::Or, Expr::ident(&params[4]), Expr::ident(&params[5])),
    );
    let value = Expr::binary(
        BinaryOp::Xor,
        sum,
        Expr::binary(BinaryOp::And, Expr::ident(&params[6]), Expr::ident(&params[7])),
    );

    let body = statements(vec![Stmt::Return(value)]);
    let f = Function::new(Symbol::function("f", 0, 8), params, body);

    Program::new(vec![GlobalEntry::Function(f)], Vec::new())
}

/// The value the deep-arithmetic program computes for arguments 1..=8.
pub const DEEP_ARITHMETIC_RESULT: i64 = ((1 + 2) * (3 - 4) + (5 | 6)) ^ (7 & 8);

/// Nested `while` loops with a `continue` that targets the innermost loop.
///
/// ```text
/// func f() {
///     var i, j
///     i := 0
///     while i < 3 {
///         i += 1
///         j := 0
///         while j < 2 {
///             j += 1
///             if j = 1 { continue }
///             print "inner", i, j
///         }
///     }
///     return i
/// }
/// ```
pub fn nested_loops() -> Program {
    let i = Symbol::local_var("i", 0);
    let j = Symbol::local_var("j", 1);

    let inner_body = Stmt::Block(statements(vec![
        Stmt::Compound { op: ArithmeticOp::Add, target: j.clone(), value: Expr::Number(1) },
        Stmt::If {
            condition: Relation::new(RelationOp::Equal, Expr::ident(&j), Expr::Number(1)),
            then_body: Box::new(Stmt::Continue),
            else_body: None,
        },
        Stmt::Print(vec![
            PrintItem::StringLiteral(0),
            PrintItem::Identifier(i.clone()),
            PrintItem::Identifier(j.clone()),
        ]),
    ]));

    let outer_body = Stmt::Block(statements(vec![
        Stmt::Compound { op: ArithmeticOp::Add, target: i.clone(), value: Expr::Number(1) },
        Stmt::Assign { target: j.clone(), value: Expr::Number(0) },
        Stmt::While {
            condition: Relation::new(RelationOp::Less, Expr::ident(&j), Expr::Number(2)),
            body: Box::new(inner_body),
        },
    ]));

    let body = Block(vec![
        BlockItem::Declaration(i.clone()),
        BlockItem::Declaration(j.clone()),
        BlockItem::Statement(Stmt::Assign { target: i.clone(), value: Expr::Number(0) }),
        BlockItem::Statement(Stmt::While {
            condition: Relation::new(RelationOp::Less, Expr::ident(&i), Expr::Number(3)),
            body: Box::new(outer_body),
        }),
        BlockItem::Statement(Stmt::Return(Expr::ident(&i))),
    ]);

    let f = Function::new(Symbol::function("f", 0, 0), vec![i, j], body);

    Program::new(vec![GlobalEntry::Function(f)], vec!["\"inner\"".to_string()])
}

/// The stdout the nested-loops program must produce: the inner loop prints only its
/// second iteration, the first being skipped by `continue`.
pub fn nested_loops_expected_output() -> String {
    (1..=3).map(|outer| format!("inner {outer} 2 \n")).collect()
}

/// `print "hello", n, n+1` with `n := 3`.
pub fn print_mix() -> Program {
    let n = Symbol::local_var("n", 0);

    let body = Block(vec![
        BlockItem::Declaration(n.clone()),
        BlockItem::Statement(Stmt::Assign { target: n.clone(), value: Expr::Number(3) }),
        BlockItem::Statement(Stmt::Print(vec![
            PrintItem::StringLiteral(0),
            PrintItem::Identifier(n.clone()),
            PrintItem::Expr(Expr::binary(BinaryOp::Add, Expr::ident(&n), Expr::Number(1))),
        ])),
        BlockItem::Statement(Stmt::Return(Expr::Number(0))),
    ]);

    let main = Function::new(Symbol::function("main", 0, 0), vec![n], body);

    Program::new(vec![GlobalEntry::Function(main)], vec!["\"hello\"".to_string()])
}

/// A two-function program whose entry calls a seven-parameter worker, exercising the
/// stack-argument accessor on the caller side and the caller-frame reads on the callee
/// side.
///
/// ```text
/// func sum7(a,b,c,d,e,f,g) { return a+b+c+d+e+f+g }
/// func main() { return sum7(1,2,3,4,5,6,7) }
/// ```
pub fn seven_argument_call() -> Program {
    let params: Vec<SymbolRef> = ["a", "b", "c", "d", "e", "f", "g"]
        .iter()
        .enumerate()
        .map(|(seq, name)| Symbol::parameter(name, seq))
        .collect();

    let mut value = Expr::ident(&params[0]);
    for param in &params[1..] {
        value = Expr::binary(BinaryOp::Add, value, Expr::ident(param));
    }

    let sum7_symbol = Symbol::function("sum7", 0, 7);
    let sum7 = Function::new(sum7_symbol.clone(), params, statements(vec![Stmt::Return(value)]));

    let call = Expr::call(sum7_symbol, (1..=7).map(Expr::Number).collect());
    let main = Function::new(
        Symbol::function("main", 1, 0),
        Vec::new(),
        statements(vec![Stmt::Return(call)]),
    );

    Program::new(vec![GlobalEntry::Function(sum7), GlobalEntry::Function(main)], Vec::new())
}

/// An entry function with `nparms` parameters that returns their sum.
///
/// Used to walk the arity boundary cases around the register/stack crossover: with more
/// than six parameters the surplus arrives on the stack, and an odd surplus forces the
/// startup code to pad underneath the argument area.
pub fn wide_sum_entry(nparms: usize) -> Program {
    let params: Vec<SymbolRef> =
        (0..nparms).map(|seq| Symbol::parameter(&format!("p{seq}"), seq)).collect();

    let mut value = Expr::ident(&params[0]);
    for param in &params[1..] {
        value = Expr::binary(BinaryOp::Add, value, Expr::ident(param));
    }

    let body = statements(vec![Stmt::Return(value)]);
    let f = Function::new(Symbol::function("sum", 0, nparms), params, body);

    Program::new(vec![GlobalEntry::Function(f)], Vec::new())
}

/// A program with global variables shared by two functions.
///
/// ```text
/// var counter
/// func bump(amount) { counter += amount  return counter }
/// func main() { counter := 5  bump(4)  return bump(1) }
/// ```
pub fn global_counter() -> Program {
    let counter = Symbol::global_var("counter", 0);
    let amount = Symbol::parameter("amount", 0);

    let bump_symbol = Symbol::function("bump", 1, 1);
    let bump = Function::new(
        bump_symbol.clone(),
        vec![amount.clone()],
        statements(vec![
            Stmt::Compound { op: ArithmeticOp::Add, target: counter.clone(), value: Expr::ident(&amount) },
            Stmt::Return(Expr::ident(&counter)),
        ]),
    );

    let main = Function::new(
        Symbol::function("main", 2, 0),
        Vec::new(),
        statements(vec![
            Stmt::Assign { target: counter.clone(), value: Expr::Number(5) },
            Stmt::Assign {
                target: counter.clone(),
                value: Expr::call(bump_symbol.clone(), vec![Expr::Number(4)]),
            },
            Stmt::Return(Expr::call(bump_symbol, vec![Expr::Number(1)])),
        ]),
    );

    Program::new(
        vec![
            GlobalEntry::Variable(counter),
            GlobalEntry::Function(bump),
            GlobalEntry::Function(main),
        ],
        Vec::new(),
    )
}
