// Copyright 2025-2026 Neil Henderson
//
//! A small scanner over emitted assembly text, used to check structural invariants
//! (stack alignment at call sites, label uniqueness) without assembling anything.

/// One emitted VSL function: its unprefixed name and its body lines (instructions and
/// local labels), up to but excluding the next file-scope directive.
pub struct FunctionBody {
    pub name: String,
    pub lines: Vec<String>,
}

/// Splits the generated text into the bodies of the `_func_`-prefixed functions.
/// The startup `main` is not included: its argument-conversion loop pushes a
/// caller-dependent number of words that a linear scan cannot model.
pub fn function_bodies(asm: &str) -> Vec<FunctionBody> {
    let mut bodies: Vec<FunctionBody> = Vec::new();
    let mut current: Option<FunctionBody> = None;

    for line in asm.lines() {
        if let Some(label) = line.strip_suffix(':') {
            if let Some(name) = label.strip_prefix("_func_") {
                if let Some(done) = current.take() {
                    bodies.push(done);
                }
                current = Some(FunctionBody { name: name.to_string(), lines: Vec::new() });
                continue;
            }
        }

        // A file-scope directive ends the current function.
        if line.starts_with(".globl") || line.starts_with(".section") {
            if let Some(done) = current.take() {
                bodies.push(done);
            }
            continue;
        }

        if let Some(body) = current.as_mut() {
            body.lines.push(line.to_string());
        }
    }

    if let Some(done) = current.take() {
        bodies.push(done);
    }

    bodies
}

/// Replays a function body's stack traffic and asserts that every `call` happens with
/// the stack 16-byte aligned relative to the post-prologue state.
pub fn assert_calls_aligned(body: &FunctionBody) {
    let mut pushed_bytes: i64 = 0;
    let mut seen_prologue = false;

    for line in &body.lines {
        let instruction = line.trim();

        if !seen_prologue {
            seen_prologue = instruction == "movq %rsp, %rbp";
            continue;
        }

        if instruction.starts_with("pushq") {
            pushed_bytes += 8;
        } else if instruction.starts_with("popq") {
            pushed_bytes -= 8;
        } else if let Some(bytes) = rsp_adjustment(instruction, "subq") {
            pushed_bytes += bytes;
        } else if let Some(bytes) = rsp_adjustment(instruction, "addq") {
            pushed_bytes -= bytes;
        } else if instruction.starts_with("call") {
            assert!(
                pushed_bytes % 16 == 0,
                "misaligned stack ({pushed_bytes} bytes pushed) at '{instruction}' in function '{}'",
                body.name
            );
        }
    }

    assert!(seen_prologue, "function '{}' has no prologue", body.name);
}

/// Replays a function body's stack traffic and returns the net bytes pushed beyond the
/// post-prologue state once the body ends. Align/unalign pairs and operand push/pop
/// pairs cancel out, so this is the fixed frame allocation plus any argument cells the
/// body's calls left behind.
pub fn net_stack_bytes(body: &FunctionBody) -> i64 {
    let mut pushed_bytes: i64 = 0;
    let mut seen_prologue = false;

    for line in &body.lines {
        let instruction = line.trim();

        if !seen_prologue {
            seen_prologue = instruction == "movq %rsp, %rbp";
            continue;
        }

        if instruction.starts_with("pushq") {
            pushed_bytes += 8;
        } else if instruction.starts_with("popq") {
            pushed_bytes -= 8;
        } else if let Some(bytes) = rsp_adjustment(instruction, "subq") {
            pushed_bytes += bytes;
        } else if let Some(bytes) = rsp_adjustment(instruction, "addq") {
            pushed_bytes -= bytes;
        }
    }

    pushed_bytes
}

/// Parses `subq $N, %rsp` / `addq $N, %rsp`, returning `N`.
fn rsp_adjustment(instruction: &str, mnemonic: &str) -> Option<i64> {
    let rest = instruction.strip_prefix(mnemonic)?.trim();
    let (amount, target) = rest.split_once(',')?;

    if target.trim() != "%rsp" {
        return None;
    }

    amount.trim().strip_prefix('$')?.parse().ok()
}

/// Asserts that no label is defined twice anywhere in the output.
pub fn assert_labels_unique(asm: &str) {
    let mut seen = std::collections::HashSet::new();

    for line in asm.lines() {
        let Some(label) = line.strip_suffix(':') else {
            continue;
        };

        assert!(seen.insert(label.to_string()), "label '{label}' is defined more than once");
    }
}
