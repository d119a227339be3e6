// Copyright 2025-2026 Neil Henderson
//
//! Assembles, links, and runs generated assembly through the system C toolchain.
//!
//! The generated code is non-PIC with absolute addressing, targets the System V AMD64
//! ABI, and links against libc, so these helpers only operate on x86-64 Linux hosts
//! with a C compiler installed; everywhere else they return `None` and the callers
//! skip their run-time assertions.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// The observable behavior of one program run.
pub struct RunResult {
    pub stdout: String,
    pub status: i32,
}

/// Locates a usable C compiler driver on the host.
pub fn find_c_compiler() -> Option<PathBuf> {
    for candidate in ["cc", "gcc", "clang"] {
        let probe = Command::new(candidate).arg("--version").output();
        if probe.is_ok_and(|output| output.status.success()) {
            return Some(PathBuf::from(candidate));
        }
    }

    None
}

/// Assembles and links `asm`, runs the binary with the given arguments, and captures
/// stdout and the exit status. Returns `None` when the host cannot run the code.
pub fn compile_and_run(asm: &str, args: &[&str]) -> Option<RunResult> {
    if !cfg!(all(target_os = "linux", target_arch = "x86_64")) {
        return None;
    }

    let compiler = find_c_compiler()?;

    let dir = TempDir::new().expect("failed to create scratch directory");
    let asm_path = dir.path().join("program.s");
    let exe_path = dir.path().join("program");

    fs::write(&asm_path, asm).expect("failed to write the assembly file");

    // Absolute addressing needs a non-PIE link.
    let compile = Command::new(&compiler)
        .arg("-no-pie")
        .arg("-o")
        .arg(&exe_path)
        .arg(&asm_path)
        .output()
        .expect("failed to launch the C compiler");

    assert!(
        compile.status.success(),
        "assembling the generated code failed:\n{}",
        String::from_utf8_lossy(&compile.stderr)
    );

    let run = Command::new(&exe_path).args(args).output().expect("failed to run the compiled program");

    Some(RunResult {
        stdout: String::from_utf8_lossy(&run.stdout).into_owned(),
        status: run.status.code().expect("program was terminated by a signal"),
    })
}
