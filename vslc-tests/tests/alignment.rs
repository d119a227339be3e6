// Copyright 2025-2026 Neil Henderson
//
//! Replays the stack traffic of every emitted function and checks the structural
//! invariants: 16-byte alignment at each `call`, and label uniqueness across the
//! whole output.

use libvslc::symbols::Program;

use vslc_tests::{emit, programs, scan};

fn all_programs() -> Vec<(&'static str, Program)> {
    vec![
        ("identity", programs::identity()),
        ("bottles", programs::bottles()),
        ("two_parameter_entry", programs::two_parameter_entry()),
        ("deep_arithmetic", programs::deep_arithmetic()),
        ("nested_loops", programs::nested_loops()),
        ("print_mix", programs::print_mix()),
        ("seven_argument_call", programs::seven_argument_call()),
        ("global_counter", programs::global_counter()),
        ("wide_sum_entry_5", programs::wide_sum_entry(5)),
        ("wide_sum_entry_6", programs::wide_sum_entry(6)),
        ("wide_sum_entry_7", programs::wide_sum_entry(7)),
        ("wide_sum_entry_20", programs::wide_sum_entry(20)),
    ]
}

#[test]
fn every_call_site_is_sixteen_byte_aligned() {
    for (name, program) in all_programs() {
        let asm = emit(&program);
        let bodies = scan::function_bodies(&asm);

        assert!(!bodies.is_empty(), "{name}: no function bodies found");

        for body in &bodies {
            scan::assert_calls_aligned(body);
        }
    }
}

#[test]
fn labels_are_unique_across_the_whole_output() {
    for (_, program) in all_programs() {
        let asm = emit(&program);

        scan::assert_labels_unique(&asm);
    }
}

#[test]
fn print_heavy_bodies_balance_their_padding() {
    // Every alignment adjustment inside the body must be undone before the body ends,
    // so the net rsp adjustment is exactly the one local variable slot.
    let asm = emit(&programs::bottles());

    let bodies = scan::function_bodies(&asm);
    let main_body = bodies.iter().find(|body| body.name == "main").unwrap();

    assert_eq!(scan::net_stack_bytes(main_body), 8);
}
