// Copyright 2025-2026 Neil Henderson

use super::super::operand::Destination;
use super::super::registers::HwRegister;

#[test]
fn test_destination_formatting() {
    assert_eq!(Destination::Reg(HwRegister::RAX).to_string(), "%rax");
    assert_eq!(Destination::FrameSlot(-16).to_string(), "-16(%rbp)");
    assert_eq!(Destination::FrameSlot(24).to_string(), "24(%rbp)");
    assert_eq!(Destination::StackArg(0).to_string(), "0(%rsp)");
    assert_eq!(Destination::StackArg(8).to_string(), "8(%rsp)");
    assert_eq!(Destination::Global("counter".to_string()).to_string(), ".counter");
}

#[test]
fn test_only_rax_is_rax() {
    assert!(Destination::Reg(HwRegister::RAX).is_rax());
    assert!(!Destination::Reg(HwRegister::RSI).is_rax());
    assert!(!Destination::FrameSlot(-8).is_rax());
}

#[test]
fn test_parameter_register_order() {
    use super::super::registers::PARAMETER_REGISTERS;

    let names: Vec<String> = PARAMETER_REGISTERS.iter().map(|register| register.to_string()).collect();
    assert_eq!(names, ["%rdi", "%rsi", "%rdx", "%rcx", "%r8", "%r9"]);
}
