//! End-to-end assembly scenarios (spec.md §8), exercised through
//! [`crate::assemble`] rather than any single component.

use crate::{assemble, AssembleOptions, ErrorKind};

fn assemble_ok(source: &str) -> crate::AssembleResult {
    assemble(source, &AssembleOptions::default()).expect("should assemble")
}

#[test]
fn minimal_nop() {
    let result = assemble_ok("  nop\n");
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 0), 0);
}

#[test]
fn arith_with_carry_then_conditional_branch() {
    let source = "  a + c -> c[w]\n  if n/c go to L\nL:  nop\n";
    let result = assemble_ok(source);
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 0), 0x19A);
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 1), 0x00B);
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 2), 0x000);
}

#[test]
fn missing_carry_before_conditional_branch_is_fatal() {
    let source = "  if n/c go to X\nX:  nop\n";
    let err = assemble(source, &AssembleOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Constraint);
}

#[test]
fn branch_to_undefined_label_is_fatal_on_the_last_pass() {
    let source = "  go to NOWHERE\n";
    let err = assemble(source, &AssembleOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
}

#[test]
fn then_go_to_undefined_label_is_fatal_on_the_last_pass() {
    let source = "  if a = 0[p]\n  then go to NOWHERE\n";
    let err = assemble(source, &AssembleOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
}

#[test]
fn auto_prefix_for_long_branch() {
    let source = "org 0x050\ndelayed select rom auto\ngo to FAR\norg 0x300\nFAR:  nop\n";
    let result = assemble_ok(source);
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 0x050), 0x0F4);
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 0x051), 0x003);
    assert!(
        result.diagnostics.is_empty(),
        "auto mode emits no info note for the inserted prefix"
    );
}

#[test]
fn forbidden_branch_at_last_word_of_rom_group() {
    let source = "org 0x0FF\ngo to X\nX:  nop\n";
    let err = assemble(source, &AssembleOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Layout);
}

#[test]
fn conditional_assembly_first_true_wins() {
    let source = concat!(
        "#define A 1\n",
        "#if A == 1\n",
        "  nop\n",
        "#elif A == 2\n",
        "  jsb X\n",
        "#else\n",
        "  go to Y\n",
        "#endif\n",
    );
    let result = assemble_ok(source);
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 0), 0);
    assert_eq!(result.rom.get(crate::types::Bank::Zero, 1), 0);
}

#[test]
fn public_directive_populates_publics_stream() {
    let source = "START:  nop\npublic START\n";
    let result = assemble_ok(source);
    assert_eq!(result.publics.len(), 1);
    assert_eq!(result.publics[0].0, "START");
}

#[test]
fn duplicate_label_is_fatal() {
    let source = "A:  nop\nA:  nop\n";
    let err = assemble(source, &AssembleOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Semantic);
}

#[test]
fn bank_directive_switches_target_bank() {
    let source = "bank 1\nstart:  nop\n";
    let result = assemble_ok(source);
    assert_eq!(result.rom.get(crate::types::Bank::One, 0), 0);
}

#[test]
fn org_advancing_pc_emits_an_info_note() {
    let source = "  nop\norg 0x010\n  nop\n";
    let result = assemble_ok(source);
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| matches!(d, crate::Diagnostic::Info { .. })),
        "advancing org should leave an info diagnostic behind"
    );
}

#[test]
fn org_regressing_pc_is_fatal() {
    let source = "org 0x010\norg 0x000\n";
    let err = assemble(source, &AssembleOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Constraint);
}

#[test]
fn listing_records_the_defining_label() {
    let source = "START:  nop\n";
    let result = assemble_ok(source);
    let entry = result
        .listing
        .iter()
        .find(|e| e.is_code)
        .expect("one code entry");
    assert_eq!(entry.label.as_deref(), Some("START"));
    assert_eq!(entry.mnemonic, "nop");
}
