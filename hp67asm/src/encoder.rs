//! Opcode Encoder (spec.md §4.4): dispatches one preprocessed, tokenized
//! source line to the label handler, a directive, or the branch/misc/arith
//! tables, updating assembler state and PC as it goes.

use crate::error::{AssembleError, Diagnostic, ErrorKind, Result};
use crate::grammar;
use crate::labels::SymbolTable;
use crate::tables::{
    self, ArithTemplate, BranchEntry, BranchTag, MiscLine, BANK_SWITCH_OPCODE, DEL_SEL_ROM_LOW6,
    SEL_ROM_LOW6,
};
use crate::types::{full_addr, Bank, Pc, Word, PC_MASK, ROM_GROUP_MASK};

/// The three modes a pass can run in (spec.md §9): they share one encoder
/// implementation and differ only in how forgiving label resolution and
/// diagnostics are.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassKind {
    Discover,
    Fixpoint,
    Final,
}

impl PassKind {
    fn is_final(self) -> bool {
        self == PassKind::Final
    }
}

/// Assembler state, reset at the start of every pass (spec.md §3).
pub struct EncodeState {
    pub pc: Pc,
    pub bank: Bank,
    pub last_global: String,
    pub ifthen: bool,
    pub cy: bool,
    pub del_rom_force: u8,
    pub del_rom_force_rom: u16,
}

impl EncodeState {
    pub fn new() -> EncodeState {
        EncodeState {
            pc: 0,
            bank: Bank::Zero,
            last_global: String::new(),
            ifthen: false,
            cy: false,
            del_rom_force: 0,
            del_rom_force_rom: 0,
        }
    }
}

impl Default for EncodeState {
    fn default() -> EncodeState {
        EncodeState::new()
    }
}

/// What one source line produced: zero, one, or two words, written starting
/// at `pc_before` (the PC in effect before this line ran).
#[derive(Debug, Default, Clone)]
pub struct LineOutcome {
    pub pc_before: Pc,
    pub bank: Option<Bank>,
    pub words: Vec<Word>,
    /// The label name this line defined, if its first token ended in `:`.
    pub label: Option<String>,
}

pub struct Encoder {
    arith: [ArithTemplate; 32],
    misc: [MiscLine; 16],
    branch: [BranchEntry; 5],
}

impl Encoder {
    pub fn new() -> Encoder {
        Encoder {
            arith: tables::arith_templates(),
            misc: tables::misc_lines(),
            branch: tables::branch_table(),
        }
    }

    /// Processes one already-tokenized, already-active source line.
    pub fn process_line(
        &self,
        state: &mut EncodeState,
        symbols: &mut SymbolTable,
        pass: PassKind,
        tokens: &[String],
        line_text: &str,
        diagnostics: &mut Vec<Diagnostic>,
        publics: &mut Vec<(String, u16)>,
    ) -> Result<LineOutcome> {
        let ctx = |pc: Pc, bank: Bank| crate::error::context_str(bank, pc, line_text);
        let mut tokens = strip_hex_hints(tokens);
        let mut label = None;

        if let Some(first) = tokens.first() {
            if first.ends_with(':') {
                let name = first.trim_end_matches(':').to_string();
                let addr = full_addr(state.bank, state.pc);
                if pass == PassKind::Discover {
                    symbols
                        .add(&name, &state.last_global, addr)
                        .map_err(|e| e.with_context(state.bank, state.pc, line_text))?;
                } else {
                    symbols
                        .correct(&name, &state.last_global, addr)
                        .map_err(|e| e.with_context(state.bank, state.pc, line_text))?;
                }
                if !name.starts_with('.') {
                    state.last_global = name.clone();
                }
                label = Some(name);
                tokens = tokens[1..].to_vec();
            }
        }

        if tokens.is_empty() {
            return Ok(LineOutcome {
                pc_before: state.pc,
                bank: None,
                words: Vec::new(),
                label,
            });
        }

        let pc_before = state.pc;
        let bank = state.bank;

        // `nop` is a pseudo-op alias for the all-zero word, not a phrase in
        // any mnemonic table: unlike "if s 0" (which also encodes to 0x000)
        // it carries no side effects, so it can't be folded into line 0's
        // table without wrongly setting `ifthen`.
        if tokens.len() == 1 && tokens[0].eq_ignore_ascii_case("nop") {
            state.pc = state.pc.wrapping_add(1) & PC_MASK;
            return Ok(LineOutcome {
                pc_before,
                bank: Some(bank),
                words: vec![0],
                label,
            });
        }

        if let Some(words) =
            self.try_directive(state, symbols, pass, &tokens, publics, diagnostics, &ctx)?
        {
            return Ok(LineOutcome {
                pc_before,
                bank: Some(bank),
                words,
                label,
            });
        }

        if let Some((index, consumed)) = tables::match_branch(&tokens, &self.branch) {
            let words = self.encode_branch(
                state,
                symbols,
                pass,
                index,
                &tokens[consumed..],
                diagnostics,
                &ctx,
            )?;
            return Ok(LineOutcome {
                pc_before,
                bank: Some(bank),
                words,
                label,
            });
        }

        if let Some((line, column, sets_ifthen, consumed)) = tables::match_misc(&tokens, &self.misc)
        {
            let words = self.encode_misc(
                state,
                symbols,
                pass,
                line,
                column,
                sets_ifthen,
                &tokens[consumed..],
                diagnostics,
                &ctx,
            )?;
            return Ok(LineOutcome {
                pc_before,
                bank: Some(bank),
                words,
                label,
            });
        }

        let arith_tokens = normalize_exchange(&tokens);
        if let Some((column, tef)) = tables::match_arith(&arith_tokens) {
            let template = &self.arith[column];
            if template.sets_carry {
                state.cy = true;
            }
            if template.sets_ifthen {
                state.ifthen = true;
            }
            state.pc = state.pc.wrapping_add(1) & PC_MASK;
            return Ok(LineOutcome {
                pc_before,
                bank: Some(bank),
                words: vec![tables::encode_arith(column, tef)],
                label,
            });
        }

        if pass.is_final() {
            Err(AssembleError::new(
                ErrorKind::Semantic,
                format!("unknown mnemonic \"{}\"", tokens.join(" ")),
            )
            .with_context(state.bank, pc_before, line_text))
        } else {
            state.pc = state.pc.wrapping_add(1) & PC_MASK;
            Ok(LineOutcome {
                pc_before,
                bank: Some(bank),
                words: vec![0],
                label,
            })
        }
    }

    fn try_directive(
        &self,
        state: &mut EncodeState,
        symbols: &SymbolTable,
        pass: PassKind,
        tokens: &[String],
        publics: &mut Vec<(String, u16)>,
        diagnostics: &mut Vec<Diagnostic>,
        ctx: &dyn Fn(Pc, Bank) -> String,
    ) -> Result<Option<Vec<Word>>> {
        let head = tokens[0].to_ascii_lowercase();
        match head.as_str() {
            "org" => {
                let arg = tokens.get(1).ok_or_else(|| {
                    AssembleError::new(ErrorKind::Syntax, "org requires an address")
                })?;
                let full = grammar::parse_int(arg)? as u16;
                let high_bit = (full >> 12) & 1;
                if Bank::from_bit(high_bit) != state.bank {
                    return Err(AssembleError::new(
                        ErrorKind::Constraint,
                        "org address bank bit does not match the current bank",
                    )
                    .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                }
                let new_pc = full & PC_MASK;
                if pass.is_final() {
                    if state.pc > new_pc {
                        return Err(AssembleError::new(
                            ErrorKind::Constraint,
                            "org regresses the program counter",
                        )
                        .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                    } else if state.pc < new_pc && !(state.bank == Bank::One && new_pc == 0x400) {
                        diagnostics.push(Diagnostic::Info {
                            context: ctx(state.pc, state.bank),
                            message: format!(
                                "{} empty word(s) before org 0x{:03X}",
                                new_pc - state.pc,
                                new_pc
                            ),
                        });
                    }
                }
                state.pc = new_pc;
                Ok(Some(Vec::new()))
            }
            "bank" => {
                let arg = tokens.get(1).ok_or_else(|| {
                    AssembleError::new(ErrorKind::Syntax, "bank requires 0 or 1")
                })?;
                let n = grammar::parse_int(arg)?;
                state.bank = Bank::from_nonzero(n as u32);
                Ok(Some(Vec::new()))
            }
            "public" => {
                if let Some(label) = tokens.get(1) {
                    if pass.is_final() {
                        let addr = symbols.find_full(label, &state.last_global).ok_or_else(|| {
                            AssembleError::new(
                                ErrorKind::Semantic,
                                format!("public label \"{}\" is not defined", label),
                            )
                            .with_context(state.bank, state.pc, &ctx(state.pc, state.bank))
                        })?;
                        publics.push((label.clone(), addr));
                    }
                    Ok(Some(Vec::new()))
                } else {
                    Err(AssembleError::new(
                        ErrorKind::Syntax,
                        "public requires a label",
                    ))
                }
            }
            "delayed" if tokens.len() >= 4 && tokens[1].eq_ignore_ascii_case("select")
                && tokens[2].eq_ignore_ascii_case("rom")
                && tokens[3].eq_ignore_ascii_case("auto") =>
            {
                state.del_rom_force = 2;
                Ok(Some(Vec::new()))
            }
            _ => Ok(None),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn encode_branch(
        &self,
        state: &mut EncodeState,
        symbols: &SymbolTable,
        pass: PassKind,
        index: usize,
        operand: &[String],
        diagnostics: &mut Vec<Diagnostic>,
        ctx: &dyn Fn(Pc, Bank) -> String,
    ) -> Result<Vec<Word>> {
        let entry = &self.branch[index];
        let operand_token = operand.first().ok_or_else(|| {
            AssembleError::new(ErrorKind::Syntax, "branch instruction requires a target")
                .with_context(state.bank, state.pc, &ctx(state.pc, state.bank))
        })?;

        // Side-effect preconditions/clears are precomputed per table entry
        // (spec.md §9: "precomputed at table-build time, not per-call
        // logic"), not re-derived from the tag here.
        if entry.requires_ifthen && !state.ifthen {
            return Err(AssembleError::new(
                ErrorKind::Constraint,
                "then go to without a preceding if",
            )
            .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
        }
        if entry.clears_ifthen {
            state.ifthen = false;
        }

        if entry.tag == BranchTag::Raw {
            let target = self.resolve_target(state, symbols, operand_token)?;
            let word = match target {
                None => {
                    if pass.is_final() {
                        return Err(AssembleError::new(
                            ErrorKind::Semantic,
                            format!("label \"{}\" is not defined", operand_token),
                        )
                        .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                    }
                    0
                }
                Some(target) => {
                    let window = state.pc & 0x0C00;
                    let offset = target & PC_MASK;
                    // Gated on the final pass only: label addresses can still
                    // shift during the fixpoint loop (earlier prefix
                    // insertions grow PCs), so a transient window mismatch on
                    // an intermediate pass isn't necessarily a real error —
                    // only the converged, final-pass addresses are
                    // authoritative (mirrors the other window/layout checks
                    // below, all gated the same way).
                    if pass.is_final() && (offset & 0x0C00) != window {
                        return Err(AssembleError::new(
                            ErrorKind::Layout,
                            "then go to target is outside the 10-bit branch window",
                        )
                        .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                    }
                    offset & 0x03FF
                }
            };
            state.pc = state.pc.wrapping_add(1) & PC_MASK;
            return Ok(vec![word]);
        }

        if entry.requires_cy && !state.cy {
            return Err(AssembleError::new(
                ErrorKind::Constraint,
                "if n/c go to without a preceding CY operation",
            )
            .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
        }
        if entry.clears_cy {
            state.cy = false;
        }

        if pass.is_final() && (state.pc & 0x00FF) == 0x00FF && state.del_rom_force == 0 {
            return Err(AssembleError::new(
                ErrorKind::Layout,
                "branch not allowed on the last word of a ROM group",
            )
            .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
        }

        let tag_bits: u16 = match entry.tag {
            BranchTag::Jsb => 0b001,
            BranchTag::GoTo => 0b011,
            BranchTag::Raw => unreachable!(),
        };

        let target = self.resolve_target(state, symbols, operand_token)?;
        let words = match target {
            None => {
                if pass.is_final() {
                    return Err(AssembleError::new(
                        ErrorKind::Semantic,
                        format!("label \"{}\" is not defined", operand_token),
                    )
                    .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                }
                let default = (tag_bits) | 0b000; // dist 0
                state.del_rom_force = 0;
                vec![default]
            }
            Some(target) => {
                let offset = target & PC_MASK;
                let window = state.pc & ROM_GROUP_MASK;
                if (offset & ROM_GROUP_MASK) == window {
                    let dist = offset & 0x00FF;
                    let word = (dist << 2) | tag_bits;
                    state.del_rom_force = 0;
                    vec![word]
                } else {
                    let target_group = (offset & ROM_GROUP_MASK) >> 8;
                    let dist = offset & 0x00FF;
                    let branch_word = (dist << 2) | tag_bits;
                    match state.del_rom_force {
                        1 => {
                            if pass.is_final() && state.del_rom_force_rom != target_group {
                                return Err(AssembleError::new(
                                    ErrorKind::Layout,
                                    "manual del sel rom does not match the branch target's ROM group",
                                )
                                .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                            }
                            state.del_rom_force = 0;
                            vec![branch_word]
                        }
                        2 => {
                            let prefix_word = (target_group << 6) | DEL_SEL_ROM_LOW6;
                            state.del_rom_force = 0;
                            vec![prefix_word, branch_word]
                        }
                        _ => {
                            let prefix_word = (target_group << 6) | DEL_SEL_ROM_LOW6;
                            if pass.is_final() {
                                diagnostics.push(Diagnostic::Info {
                                    context: ctx(state.pc, state.bank),
                                    message: format!(
                                        "auto-inserted del sel rom {} for branch to 0x{:03X}",
                                        target_group, offset
                                    ),
                                });
                            }
                            vec![prefix_word, branch_word]
                        }
                    }
                }
            }
        };
        state.pc = state.pc.wrapping_add(words.len() as u16) & PC_MASK;
        Ok(words)
    }

    /// Resolves a branch operand: either a `$` direct-offset literal, or a
    /// label lookup. `None` means "unresolved" (only tolerated pre-Final).
    fn resolve_target(
        &self,
        state: &EncodeState,
        symbols: &SymbolTable,
        operand: &str,
    ) -> Result<Option<Pc>> {
        if let Some(literal) = operand.strip_prefix('$') {
            let n = grammar::parse_int(literal)? as u16;
            let base = if state.del_rom_force != 0 {
                state.del_rom_force_rom << 8
            } else {
                state.pc & ROM_GROUP_MASK
            };
            Ok(Some((n & 0x00FF) | base))
        } else {
            Ok(symbols
                .find_full(operand, &state.last_global)
                .map(|full| full & PC_MASK))
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn encode_misc(
        &self,
        state: &mut EncodeState,
        symbols: &SymbolTable,
        pass: PassKind,
        line: usize,
        column: usize,
        sets_ifthen: bool,
        operand: &[String],
        diagnostics: &mut Vec<Diagnostic>,
        ctx: &dyn Fn(Pc, Bank) -> String,
    ) -> Result<Vec<Word>> {
        if sets_ifthen {
            state.ifthen = true;
        }
        let opcode = tables::encode_misc(column, line);

        if opcode == BANK_SWITCH_OPCODE {
            match operand.first() {
                Some(label) => {
                    if pass.is_final() {
                        let required = full_addr(state.bank, state.pc.wrapping_add(1) & PC_MASK);
                        let found = symbols.find_full(label, &state.last_global);
                        if found != Some(required) {
                            return Err(AssembleError::new(
                                ErrorKind::Semantic,
                                "bank switch target does not resolve to the next instruction",
                            )
                            .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                        }
                    }
                }
                None => {
                    if pass.is_final() {
                        diagnostics.push(Diagnostic::Warning {
                            context: ctx(state.pc, state.bank),
                            message: "bank switch with no following label".to_string(),
                        });
                    }
                }
            }
        } else if opcode & 0x3F == SEL_ROM_LOW6 {
            match operand.first() {
                Some(label) => {
                    if pass.is_final() {
                        let required = (column as u16) << 8 | ((state.pc & 0x00FF) + 1);
                        let found = symbols.find(label, &state.last_global);
                        if found != required {
                            return Err(AssembleError::new(
                                ErrorKind::Semantic,
                                "sel rom target does not resolve to the expected address",
                            )
                            .with_context(state.bank, state.pc, &ctx(state.pc, state.bank)));
                        }
                    }
                }
                None => {
                    if pass.is_final() {
                        diagnostics.push(Diagnostic::Warning {
                            context: ctx(state.pc, state.bank),
                            message: "sel rom with no following label".to_string(),
                        });
                    }
                }
            }
        } else if opcode & 0x3F == DEL_SEL_ROM_LOW6 {
            state.del_rom_force = 1;
            state.del_rom_force_rom = column as u16;
        }

        state.pc = state.pc.wrapping_add(1) & PC_MASK;
        Ok(vec![opcode])
    }
}

impl Default for Encoder {
    fn default() -> Encoder {
        Encoder::new()
    }
}

/// A hex-hint token: exactly 3 hex digits whose value fits in 0..0x3FF (the
/// first digit is `0`..`3`). Up to two leading ones are hand-written hints
/// carried over from a prior listing and are ignored (spec.md §4.4 step 1).
fn is_hex_hint(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 3
        && bytes.iter().all(|b| (*b as char).is_ascii_hexdigit())
        && matches!(bytes[0], b'0'..=b'3')
}

fn strip_hex_hints(tokens: &[String]) -> Vec<String> {
    let mut start = 0;
    for _ in 0..2 {
        if tokens.get(start).map_or(false, |t| is_hex_hint(t)) {
            start += 1;
        } else {
            break;
        }
    }
    tokens[start..].to_vec()
}

/// A bare `exchange` in the first token position is a synonym for `<->`
/// (spec.md §4.1), applied only before attempting the arithmetic tables.
fn normalize_exchange(tokens: &[String]) -> Vec<String> {
    let mut out = tokens.to_vec();
    if out.first().map_or(false, |t| t.eq_ignore_ascii_case("exchange")) {
        out[0] = "<->".to_string();
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    fn run(
        enc: &Encoder,
        state: &mut EncodeState,
        symbols: &mut SymbolTable,
        pass: PassKind,
        line: &[&str],
    ) -> LineOutcome {
        let mut diags = Vec::new();
        let mut publics = Vec::new();
        enc.process_line(
            state,
            symbols,
            pass,
            &toks(line),
            &line.join(" "),
            &mut diags,
            &mut publics,
        )
        .expect("line should encode")
    }

    #[test]
    fn nop_is_word_zero_and_advances_pc_by_one() {
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        let mut symbols = SymbolTable::new();
        let outcome = run(&enc, &mut state, &mut symbols, PassKind::Final, &["nop"]);
        assert_eq!(outcome.words, vec![0x000]);
        assert_eq!(state.pc, 1);
    }

    #[test]
    fn arith_with_carry_then_conditional_branch() {
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        let mut symbols = SymbolTable::new();
        symbols.add("l:", "", 2).unwrap();

        let out1 = run(
            &enc,
            &mut state,
            &mut symbols,
            PassKind::Final,
            &["a", "+", "c", "->", "c[w]"],
        );
        assert_eq!(out1.words, vec![0x19A]);
        assert!(state.cy);

        let out2 = run(
            &enc,
            &mut state,
            &mut symbols,
            PassKind::Final,
            &["if", "n/c", "go", "to", "l:"],
        );
        assert_eq!(out2.words, vec![0x00B]);
        assert!(!state.cy);
    }

    #[test]
    fn if_n_c_go_to_without_carry_is_fatal() {
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        let mut symbols = SymbolTable::new();
        symbols.add("x:", "", 5).unwrap();
        let mut diags = Vec::new();
        let mut publics = Vec::new();
        let err = enc
            .process_line(
                &mut state,
                &mut symbols,
                PassKind::Final,
                &toks(&["if", "n/c", "go", "to", "x:"]),
                "if n/c go to x:",
                &mut diags,
                &mut publics,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Constraint);
    }

    #[test]
    fn auto_prefix_long_branch() {
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        state.pc = 0x050;
        state.del_rom_force = 2;
        let mut symbols = SymbolTable::new();
        symbols.add("far:", "", 0x300).unwrap();
        let mut diags = Vec::new();
        let mut publics = Vec::new();
        let outcome = enc
            .process_line(
                &mut state,
                &mut symbols,
                PassKind::Final,
                &toks(&["go", "to", "far:"]),
                "go to far:",
                &mut diags,
                &mut publics,
            )
            .unwrap();
        assert_eq!(outcome.words, vec![0x0F4, 0x003]);
        assert_eq!(state.pc, 0x052);
        assert!(diags.is_empty(), "auto mode emits no info note");
    }

    #[test]
    fn auto_prefix_pair_disassembles_to_del_sel_rom_and_go_to() {
        // spec.md §8's "Prefix correctness" invariant: ROM[p] decodes as
        // `del sel rom (L>>8)`, ROM[p+1] as a branch with displacement
        // `L & 0xFF`, for the 2-word sequence a long `go to`/`jsb` emits.
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        state.pc = 0x050;
        state.del_rom_force = 2;
        let mut symbols = SymbolTable::new();
        symbols.add("far:", "", 0x300).unwrap();
        let mut diags = Vec::new();
        let mut publics = Vec::new();
        let outcome = enc
            .process_line(
                &mut state,
                &mut symbols,
                PassKind::Final,
                &toks(&["go", "to", "far:"]),
                "go to far:",
                &mut diags,
                &mut publics,
            )
            .unwrap();
        let [prefix, branch] = [outcome.words[0], outcome.words[1]];
        assert_eq!(
            tables::disassemble(prefix),
            tables::Decoded::Misc { line: 13, column: 0x300 >> 8 }
        );
        assert_eq!(
            tables::disassemble(branch),
            tables::Decoded::Branch {
                tag: BranchTag::GoTo,
                dist: 0x300 & 0xFF
            }
        );
    }

    #[test]
    fn forbidden_branch_at_last_word_of_group() {
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        state.pc = 0x0FF;
        let mut symbols = SymbolTable::new();
        symbols.add("x:", "", 0x0A0).unwrap();
        let mut diags = Vec::new();
        let mut publics = Vec::new();
        let err = enc
            .process_line(
                &mut state,
                &mut symbols,
                PassKind::Final,
                &toks(&["go", "to", "x:"]),
                "go to x:",
                &mut diags,
                &mut publics,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Layout);
    }

    #[test]
    fn undefined_label_is_tolerated_in_discover_but_fatal_in_final() {
        let enc = Encoder::new();
        let mut symbols = SymbolTable::new();
        let mut diags = Vec::new();
        let mut publics = Vec::new();

        let mut discover_state = EncodeState::new();
        let outcome = enc
            .process_line(
                &mut discover_state,
                &mut symbols,
                PassKind::Discover,
                &toks(&["go", "to", "ghost:"]),
                "go to ghost:",
                &mut diags,
                &mut publics,
            )
            .expect("pass 0 tolerates an unresolved label");
        assert_eq!(outcome.words, vec![0x003]);

        let mut final_state = EncodeState::new();
        let err = enc
            .process_line(
                &mut final_state,
                &mut symbols,
                PassKind::Final,
                &toks(&["go", "to", "ghost:"]),
                "go to ghost:",
                &mut diags,
                &mut publics,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn label_definition_is_stripped_before_dispatch() {
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        let mut symbols = SymbolTable::new();
        let outcome = run(
            &enc,
            &mut state,
            &mut symbols,
            PassKind::Discover,
            &["start:", "nop"],
        );
        assert_eq!(outcome.words, vec![0x000]);
        assert_eq!(symbols.find("start", ""), 0);
    }

    #[test]
    fn hex_hint_tokens_are_ignored() {
        let enc = Encoder::new();
        let mut state = EncodeState::new();
        let mut symbols = SymbolTable::new();
        let outcome = run(
            &enc,
            &mut state,
            &mut symbols,
            PassKind::Final,
            &["000", "001", "nop"],
        );
        assert_eq!(outcome.words, vec![0x000]);
    }
}
