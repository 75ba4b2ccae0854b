//! Pass Driver (spec.md §4.6): pass 0 seeds labels, passes 1..N iterate to a
//! fixpoint over label addresses, and a final pass writes the ROM image and
//! listing.

use crate::encoder::{EncodeState, Encoder, PassKind};
use crate::error::{AssembleError, Diagnostic, ErrorKind, Result};
use crate::labels::SymbolTable;
use crate::line::{self, Line};
use crate::preprocessor::Preprocessor;
use crate::types::{Pc, Rom};

/// Diagnostic cap on fixpoint iterations (spec.md §9): prefix insertion only
/// ever grows an address, so real inputs converge in at most a few passes
/// per branch statement; this bounds runaway non-convergence.
pub const MAX_PASSES: usize = 8;

pub struct ListingEntry {
    pub pc: Pc,
    pub bank: crate::types::Bank,
    pub label: Option<String>,
    pub prefix_word: Option<u16>,
    pub word: Option<u16>,
    pub mnemonic: String,
    pub raw: String,
    pub is_code: bool,
}

pub struct AssembleResult {
    pub rom: Rom,
    pub listing: Vec<ListingEntry>,
    pub publics: Vec<(String, u16)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs every line of `source` through the preprocessor and (when active)
/// the encoder for one pass. `symbols` and the encoder persist across
/// passes; `EncodeState`/`Preprocessor` are fresh every pass per spec.md §3.
fn run_pass(
    encoder: &Encoder,
    symbols: &mut SymbolTable,
    lines: &[Line],
    pass: PassKind,
    rom: &mut Option<&mut Rom>,
    listing: &mut Option<&mut Vec<ListingEntry>>,
    publics: &mut Vec<(String, u16)>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<()> {
    let mut state = EncodeState::new();
    let mut pp = Preprocessor::new();

    for line in lines {
        if line.is_blank() {
            if let Some(listing) = listing.as_mut() {
                listing.push(ListingEntry {
                    pc: state.pc,
                    bank: state.bank,
                    label: None,
                    prefix_word: None,
                    word: None,
                    mnemonic: String::new(),
                    raw: line.raw.clone(),
                    is_code: false,
                });
            }
            continue;
        }

        if line.col0 && line.tokens[0].starts_with('#') {
            let directive = &line.tokens[0];
            let rest = &line.tokens[1..];
            pp.handle(directive, rest)
                .map_err(|e| e.with_context(state.bank, state.pc, &line.raw))?;
            if let Some(listing) = listing.as_mut() {
                listing.push(ListingEntry {
                    pc: state.pc,
                    bank: state.bank,
                    label: None,
                    prefix_word: None,
                    word: None,
                    mnemonic: String::new(),
                    raw: line.raw.clone(),
                    is_code: false,
                });
            }
            continue;
        }

        if !pp.is_active() {
            if let Some(listing) = listing.as_mut() {
                listing.push(ListingEntry {
                    pc: state.pc,
                    bank: state.bank,
                    label: None,
                    prefix_word: None,
                    word: None,
                    mnemonic: String::new(),
                    raw: line.raw.clone(),
                    is_code: false,
                });
            }
            continue;
        }

        let outcome = encoder.process_line(
            &mut state,
            symbols,
            pass,
            &line.tokens,
            &line.raw,
            diagnostics,
            publics,
        )?;

        if let Some(rom) = rom.as_mut() {
            let bank = outcome.bank.unwrap_or(state.bank);
            for (i, word) in outcome.words.iter().enumerate() {
                let pc = outcome.pc_before.wrapping_add(i as u16) & crate::types::PC_MASK;
                rom.set(bank, pc, *word);
            }
        }

        if let Some(listing) = listing.as_mut() {
            let (prefix_word, word) = match outcome.words.len() {
                0 => (None, None),
                1 => (None, Some(outcome.words[0])),
                _ => (Some(outcome.words[0]), Some(outcome.words[1])),
            };
            let mnemonic_tokens = if outcome.label.is_some() {
                &line.tokens[1..]
            } else {
                &line.tokens[..]
            };
            listing.push(ListingEntry {
                pc: outcome.pc_before,
                bank: outcome.bank.unwrap_or(state.bank),
                label: outcome.label.clone(),
                prefix_word,
                word,
                mnemonic: mnemonic_tokens.join(" "),
                raw: line.raw.clone(),
                is_code: !outcome.words.is_empty() || outcome.label.is_some(),
            });
        }
    }

    pp.finish()
}

/// Runs pass 0, the fixpoint loop, and the final pass (spec.md §4.6).
pub fn assemble_lines(source: &str) -> Result<AssembleResult> {
    let lines: Vec<Line> = source.lines().map(line::tokenize).collect();
    let encoder = Encoder::new();
    let mut symbols = SymbolTable::new();

    // Pass 0: seed label addresses.
    run_pass(
        &encoder,
        &mut symbols,
        &lines,
        PassKind::Discover,
        &mut None,
        &mut None,
        &mut Vec::new(),
        &mut Vec::new(),
    )?;

    // Fixpoint passes: re-encode until no label address changes.
    let mut converged = false;
    for _ in 0..MAX_PASSES {
        symbols.delta_labels = false;
        run_pass(
            &encoder,
            &mut symbols,
            &lines,
            PassKind::Fixpoint,
            &mut None,
            &mut None,
            &mut Vec::new(),
            &mut Vec::new(),
        )?;
        if !symbols.delta_labels {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(AssembleError::new(
            ErrorKind::Internal,
            format!(
                "label addresses failed to converge after {} passes",
                MAX_PASSES
            ),
        ));
    }

    // Final pass: report errors for real, write ROM and listing.
    let mut rom = Rom::new();
    let mut listing = Vec::new();
    let mut publics = Vec::new();
    let mut diagnostics = Vec::new();
    let mut rom_ref = Some(&mut rom);
    let mut listing_ref = Some(&mut listing);
    run_pass(
        &encoder,
        &mut symbols,
        &lines,
        PassKind::Final,
        &mut rom_ref,
        &mut listing_ref,
        &mut publics,
        &mut diagnostics,
    )?;

    Ok(AssembleResult {
        rom,
        listing,
        publics,
        diagnostics,
    })
}
