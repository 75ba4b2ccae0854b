//! `hp67asm` assembles source text for the HP-67/97 "Woodstock" calculator
//! CPU into a two-bank, 8192-word ROM image.
//!
//! A source file is a sequence of preprocessor directives, label
//! definitions, and instruction mnemonics, one per line. Instructions come
//! in three overlapping classes — arithmetic (register-transfer ops
//! parameterized by a time-enable field), miscellaneous (flag tests, display
//! control, pointer arithmetic, ROM-bank control), and branch (conditional
//! and unconditional jumps, subroutine calls) — recognized by an
//! ordered-prefix token matcher rather than a context-free grammar, since
//! the mnemonic tables are genuinely just overlapping lists of phrases.
//!
//! Assembly runs in three kinds of pass (see [`pass`]): a discovery pass
//! that seeds the symbol table, a fixpoint loop that re-encodes until label
//! addresses stop moving (branch-target prefix insertion can grow an
//! instruction from one word to two, which can push every later label
//! forward), and a final pass that writes the ROM image and listing for
//! real, now that every address is settled.
//!
//! This crate only assembles; it does not parse command lines, pick output
//! file names, or serialize outputs to disk beyond what [`rom`], [`listing`],
//! and [`publics`] hand back as in-memory values — that plumbing lives in
//! `main.rs`, the same split `vasm`'s library/binary boundary draws.

pub mod encoder;
pub mod error;
pub mod grammar;
pub mod labels;
pub mod line;
pub mod listing;
pub mod matcher;
pub mod pass;
pub mod preprocessor;
pub mod publics;
pub mod rom;
pub mod tables;
pub mod types;

pub use error::{AssembleError, Diagnostic, ErrorKind, Result};
pub use pass::AssembleResult;

/// Options that shape assembly but don't change its source-level semantics:
/// currently just whether to apply the mirror transform to the finished ROM.
#[derive(Clone, Debug, Default)]
pub struct AssembleOptions {
    pub mirror: bool,
}

/// Assembles `source` start to finish: pass 0, the fixpoint loop, the final
/// pass, and (if requested) the mirror transform over the resulting ROM.
pub fn assemble(source: &str, options: &AssembleOptions) -> Result<AssembleResult> {
    let mut result = pass::assemble_lines(source)?;
    if options.mirror {
        rom::apply_mirror(&mut result.rom)?;
    }
    Ok(result)
}

#[cfg(test)]
mod test;
