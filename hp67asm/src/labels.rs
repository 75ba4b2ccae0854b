//! Symbol Table (spec.md §4.5): label definitions, corrections, and lookups.
//! Locals are not a separate namespace — a name starting with `.` is
//! name-mangled onto the most recently seen global label (spec.md §9).

use crate::error::{AssembleError, ErrorKind, Result};
use std::collections::HashMap;

/// Sentinel address `find` returns for an undefined label. Pass 0 and the
/// fixpoint passes tolerate this; the last pass turns it into a fatal error.
pub const UNDEFINED: u16 = 0xFFFF;

#[derive(Default)]
pub struct SymbolTable {
    addrs: HashMap<String, u16>,
    /// Set by `correct` whenever a stored value changes; the pass driver
    /// reads and resets this once per pass to drive fixpoint termination.
    pub delta_labels: bool,
}

fn mangled(name: &str, last_global: &str) -> String {
    if let Some(local) = name.strip_prefix('.') {
        format!("{}.{}", last_global, local)
    } else {
        name.to_string()
    }
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Pass-0 only. `name` is the label token exactly as it appeared in the
    /// source (callers are consistent about whether that includes a
    /// trailing `:`, since `add`/`correct`/`find` only ever compare keys to
    /// each other). `addr` already carries the bank bit (bit 12).
    pub fn add(&mut self, name: &str, last_global: &str, addr: u16) -> Result<()> {
        let key = mangled(name, last_global);
        if self.addrs.contains_key(&key) {
            return Err(AssembleError::new(
                ErrorKind::Semantic,
                format!("duplicate label \"{}\"", key),
            ));
        }
        self.addrs.insert(key, addr);
        Ok(())
    }

    /// Later passes. Errors if `name` was never defined in pass 0 — a label
    /// can't appear for the first time after the discovery pass.
    pub fn correct(&mut self, name: &str, last_global: &str, addr: u16) -> Result<()> {
        let key = mangled(name, last_global);
        match self.addrs.get_mut(&key) {
            None => Err(AssembleError::new(
                ErrorKind::Internal,
                format!("label \"{}\" corrected before being added", key),
            )),
            Some(slot) => {
                if *slot != addr {
                    *slot = addr;
                    self.delta_labels = true;
                }
                Ok(())
            }
        }
    }

    /// Returns the low 12 bits of the stored address, or [`UNDEFINED`].
    pub fn find(&self, name: &str, last_global: &str) -> u16 {
        let key = mangled(name, last_global);
        self.addrs
            .get(&key)
            .map(|a| a & 0x0FFF)
            .unwrap_or(UNDEFINED)
    }

    /// Returns the full stored address (bank bit included), or `None`.
    pub fn find_full(&self, name: &str, last_global: &str) -> Option<u16> {
        let key = mangled(name, last_global);
        self.addrs.get(&key).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn global_label_round_trips() {
        let mut table = SymbolTable::new();
        table.add("loop:", "", 0x042).unwrap();
        assert_eq!(table.find("loop:", ""), 0x042);
    }

    #[test]
    fn local_label_mangles_onto_last_global() {
        let mut table = SymbolTable::new();
        table.add("loop:", "", 0x100).unwrap();
        table.add(".again:", "loop:", 0x105).unwrap();
        assert_eq!(table.find(".again:", "loop:"), 0x105);
    }

    #[test]
    fn duplicate_add_is_fatal() {
        let mut table = SymbolTable::new();
        table.add("x:", "", 1).unwrap();
        let err = table.add("x:", "", 2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Semantic);
    }

    #[test]
    fn correct_sets_delta_only_on_change() {
        let mut table = SymbolTable::new();
        table.add("x:", "", 1).unwrap();
        table.delta_labels = false;
        table.correct("x:", "", 1).unwrap();
        assert!(!table.delta_labels);
        table.correct("x:", "", 2).unwrap();
        assert!(table.delta_labels);
    }

    #[test]
    fn find_undefined_label_is_sentinel() {
        let table = SymbolTable::new();
        assert_eq!(table.find("nope:", ""), UNDEFINED);
    }

    #[test]
    fn correct_before_add_is_internal_error() {
        let mut table = SymbolTable::new();
        let err = table.correct("ghost:", "", 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }
}
