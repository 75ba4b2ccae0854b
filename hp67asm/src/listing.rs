//! Listing writer (spec.md §6): one line per source line, code lines
//! formatted `BPPP LABEL             [DDD ]CCC MNEMONIC         COMMENT`.

use crate::pass::ListingEntry;

const LABEL_WIDTH: usize = 14;
const MNEMONIC_WIDTH: usize = 30;

fn format_code_line(entry: &ListingEntry) -> String {
    let label = entry.label.clone().unwrap_or_default();
    let prefix = match entry.prefix_word {
        Some(w) => format!("{:03X} ", w),
        None => "    ".to_string(),
    };
    let word = entry.word.map_or(String::new(), |w| format!("{:03X}", w));
    let mnemonic = &entry.mnemonic;
    format!(
        "{}{:03X} {:<label_width$}{}{} {:<mnemonic_width$}",
        entry.bank,
        entry.pc,
        label,
        prefix,
        word,
        mnemonic,
        label_width = LABEL_WIDTH,
        mnemonic_width = MNEMONIC_WIDTH,
    )
}

/// Renders one pass's recorded entries into `.lst` text. Non-code lines
/// (blank, comment, preprocessor directives, inactive-branch lines) are
/// preserved verbatim so the listing still lines up with the source file.
pub fn render(entries: &[ListingEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        if entry.is_code {
            out.push_str(format_code_line(entry).trim_end());
        } else {
            out.push_str(entry.raw.trim_end());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Bank;

    #[test]
    fn code_line_includes_bank_pc_and_word() {
        let entry = ListingEntry {
            pc: 0,
            bank: Bank::Zero,
            label: None,
            prefix_word: None,
            word: Some(0),
            mnemonic: "nop".to_string(),
            raw: "  nop".to_string(),
            is_code: true,
        };
        let rendered = render(&[entry]);
        assert!(rendered.starts_with("0000 "));
        assert!(rendered.contains("000 nop"));
    }

    #[test]
    fn blank_line_is_preserved_verbatim() {
        let entry = ListingEntry {
            pc: 0,
            bank: Bank::Zero,
            label: None,
            prefix_word: None,
            word: None,
            mnemonic: String::new(),
            raw: "  # a comment".to_string(),
            is_code: false,
        };
        let rendered = render(&[entry]);
        assert_eq!(rendered, "  # a comment\n");
    }
}
