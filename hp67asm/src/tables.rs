//! Static mnemonic tables (spec.md §4.1): the arithmetic skeleton (32
//! templates × 8 time-enable-field selectors), the fifteen misc-class line
//! tables, and the five-entry branch table. Column/line/tef indices here are
//! exactly the bit-field values the encoder packs into a word.

use crate::matcher::{match_tokens, Candidate};

/// Time-enable-field selectors, in the exact order spec.md's glossary gives
/// them; the array index IS the 3-bit `tef` field value.
pub const TEF_NAMES: [&str; 8] = ["p", "wp", "xs", "x", "s", "m", "w", "ms"];

pub fn tef_index(name: &str) -> Option<usize> {
    TEF_NAMES.iter().position(|t| t.eq_ignore_ascii_case(name))
}

#[derive(Clone, Debug)]
pub struct ArithTemplate {
    pub tokens: Vec<&'static str>,
    pub sets_carry: bool,
    pub sets_ifthen: bool,
}

fn arith(tokens: &[&'static str], sets_carry: bool, sets_ifthen: bool) -> ArithTemplate {
    ArithTemplate {
        tokens: tokens.to_vec(),
        sets_carry,
        sets_ifthen,
    }
}

/// The 32 arithmetic templates. Column 12 (`0x0C`) is pinned to `a + c -> c`
/// by spec.md §8 scenario 2; columns 22-27 are the six `if ...` comparisons
/// that set `ifthen`, per spec.md §4.4.
pub fn arith_templates() -> [ArithTemplate; 32] {
    [
        arith(&["0", "->", "a"], false, false),
        arith(&["0", "->", "b"], false, false),
        arith(&["a", "<->", "b"], false, false),
        arith(&["a", "->", "b"], false, false),
        arith(&["b", "->", "a"], false, false),
        arith(&["a", "<->", "c"], false, false),
        arith(&["c", "->", "a"], false, false),
        arith(&["a", "->", "c"], false, false),
        arith(&["b", "<->", "c"], false, false),
        arith(&["c", "->", "b"], false, false),
        arith(&["b", "->", "c"], false, false),
        arith(&["a", "+", "b", "->", "a"], true, false),
        arith(&["a", "+", "c", "->", "c"], true, false),
        arith(&["a", "+", "c", "->", "a"], true, false),
        arith(&["c", "+", "c", "->", "c"], true, false),
        arith(&["a", "-", "b", "->", "a"], true, false),
        arith(&["a", "-", "c", "->", "a"], true, false),
        arith(&["c", "-", "a", "->", "c"], true, false),
        arith(&["0", "-", "a", "->", "a"], true, false),
        arith(&["0", "-", "a", "-", "1", "->", "a"], true, false),
        arith(&["a", "-", "1", "->", "a"], true, false),
        arith(&["shift", "a", "right"], false, false),
        arith(&["if", "a", ">=", "c"], false, true),
        arith(&["if", "a", "<", "c"], false, true),
        arith(&["if", "a", "=", "0"], false, true),
        arith(&["if", "a", "#", "0"], false, true),
        arith(&["if", "a", "=", "c"], false, true),
        arith(&["if", "a", "#", "c"], false, true),
        arith(&["p", "-", "1", "->", "p"], false, false),
        arith(&["p", "+", "1", "->", "p"], false, false),
        arith(&["0", "->", "c"], false, false),
        arith(&["shift", "c", "right"], false, false),
    ]
}

/// Encodes an arithmetic column/tef pair: `(column<<5)|(tef<<2)|0b10`.
pub fn encode_arith(column: usize, tef: usize) -> u16 {
    ((column as u16) << 5) | ((tef as u16) << 2) | 0b10
}

/// Matches `exchange`-normalized tokens against the arithmetic skeleton.
/// The last template token is matched as a literal prefix of the
/// corresponding input token, with the remainder required to be a bracketed
/// tef selector (e.g. template token `c`, input token `c[w]`).
pub fn match_arith(tokens: &[String]) -> Option<(usize, usize)> {
    let templates = arith_templates();
    'outer: for (index, tmpl) in templates.iter().enumerate() {
        let n = tmpl.tokens.len();
        if tokens.len() < n {
            continue;
        }
        for i in 0..n - 1 {
            if !tokens[i].eq_ignore_ascii_case(tmpl.tokens[i]) {
                continue 'outer;
            }
        }
        if let Some(tef) = tef_suffix(&tokens[n - 1], tmpl.tokens[n - 1]) {
            return Some((index, tef));
        }
    }
    None
}

fn tef_suffix(input_token: &str, template_token: &str) -> Option<usize> {
    if input_token.len() <= template_token.len() {
        return None;
    }
    if !input_token.is_char_boundary(template_token.len()) {
        return None;
    }
    let (head, rest) = input_token.split_at(template_token.len());
    if !head.eq_ignore_ascii_case(template_token) {
        return None;
    }
    if rest.len() < 3 || !rest.starts_with('[') || !rest.ends_with(']') {
        return None;
    }
    tef_index(&rest[1..rest.len() - 1])
}

#[derive(Clone, Debug)]
pub struct MiscCandidate {
    pub tokens: Vec<String>,
    pub sets_ifthen: bool,
}

impl MiscCandidate {
    fn new(tokens: Vec<String>, sets_ifthen: bool) -> MiscCandidate {
        MiscCandidate {
            tokens,
            sets_ifthen,
        }
    }
}

/// One misc-class "line" (spec.md's 4-bit class field). A line may hold more
/// than one parallel table (verbose spelling tried before terse), all
/// sharing the same column numbering so both spellings encode identically.
#[derive(Clone, Debug, Default)]
pub struct MiscLine {
    pub tables: Vec<Vec<MiscCandidate>>,
}

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

fn toks_with(words: &[&str], value: impl ToString, trailing: &[&str]) -> Vec<String> {
    let mut v: Vec<String> = words.iter().map(|s| s.to_string()).collect();
    v.push(value.to_string());
    v.extend(trailing.iter().map(|s| s.to_string()));
    v
}

fn line_flag_test() -> MiscLine {
    // line 0: "if s N" flag test, N = 0..15, sets ifthen.
    let table = (0..16)
        .map(|n| MiscCandidate::new(toks_with(&["if", "s"], n, &[]), true))
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

fn line_clear_flag() -> MiscLine {
    let verbose = (0..10)
        .map(|n| MiscCandidate::new(toks_with(&["clear", "flag"], n, &[]), false))
        .collect();
    let terse = (0..10)
        .map(|n| MiscCandidate::new(toks_with(&["cf"], n, &[]), false))
        .collect();
    MiscLine {
        tables: vec![verbose, terse],
    }
}

fn line_set_flag() -> MiscLine {
    let verbose = (0..10)
        .map(|n| MiscCandidate::new(toks_with(&["set", "flag"], n, &[]), false))
        .collect();
    let terse = (0..10)
        .map(|n| MiscCandidate::new(toks_with(&["sf"], n, &[]), false))
        .collect();
    MiscLine {
        tables: vec![verbose, terse],
    }
}

fn line_display() -> MiscLine {
    let entries = [
        vec!["display", "off"],
        vec!["display", "toggle"],
        vec!["clear", "display"],
        vec!["shift", "display", "right"],
        vec!["blink", "display"],
        vec!["display", "on"],
        vec!["rotate", "display"],
        vec!["display", "hex"],
    ];
    let table = entries
        .iter()
        .map(|e| MiscCandidate::new(toks(e), false))
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

/// line 4, "E" class: data register -> c. Must be dispatched before the "C"
/// class (line 5) so the verbose spelling of one doesn't get misread as a
/// prefix of the other (spec.md §4.1).
fn line_data_register_to_c() -> MiscLine {
    let verbose = (0..14)
        .map(|n| {
            MiscCandidate::new(
                toks_with(&["data", "register"], n, &["->", "c"]),
                false,
            )
        })
        .collect();
    let terse = (0..14)
        .map(|n| MiscCandidate::new(toks_with(&["dr"], n, &["->", "c"]), false))
        .collect();
    MiscLine {
        tables: vec![verbose, terse],
    }
}

/// line 5, "C" class: c -> data register.
fn line_c_to_data_register() -> MiscLine {
    let verbose: Vec<MiscCandidate> = (0..14)
        .map(|n| {
            let mut t = toks(&["c", "->", "data", "register"]);
            t.push(n.to_string());
            MiscCandidate::new(t, false)
        })
        .collect();
    let terse: Vec<MiscCandidate> = (0..14)
        .map(|n| {
            let mut t = toks(&["c", "->", "dr"]);
            t.push(n.to_string());
            MiscCandidate::new(t, false)
        })
        .collect();
    MiscLine {
        tables: vec![verbose, terse],
    }
}

fn line_if_p() -> MiscLine {
    let table = (0..14)
        .map(|n| MiscCandidate::new(toks_with(&["if", "p"], n, &[]), true))
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

fn line_keyboard() -> MiscLine {
    let entries: Vec<MiscCandidate> = vec![
        MiscCandidate::new(toks(&["if", "key"]), true),
        MiscCandidate::new(toks(&["key", "released"]), false),
        MiscCandidate::new(toks(&["key", "available"]), false),
    ];
    MiscLine {
        tables: vec![entries],
    }
}

/// line 8: "sel rom N", N = 0..15. Low 6 bits of the encoded word are fixed
/// at `0x020` for every column in this line (spec.md §4.4).
fn line_sel_rom() -> MiscLine {
    let table = (0..16)
        .map(|n| MiscCandidate::new(toks_with(&["sel", "rom"], n, &[]), false))
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

/// line 9: "<value> -> p". Column 9 duplicates column 1's value (both
/// assemble "1 -> p"); see spec.md §9 Open Questions — column 9 is reachable
/// only by disassembling a pre-existing word.
fn line_set_p_arrow() -> MiscLine {
    let table = (0..16u32)
        .map(|c| {
            let value = if c == 9 {
                1
            } else if c < 9 {
                c
            } else {
                c - 1
            };
            MiscCandidate::new(
                {
                    let mut t = vec![value.to_string()];
                    t.push("->".to_string());
                    t.push("p".to_string());
                    t
                },
                false,
            )
        })
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

fn line_carry_utility() -> MiscLine {
    let entries: Vec<MiscCandidate> = vec![
        MiscCandidate::new(toks(&["clear", "carry"]), false),
        MiscCandidate::new(toks(&["set", "carry"]), false),
        MiscCandidate::new(toks(&["complement", "carry"]), false),
    ];
    MiscLine {
        tables: vec![entries],
    }
}

/// line 11 (0xB): "p << value". Column 12 duplicates column 4's value (both
/// assemble "p << 4"); see spec.md §9 Open Questions.
fn line_set_p_shift() -> MiscLine {
    let table = (0..16u32)
        .map(|c| {
            let value = if c == 12 {
                4
            } else if c < 12 {
                c
            } else {
                c - 1
            };
            MiscCandidate::new(toks_with(&["p", "<<"], value, &[]), false)
        })
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

/// line 12: column 8 must encode exactly `0x230` ("bank switch") per
/// spec.md §4.4's pseudo-branch precondition.
fn line_bank_switch() -> MiscLine {
    let entries: Vec<MiscCandidate> = vec![
        MiscCandidate::new(toks(&["power", "off"]), false),
        MiscCandidate::new(toks(&["continuous", "memory", "store"]), false),
        MiscCandidate::new(toks(&["arm", "pointer"]), false),
        MiscCandidate::new(toks(&["disarm", "pointer"]), false),
        MiscCandidate::new(toks(&["enable", "interrupt"]), false),
        MiscCandidate::new(toks(&["disable", "interrupt"]), false),
        MiscCandidate::new(toks(&["test", "battery"]), false),
        MiscCandidate::new(toks(&["clear", "flags"]), false),
        MiscCandidate::new(toks(&["bank", "switch"]), false),
    ];
    debug_assert_eq!(entries.len(), 9);
    MiscLine {
        tables: vec![entries],
    }
}

/// line 13: "del sel rom N", N = 0..15. Low 6 bits fixed at `0x034`.
fn line_del_sel_rom() -> MiscLine {
    let table = (0..16)
        .map(|n| MiscCandidate::new(toks_with(&["del", "sel", "rom"], n, &[]), false))
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

fn line_misc_14() -> MiscLine {
    let entries: Vec<MiscCandidate> = vec![
        MiscCandidate::new(toks(&["display", "toggle", "all"]), false),
        MiscCandidate::new(toks(&["power", "on"]), false),
    ];
    MiscLine {
        tables: vec![entries],
    }
}

/// line 15 (0xF): "p := value". Columns 0 and 15 both duplicate value 14
/// (both assemble "p := 14"), per spec.md §9's exact wording ("14 -> p"
/// rendered here as `p := 14` to keep it textually distinct from lines 9
/// and 11, which would otherwise collide with it in the matcher).
fn line_set_p_colon() -> MiscLine {
    let table = (0..16u32)
        .map(|c| {
            let value = if c == 0 || c == 15 { 14 } else { c - 1 };
            MiscCandidate::new(toks_with(&["p", ":="], value, &[]), false)
        })
        .collect();
    MiscLine {
        tables: vec![table],
    }
}

/// All fifteen misc-class lines, indexed by the 4-bit `line` field.
pub fn misc_lines() -> [MiscLine; 16] {
    [
        line_flag_test(),          // 0
        line_clear_flag(),         // 1
        line_set_flag(),           // 2
        line_display(),            // 3
        line_data_register_to_c(), // 4 ("E")
        line_c_to_data_register(), // 5 ("C")
        line_if_p(),                // 6
        line_keyboard(),            // 7
        line_sel_rom(),              // 8
        line_set_p_arrow(),          // 9
        line_carry_utility(),        // 10
        line_set_p_shift(),          // 11 (0xB)
        line_bank_switch(),          // 12
        line_del_sel_rom(),          // 13
        line_misc_14(),              // 14
        line_set_p_colon(),          // 15 (0xF)
    ]
}

/// Order lines are attempted during dispatch. Line 4 ("E") is tried before
/// line 5 ("C") so the verbose data-register spelling can't be misread as a
/// prefix of the other class (spec.md §4.1).
pub const MISC_DISPATCH_ORDER: [usize; 16] = [4, 5, 0, 1, 2, 3, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Opcode value of the "bank switch" pseudo-branch (column 8, line 12).
pub const BANK_SWITCH_OPCODE: u16 = 0x230;
/// Low 6 bits shared by every "sel rom N" entry (line 8).
pub const SEL_ROM_LOW6: u16 = 0x020;
/// Low 6 bits shared by every "del sel rom N" entry (line 13).
pub const DEL_SEL_ROM_LOW6: u16 = 0x034;

pub fn encode_misc(column: usize, line: usize) -> u16 {
    ((column as u16) << 6) | ((line as u16) << 2)
}

/// Matches tokens against one misc line's tables, trying each table (e.g.
/// verbose then terse) in order. Returns `(column, sets_ifthen, consumed)`.
pub fn match_misc_line(tokens: &[String], line: &MiscLine) -> Option<(usize, bool, usize)> {
    for table in &line.tables {
        let candidates: Vec<Candidate> = table
            .iter()
            .map(|c| Candidate::new(c.tokens.clone()))
            .collect();
        if let Some((index, consumed)) = match_tokens(tokens, &candidates) {
            return Some((index, table[index].sets_ifthen, consumed));
        }
    }
    None
}

/// Dispatches tokens across all misc lines in `MISC_DISPATCH_ORDER`.
/// Returns `(line, column, sets_ifthen, consumed)`.
pub fn match_misc(tokens: &[String], lines: &[MiscLine; 16]) -> Option<(usize, usize, bool, usize)> {
    for &line_index in MISC_DISPATCH_ORDER.iter() {
        if let Some((column, sets_ifthen, consumed)) = match_misc_line(tokens, &lines[line_index]) {
            return Some((line_index, column, sets_ifthen, consumed));
        }
    }
    None
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchWindow {
    TenBit,
    EightBit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchTag {
    /// `then go to`: the whole word is the raw displacement, no class tag.
    Raw,
    Jsb,
    GoTo,
}

#[derive(Clone, Debug)]
pub struct BranchEntry {
    pub tokens: Vec<&'static str>,
    pub window: BranchWindow,
    pub requires_ifthen: bool,
    pub requires_cy: bool,
    pub clears_ifthen: bool,
    pub clears_cy: bool,
    pub tag: BranchTag,
}

/// The five branch mnemonics, in the table order spec.md §4.1 lists them;
/// order also doubles as match priority (none of the five phrases overlap,
/// so order only matters for documentation here).
pub fn branch_table() -> [BranchEntry; 5] {
    [
        BranchEntry {
            tokens: vec!["then", "go", "to"],
            window: BranchWindow::TenBit,
            requires_ifthen: true,
            requires_cy: false,
            clears_ifthen: true,
            clears_cy: false,
            tag: BranchTag::Raw,
        },
        BranchEntry {
            tokens: vec!["if", "n/c", "go", "to"],
            window: BranchWindow::EightBit,
            requires_ifthen: false,
            requires_cy: true,
            clears_ifthen: false,
            clears_cy: true,
            tag: BranchTag::GoTo,
        },
        BranchEntry {
            tokens: vec!["go", "to"],
            window: BranchWindow::EightBit,
            requires_ifthen: false,
            requires_cy: false,
            clears_ifthen: false,
            clears_cy: true,
            tag: BranchTag::GoTo,
        },
        BranchEntry {
            tokens: vec!["jsb"],
            window: BranchWindow::EightBit,
            requires_ifthen: false,
            requires_cy: false,
            clears_ifthen: false,
            clears_cy: true,
            tag: BranchTag::Jsb,
        },
        BranchEntry {
            tokens: vec!["if", "no", "carry", "go", "to"],
            window: BranchWindow::EightBit,
            requires_ifthen: false,
            requires_cy: false,
            clears_ifthen: false,
            clears_cy: true,
            tag: BranchTag::GoTo,
        },
    ]
}

pub fn match_branch(tokens: &[String], table: &[BranchEntry; 5]) -> Option<(usize, usize)> {
    let candidates: Vec<Candidate> = table
        .iter()
        .map(|e| Candidate::new(e.tokens.iter().copied()))
        .collect();
    match_tokens(tokens, &candidates)
}

/// A word decoded back into the table entry it came from (test-only; see
/// [`disassemble`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    Arith { column: usize, tef: usize },
    Misc { line: usize, column: usize },
    Branch { tag: BranchTag, dist: u16 },
}

/// Classifies a 10-bit word by its low two bits the way the hardware does:
/// `10` is arithmetic, `00` is misc, `01`/`11` are `jsb`/`go to`. This can't
/// tell a `then go to` word apart from an arithmetic or misc word with the
/// same low bits — on real Woodstock silicon that word's class is decided by
/// whether the *previous* instruction left `ifthen` set, not by its own bit
/// pattern, so a standalone decoder is only unambiguous for the other four
/// classes. Used by tests to check the "encoding bijection" and "prefix
/// correctness" invariants, not exposed as a CLI disassembler (a Non-goal).
pub fn disassemble(word: u16) -> Decoded {
    match word & 0b11 {
        0b10 => Decoded::Arith {
            column: ((word >> 5) & 0x1F) as usize,
            tef: ((word >> 2) & 0x7) as usize,
        },
        0b01 => Decoded::Branch {
            tag: BranchTag::Jsb,
            dist: (word >> 2) & 0xFF,
        },
        0b11 => Decoded::Branch {
            tag: BranchTag::GoTo,
            dist: (word >> 2) & 0xFF,
        },
        _ => Decoded::Misc {
            line: ((word >> 2) & 0xF) as usize,
            column: ((word >> 6) & 0xF) as usize,
        },
    }
}

/// Canonical mnemonic for a decoded word: the first (lowest-index) table
/// entry that encodes to it, which is also the spelling the encoder would
/// have produced on a fresh assembly (spec.md §9's first-wins rule for the
/// duplicate misc columns).
pub fn mnemonic_for(decoded: &Decoded) -> String {
    match decoded {
        Decoded::Arith { column, tef } => {
            let templates = arith_templates();
            let tmpl = &templates[*column];
            let (head, last) = tmpl.tokens.split_at(tmpl.tokens.len() - 1);
            let mut phrase: Vec<String> = head.iter().map(|t| t.to_string()).collect();
            phrase.push(format!("{}[{}]", last[0], TEF_NAMES[*tef]));
            phrase.join(" ")
        }
        Decoded::Misc { line, column } => {
            let lines = misc_lines();
            let table = &lines[*line].tables[0];
            table[*column].tokens.join(" ")
        }
        Decoded::Branch { tag, dist } => match tag {
            BranchTag::Jsb => format!("jsb ${:02X}", dist),
            BranchTag::GoTo => format!("go to ${:02X}", dist),
            BranchTag::Raw => unreachable!("then go to has no standalone encoding"),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn t(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arith_scenario_a_plus_c_arrow_c_w() {
        let tokens = t(&["a", "+", "c", "->", "c[w]"]);
        let (column, tef) = match_arith(&tokens).expect("should match");
        assert_eq!(column, 12);
        assert_eq!(tef, 6);
        assert_eq!(encode_arith(column, tef), 0x19A);
    }

    #[test]
    fn arith_carry_and_ifthen_flags() {
        let templates = arith_templates();
        assert!(templates[12].sets_carry);
        for i in 22..=27 {
            assert!(templates[i].sets_ifthen);
        }
        assert!(!templates[0].sets_carry);
    }

    #[test]
    fn bank_switch_opcode_is_0x230() {
        assert_eq!(encode_misc(8, 12), BANK_SWITCH_OPCODE);
    }

    #[test]
    fn sel_rom_low6_is_0x020() {
        assert_eq!(encode_misc(0, 8) & 0x3F, SEL_ROM_LOW6);
        assert_eq!(encode_misc(15, 8) & 0x3F, SEL_ROM_LOW6);
    }

    #[test]
    fn del_sel_rom_low6_is_0x034() {
        assert_eq!(encode_misc(0, 13) & 0x3F, DEL_SEL_ROM_LOW6);
    }

    #[test]
    fn misc_first_wins_duplicate_value() {
        let lines = misc_lines();
        let tokens = t(&["1", "->", "p"]);
        let (column, _, _) = match_misc_line(&tokens, &lines[9]).unwrap();
        assert_eq!(column, 1, "lower column should win over the duplicate at 9");
    }

    #[test]
    fn misc_e_class_dispatches_before_c_class() {
        let lines = misc_lines();
        let tokens = t(&["data", "register", "3", "->", "c"]);
        let (line, column, _, _) = match_misc(&tokens, &lines).unwrap();
        assert_eq!(line, 4);
        assert_eq!(column, 3);
    }

    #[test]
    fn branch_table_matches_if_n_c_go_to() {
        let table = branch_table();
        let tokens = t(&["if", "n/c", "go", "to", ".loop"]);
        let (index, consumed) = match_branch(&tokens, &table).unwrap();
        assert_eq!(index, 1);
        assert_eq!(consumed, 4);
    }

    #[test]
    fn arith_word_disassembles_to_its_own_column_and_tef() {
        let tokens = t(&["a", "+", "c", "->", "c[w]"]);
        let (column, tef) = match_arith(&tokens).unwrap();
        let word = encode_arith(column, tef);
        assert_eq!(disassemble(word), Decoded::Arith { column, tef });
        assert_eq!(mnemonic_for(&disassemble(word)), "a + c -> c[w]");
    }

    #[test]
    fn misc_word_disassembles_to_its_own_line_and_column() {
        let lines = misc_lines();
        let tokens = t(&["bank", "switch"]);
        let (line, column, _, _) = match_misc(&tokens, &lines).unwrap();
        let word = encode_misc(column, line);
        assert_eq!(disassemble(word), Decoded::Misc { line, column });
        assert_eq!(mnemonic_for(&disassemble(word)), "bank switch");
    }

    #[test]
    fn duplicate_misc_text_disassembles_to_a_mnemonic_in_the_same_table() {
        // line 9, columns 1 and 9 both spell "1 -> p"; they are distinct
        // words (the column field differs), and each must disassemble back
        // to that same text, even though assembling "1 -> p" only ever
        // reaches column 1 (match_misc_line's first-wins).
        let word_col1 = encode_misc(1, 9);
        let word_col9 = encode_misc(9, 9);
        assert_ne!(word_col1, word_col9);
        assert_eq!(mnemonic_for(&disassemble(word_col1)), "1 -> p");
        assert_eq!(mnemonic_for(&disassemble(word_col9)), "1 -> p");
    }

    #[test]
    fn goto_and_jsb_words_disassemble_by_their_low_tag_bits() {
        let goto_word = (0x42 << 2) | 0b11;
        let jsb_word = (0x42 << 2) | 0b01;
        assert_eq!(
            disassemble(goto_word),
            Decoded::Branch {
                tag: BranchTag::GoTo,
                dist: 0x42
            }
        );
        assert_eq!(
            disassemble(jsb_word),
            Decoded::Branch {
                tag: BranchTag::Jsb,
                dist: 0x42
            }
        );
        assert_eq!(mnemonic_for(&disassemble(goto_word)), "go to $42");
        assert_eq!(mnemonic_for(&disassemble(jsb_word)), "jsb $42");
    }
}
