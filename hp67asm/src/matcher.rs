//! Ordered, prefix-based token matcher (spec.md §4.2). Candidates are tried
//! in table order; the first whose tokens equal a prefix of the input wins.
//! Matching is case-insensitive.

/// One recognizable mnemonic phrase: its literal tokens, in order.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub tokens: Vec<String>,
}

impl Candidate {
    pub fn new<I, S>(tokens: I) -> Candidate
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Candidate {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Returns `(index, consumed_tokens)` for the first candidate whose tokens
/// equal the start of `input`, or `None` if nothing matches.
pub fn match_tokens(input: &[String], candidates: &[Candidate]) -> Option<(usize, usize)> {
    'outer: for (index, candidate) in candidates.iter().enumerate() {
        if candidate.tokens.len() > input.len() {
            continue;
        }
        for (a, b) in input.iter().zip(candidate.tokens.iter()) {
            if !eq_ignore_case(a, b) {
                continue 'outer;
            }
        }
        return Some((index, candidate.tokens.len()));
    }
    None
}
