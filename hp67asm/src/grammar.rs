//! Integer literal parsing and the single-operator `#if`/`#elif` expression
//! grammar from spec.md §4.3, built with [pest] the way `vasm` builds its
//! data-literal grammar.

use crate::error::{AssembleError, ErrorKind, Result};
use matches::debug_assert_matches;
use pest::iterators::Pair;
use pest::Parser;
use std::collections::HashMap;

#[derive(pest_derive::Parser)]
#[grammar = "grammar.pest"]
struct ExprParser;

fn syntax_err(message: impl Into<String>) -> AssembleError {
    AssembleError::new(ErrorKind::Syntax, message)
}

fn int_value(pair: Pair<Rule>) -> std::result::Result<i64, String> {
    let text = pair.as_str();
    match pair.as_rule() {
        Rule::hex_uint => i64::from_str_radix(&text[2..], 16).map_err(|e| e.to_string()),
        Rule::oct_uint => i64::from_str_radix(&text[2..], 8).map_err(|e| e.to_string()),
        Rule::bin_uint => i64::from_str_radix(&text[2..], 2).map_err(|e| e.to_string()),
        Rule::dec_int => text.parse::<i64>().map_err(|e| e.to_string()),
        other => unreachable!("unexpected integer rule {:?}", other),
    }
}

/// Parses a single integer literal (hex `0x`, octal `0o`, binary `0b`, or
/// plain decimal, optionally signed) out of an entire input string.
pub fn parse_int(input: &str) -> Result<i64> {
    let mut pairs = ExprParser::parse(Rule::int_line, input)
        .map_err(|e| syntax_err(format!("invalid integer literal \"{}\": {}", input, e)))?;
    let line_pair = pairs.next().unwrap();
    debug_assert_matches!(line_pair.as_rule(), Rule::int_line);
    let int_pair = line_pair
        .into_inner()
        .next()
        .ok_or_else(|| syntax_err(format!("invalid integer literal \"{}\"", input)))?;
    int_value(int_pair).map_err(|e| syntax_err(format!("invalid integer literal: {}", e)))
}

/// Evaluates a single-operator `#if`/`#elif` expression. `defined` is
/// consulted for bare identifiers, which resolve to `0` when absent.
pub fn eval_expr(input: &str, defines: &HashMap<String, i64>) -> Result<i64> {
    let mut pairs = ExprParser::parse(Rule::expr_line, input)
        .map_err(|e| syntax_err(format!("invalid expression \"{}\": {}", input, e)))?;
    let expr = pairs.next().unwrap();
    debug_assert_matches!(expr.as_rule(), Rule::expr_line);
    let mut inner = expr.into_inner().filter(|p| p.as_rule() != Rule::comment);

    let lhs_term = inner.next().ok_or_else(|| syntax_err("empty expression"))?;
    let lhs = term_value(lhs_term, defines)?;

    let maybe_op = inner.next();
    match maybe_op {
        None => Ok(if lhs > 0 { 1 } else { 0 }),
        Some(op_pair) => {
            let rhs_term = inner
                .next()
                .ok_or_else(|| syntax_err("operator without right-hand term"))?;
            let rhs = term_value(rhs_term, defines)?;
            let result = apply_op(op_pair.as_str(), lhs, rhs);
            Ok(if result { 1 } else { 0 })
        }
    }
}

fn term_value(pair: Pair<Rule>, defines: &HashMap<String, i64>) -> Result<i64> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::int => int_value(inner.into_inner().next().unwrap())
            .map_err(|e| syntax_err(format!("invalid integer literal: {}", e))),
        Rule::identifier => Ok(*defines.get(inner.as_str()).unwrap_or(&0)),
        other => unreachable!("unexpected term rule {:?}", other),
    }
}

fn apply_op(op: &str, lhs: i64, rhs: i64) -> bool {
    match op {
        "==" => lhs == rhs,
        "!=" => lhs != rhs,
        ">" => lhs > rhs,
        ">=" => lhs >= rhs,
        "<" => lhs < rhs,
        "<=" => lhs <= rhs,
        "&&" => (lhs & rhs) > 0,
        "||" => (lhs | rhs) > 0,
        other => unreachable!("unexpected operator {:?}", other),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_all_integer_bases() {
        assert_eq!(parse_int("42").unwrap(), 42);
        assert_eq!(parse_int("-7").unwrap(), -7);
        assert_eq!(parse_int("0x2A").unwrap(), 42);
        assert_eq!(parse_int("0o52").unwrap(), 42);
        assert_eq!(parse_int("0b101010").unwrap(), 42);
    }

    #[test]
    fn single_term_is_truthy_above_zero() {
        let defines = HashMap::new();
        assert_eq!(eval_expr("1", &defines).unwrap(), 1);
        assert_eq!(eval_expr("0", &defines).unwrap(), 0);
        assert_eq!(eval_expr("-1", &defines).unwrap(), 0);
    }

    #[test]
    fn undefined_identifier_resolves_to_zero() {
        let defines = HashMap::new();
        assert_eq!(eval_expr("UNDEFINED == 0", &defines).unwrap(), 1);
    }

    #[test]
    fn bitwise_and_or_semantics() {
        let mut defines = HashMap::new();
        defines.insert("A".to_string(), 2);
        defines.insert("B".to_string(), 1);
        assert_eq!(eval_expr("A && B", &defines).unwrap(), 0); // 2 & 1 == 0
        assert_eq!(eval_expr("A || B", &defines).unwrap(), 1); // 2 | 1 == 3 > 0
    }

    #[test]
    fn trailing_comment_is_ignored() {
        let defines = HashMap::new();
        assert_eq!(eval_expr("1 == 1 # trailing", &defines).unwrap(), 1);
        assert_eq!(eval_expr("1 == 1 // trailing", &defines).unwrap(), 1);
    }
}
