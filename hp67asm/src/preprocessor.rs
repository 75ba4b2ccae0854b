//! Conditional-assembly preprocessor (spec.md §4.3): `#define` and the
//! `#if/#ifdef/#ifndef/#elif/#else/#endif` stack.

use crate::error::{AssembleError, ErrorKind, Result};
use crate::grammar;
use std::collections::HashMap;

/// One level of the conditional-assembly stack. `active` already folds in
/// every enclosing frame's state, so callers never need to walk the stack
/// to know whether output is currently enabled.
#[derive(Clone, Copy, Debug)]
struct Frame {
    active: bool,
    seen_true: bool,
}

pub struct Preprocessor {
    defines: HashMap<String, i64>,
    stack: Vec<Frame>,
}

impl Preprocessor {
    pub fn new() -> Preprocessor {
        Preprocessor {
            defines: HashMap::new(),
            stack: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.stack.last().map_or(true, |f| f.active)
    }

    pub fn defines(&self) -> &HashMap<String, i64> {
        &self.defines
    }

    /// Active state of the frame enclosing the current `#if`/`#elif`/`#else`
    /// group — what `#elif`/`#else` gate their own evaluation on.
    fn enclosing_active(&self) -> bool {
        if self.stack.len() <= 1 {
            true
        } else {
            self.stack[self.stack.len() - 2].active
        }
    }

    /// Handles one directive line (tokens with the leading `#...` already
    /// identified as `directive`, arguments as the rest). Returns `Ok(true)`
    /// if the line was a recognized directive (consumed), `Ok(false)` if it
    /// wasn't a directive at all and the caller should treat it as normal
    /// source.
    pub fn handle(&mut self, directive: &str, rest: &[String]) -> Result<()> {
        match directive {
            "#define" => self.handle_define(rest),
            "#if" => self.handle_if(rest),
            "#ifdef" => self.handle_ifdef(rest, false),
            "#ifndef" => self.handle_ifdef(rest, true),
            "#elif" => self.handle_elif(rest),
            "#else" => self.handle_else(),
            "#endif" => self.handle_endif(),
            "#error" => self.handle_error(rest),
            other => {
                if self.is_active() {
                    Err(AssembleError::new(
                        ErrorKind::Syntax,
                        format!("unknown preprocessor directive \"{}\"", other),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    fn handle_define(&mut self, rest: &[String]) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        if rest.len() != 2 {
            return Err(AssembleError::new(
                ErrorKind::Syntax,
                "#define requires exactly a name and a value",
            ));
        }
        let name = &rest[0];
        let value = grammar::parse_int(&rest[1])?;
        if self.defines.contains_key(name) {
            return Err(AssembleError::new(
                ErrorKind::Semantic,
                format!("redefinition of \"{}\"", name),
            ));
        }
        self.defines.insert(name.clone(), value);
        Ok(())
    }

    fn handle_if(&mut self, rest: &[String]) -> Result<()> {
        let parent_active = self.is_active();
        let expr = rest.join(" ");
        let active = parent_active && grammar::eval_expr(&expr, &self.defines)? > 0;
        self.stack.push(Frame {
            active,
            seen_true: active,
        });
        Ok(())
    }

    fn handle_ifdef(&mut self, rest: &[String], negate: bool) -> Result<()> {
        let parent_active = self.is_active();
        let name = rest.first().ok_or_else(|| {
            AssembleError::new(ErrorKind::Syntax, "#ifdef/#ifndef requires a name")
        })?;
        let defined = self.defines.contains_key(name);
        let test = if negate { !defined } else { defined };
        let active = parent_active && test;
        self.stack.push(Frame {
            active,
            seen_true: active,
        });
        Ok(())
    }

    fn handle_elif(&mut self, rest: &[String]) -> Result<()> {
        let frame = self
            .stack
            .last()
            .copied()
            .ok_or_else(|| AssembleError::new(ErrorKind::Syntax, "#elif without #if"))?;
        let parent_active = self.enclosing_active();
        let expr = rest.join(" ");
        let active = parent_active && !frame.seen_true && grammar::eval_expr(&expr, &self.defines)? > 0;
        let top = self.stack.last_mut().unwrap();
        top.active = active;
        if active {
            top.seen_true = true;
        }
        Ok(())
    }

    fn handle_else(&mut self) -> Result<()> {
        let frame = self
            .stack
            .last()
            .copied()
            .ok_or_else(|| AssembleError::new(ErrorKind::Syntax, "#else without #if"))?;
        let parent_active = self.enclosing_active();
        let active = parent_active && !frame.seen_true;
        let top = self.stack.last_mut().unwrap();
        top.active = active;
        if active {
            top.seen_true = true;
        }
        Ok(())
    }

    fn handle_endif(&mut self) -> Result<()> {
        if self.stack.pop().is_none() {
            return Err(AssembleError::new(ErrorKind::Syntax, "#endif without #if"));
        }
        Ok(())
    }

    fn handle_error(&mut self, rest: &[String]) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }
        Err(AssembleError::new(
            ErrorKind::Semantic,
            format!("#error {}", rest.join(" ")),
        ))
    }

    /// Fatal if the stack isn't empty at end of input (an unterminated
    /// `#if`/`#ifdef`/`#ifndef`).
    pub fn finish(&self) -> Result<()> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(AssembleError::new(
                ErrorKind::Syntax,
                format!("{} unterminated conditional block(s)", self.stack.len()),
            ))
        }
    }
}

impl Default for Preprocessor {
    fn default() -> Preprocessor {
        Preprocessor::new()
    }
}
