//! Instruction-list parser.
//!
//! Turns a runtime list into an AST of nested [`AstNode`] values. Arity
//! comes from the procedure registry, so a parse is only valid for the
//! registry generation it was made against. The parse of a list is cached
//! as the artifact of its first cell. It is reused only while the
//! generation is unchanged and the list still holds the very items it was
//! parsed from, so a mutation of any cell, not just the first, forces a
//! fresh parse.
//!
//! Precedence, loosest first:
//!
//! | Level          | Operators                    |
//! |----------------|------------------------------|
//! | comparison     | `=` `<` `>` `<=` `>=` `<>`   |
//! | additive       | `+` `-`                      |
//! | multiplicative | `*` `/`                      |
//! | unary          | `-`                          |
//!
//! Prefix calls take full expressions as inputs, so `print 1 + 2` prints 3.

use logo_value::{
    dont_know_how, fold_name, not_enough_inputs, paren_not_found, too_much_inside_parens,
    unexpected_paren, AstKind, AstNode, Handle, Unwind,
};

use crate::registry::ProcedureRegistry;

const OPEN: &str = "(";
const CLOSE: &str = ")";

/// Procedures implementing the infix operators.
fn infix_procedure(op: &str) -> Option<&'static str> {
    Some(match op {
        "+" => "sum",
        "-" => "difference",
        "*" => "product",
        "/" => "quotient",
        "=" => "equalp",
        "<" => "lessp",
        ">" => "greaterp",
        "<=" => "lessequalp",
        ">=" => "greaterequalp",
        "<>" => "notequalp",
        _ => return None,
    })
}

#[derive(Copy, Clone)]
enum Level {
    Comparison,
    Additive,
    Multiplicative,
}

impl Level {
    fn operators(self) -> &'static [&'static str] {
        match self {
            Level::Comparison => &["=", "<", ">", "<=", ">=", "<>"],
            Level::Additive => &["+", "-"],
            Level::Multiplicative => &["*", "/"],
        }
    }

    fn next(self) -> Option<Level> {
        match self {
            Level::Comparison => Some(Level::Additive),
            Level::Additive => Some(Level::Multiplicative),
            Level::Multiplicative => None,
        }
    }
}

/// Parse `list`, reusing its cached parse when still valid.
pub fn parse_cached(registry: &ProcedureRegistry, list: &Handle) -> Result<Handle, Unwind> {
    let generation = registry.generation();
    let Some(node) = list.as_list_node() else {
        return parse(registry, list);
    };
    let tokens = list.to_vec();
    if let Some(artifact) = node.artifact() {
        if let Some(AstKind::Sequence {
            generation: made,
            source,
        }) = artifact.as_ast().map(|a| &a.kind)
        {
            if *made == generation && same_items(source, &tokens) {
                return Ok(artifact);
            }
        }
    }
    let parsed = parse_tokens(registry, tokens)?;
    node.set_artifact(parsed.clone());
    Ok(parsed)
}

fn same_items(source: &[Handle], tokens: &[Handle]) -> bool {
    source.len() == tokens.len() && source.iter().zip(tokens).all(|(a, b)| a.ptr_eq(b))
}

/// Parse `list` into a sequence node, one child per instruction.
pub fn parse(registry: &ProcedureRegistry, list: &Handle) -> Result<Handle, Unwind> {
    parse_tokens(registry, list.to_vec())
}

fn parse_tokens(registry: &ProcedureRegistry, tokens: Vec<Handle>) -> Result<Handle, Unwind> {
    let mut parser = Parser {
        registry,
        tokens,
        pos: 0,
    };
    let mut statements = Vec::new();
    while !parser.at_end() {
        statements.push(parser.expression("run")?);
    }
    Ok(Handle::ast(AstNode::with_children(
        AstKind::Sequence {
            generation: registry.generation(),
            source: parser.tokens,
        },
        statements,
    )))
}

struct Parser<'a> {
    registry: &'a ProcedureRegistry,
    tokens: Vec<Handle>,
    pos: usize,
}

impl Parser<'_> {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek_text(&self) -> Option<&str> {
        self.tokens.get(self.pos).and_then(Handle::text)
    }

    /// Next token is missing or closes a group.
    fn at_boundary(&self) -> bool {
        self.at_end() || self.peek_text() == Some(CLOSE)
    }

    fn expression(&mut self, who: &str) -> Result<Handle, Unwind> {
        self.binary(Level::Comparison, who)
    }

    fn binary(&mut self, level: Level, who: &str) -> Result<Handle, Unwind> {
        let mut left = self.operand(level, who)?;
        while let Some(op) = self
            .peek_text()
            .filter(|t| level.operators().contains(t))
            .and_then(infix_procedure)
        {
            self.pos += 1;
            let right = self.operand(level, op)?;
            left = call(op, vec![left, right]);
        }
        Ok(left)
    }

    fn operand(&mut self, level: Level, who: &str) -> Result<Handle, Unwind> {
        match level.next() {
            Some(next) => self.binary(next, who),
            None => self.unary(who),
        }
    }

    fn unary(&mut self, who: &str) -> Result<Handle, Unwind> {
        if self.peek_text() == Some("-") {
            self.pos += 1;
            let operand = self.unary("minus")?;
            return Ok(call("minus", vec![operand]));
        }
        self.primary(who)
    }

    fn primary(&mut self, who: &str) -> Result<Handle, Unwind> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(not_enough_inputs(who));
        };
        self.pos += 1;
        let Some(text) = token.text() else {
            return Ok(literal(token));
        };
        if token.as_number().is_some() {
            return Ok(literal(token));
        }
        if let Some(word) = text.strip_prefix('"') {
            return Ok(literal(Handle::word(word)));
        }
        if let Some(name) = text.strip_prefix(':') {
            return Ok(Handle::ast(AstNode::leaf(AstKind::Variable(fold_name(name)))));
        }
        match text {
            OPEN => self.group(),
            CLOSE => Err(unexpected_paren()),
            _ if infix_procedure(text).is_some() => Err(not_enough_inputs(who)),
            _ => {
                let name = fold_name(text);
                self.call(&name, false)
            }
        }
    }

    /// Parse a call. Inside parentheses (`explicit`) inputs run to the
    /// closing `)`.
    fn call(&mut self, name: &str, explicit: bool) -> Result<Handle, Unwind> {
        if name == "to" || name == ".macro" {
            self.pos = self.tokens.len();
            return Ok(call(name, Vec::new()));
        }
        let arity = self
            .registry
            .arity(name)
            .ok_or_else(|| dont_know_how(name))?;
        let mut inputs = Vec::new();
        if explicit {
            while !self.at_boundary() {
                inputs.push(self.expression(name)?);
            }
            if self.at_end() {
                return Err(paren_not_found());
            }
            if inputs.len() < arity.min {
                return Err(not_enough_inputs(name));
            }
            if !arity.accepts(inputs.len()) {
                return Err(too_much_inside_parens());
            }
        } else {
            for index in 0..arity.default {
                if self.at_boundary() {
                    if index >= arity.min {
                        break;
                    }
                    return Err(not_enough_inputs(name));
                }
                inputs.push(self.expression(name)?);
            }
        }
        Ok(call(name, inputs))
    }

    /// After `(`: a variadic call or a grouped expression.
    fn group(&mut self) -> Result<Handle, Unwind> {
        let starts_call = self.tokens.get(self.pos).is_some_and(is_call_word);
        let inner = if starts_call {
            let name = self.peek_text().map(fold_name).unwrap_or_default();
            self.pos += 1;
            self.call(&name, true)?
        } else {
            let inner = self.expression("(")?;
            if self.at_end() {
                return Err(paren_not_found());
            }
            if self.peek_text() != Some(CLOSE) {
                return Err(too_much_inside_parens());
            }
            inner
        };
        // Skip the closing paren.
        self.pos += 1;
        Ok(inner)
    }
}

/// A bare word that names a procedure.
fn is_call_word(token: &Handle) -> bool {
    match token.text() {
        Some(text) => {
            token.as_number().is_none()
                && !text.starts_with(['"', ':'])
                && text != OPEN
                && text != CLOSE
                && infix_procedure(text).is_none()
        }
        None => false,
    }
}

fn literal(value: Handle) -> Handle {
    Handle::ast(AstNode::leaf(AstKind::Literal(value)))
}

fn call(name: &str, inputs: Vec<Handle>) -> Handle {
    Handle::ast(AstNode::with_children(AstKind::Call(name.to_string()), inputs))
}

#[cfg(test)]
mod tests;
