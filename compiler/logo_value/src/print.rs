//! Rendering values as text.
//!
//! Rendering stops with a `...` marker when it reaches the depth or width
//! limit, or when it meets a node that is already on the current path.

use bitflags::bitflags;

use crate::guard::VisitedSet;
use crate::value::{ArrayValue, Datum, Handle};

bitflags! {
    /// How a value is rendered.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct PrintFlags: u8 {
        /// Bracket the outermost list, as SHOW does. PRINT leaves them off.
        const SHOW_BRACKETS = 1 << 0;
        /// Bar-quote words that would not read back as a single word.
        const FULL_PRINT = 1 << 1;
    }
}

/// Depth and width limits. `None` is unlimited.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintLimits {
    /// Nesting depth at which sublists render as `...`.
    pub depth: Option<usize>,
    /// Items shown per list or array before `...`.
    pub width: Option<usize>,
}

impl PrintLimits {
    pub const NONE: PrintLimits = PrintLimits {
        depth: None,
        width: None,
    };

    pub const fn new(depth: Option<usize>, width: Option<usize>) -> Self {
        PrintLimits { depth, width }
    }
}

const TRUNCATED: &str = "...";

pub(crate) fn render(
    value: &Handle,
    flags: PrintFlags,
    limits: PrintLimits,
    guard: &mut VisitedSet,
) -> String {
    let mut renderer = Renderer {
        out: String::new(),
        flags,
        limits,
        guard,
    };
    renderer.value(value, 0, flags.contains(PrintFlags::SHOW_BRACKETS));
    renderer.out
}

struct Renderer<'a> {
    out: String,
    flags: PrintFlags,
    limits: PrintLimits,
    guard: &'a mut VisitedSet,
}

impl Renderer<'_> {
    fn value(&mut self, value: &Handle, depth: usize, brackets: bool) {
        match value.datum() {
            Datum::Atom(atom) => self.word(atom.text()),
            Datum::EmptyList => {
                if brackets {
                    self.out.push_str("[]");
                }
            }
            Datum::List(_) => self.list(value, depth, brackets),
            Datum::Array(array) => self.array(value, array, depth),
            Datum::Procedure(procedure) => self.out.push_str(procedure.source.trim_end()),
            Datum::Ast(node) => {
                self.out.push_str("<ast ");
                self.out.push_str(node.name());
                self.out.push('>');
            }
            Datum::Control(control) => {
                self.out.push('<');
                self.out.push_str(control.short_name());
                self.out.push('>');
            }
            Datum::Nothing => {}
        }
    }

    fn word(&mut self, text: &str) {
        if self.flags.contains(PrintFlags::FULL_PRINT) && needs_bars(text) {
            self.out.push('|');
            for c in text.chars() {
                if c == '|' {
                    self.out.push('\\');
                }
                self.out.push(c);
            }
            self.out.push('|');
        } else {
            self.out.push_str(text);
        }
    }

    fn too_deep(&self, depth: usize) -> bool {
        self.limits.depth.is_some_and(|limit| depth >= limit)
    }

    fn too_wide(&self, count: usize) -> bool {
        self.limits.width.is_some_and(|limit| count >= limit)
    }

    fn list(&mut self, list: &Handle, depth: usize, brackets: bool) {
        if self.too_deep(depth) || !self.guard.insert(list) {
            self.out.push_str(TRUNCATED);
            return;
        }
        let mut entered = vec![list.clone()];
        if brackets {
            self.out.push('[');
        }
        let mut current = list.clone();
        let mut count = 0;
        while let Some(node) = current.as_list_node() {
            if count > 0 {
                self.out.push(' ');
                if !self.guard.insert(&current) {
                    self.out.push_str(TRUNCATED);
                    break;
                }
                entered.push(current.clone());
            }
            if self.too_wide(count) {
                self.out.push_str(TRUNCATED);
                break;
            }
            let head = node.head();
            let next = node.tail();
            self.value(&head, depth + 1, true);
            count += 1;
            current = next;
        }
        if brackets {
            self.out.push(']');
        }
        for node in &entered {
            self.guard.remove(node);
        }
    }

    fn array(&mut self, handle: &Handle, array: &ArrayValue, depth: usize) {
        if self.too_deep(depth) || !self.guard.insert(handle) {
            self.out.push_str(TRUNCATED);
            return;
        }
        self.out.push('{');
        for (i, item) in array.items().iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            if self.too_wide(i) {
                self.out.push_str(TRUNCATED);
                break;
            }
            self.value(item, depth + 1, true);
        }
        self.out.push('}');
        if array.origin() != 1 {
            self.out.push('@');
            self.out.push_str(&array.origin().to_string());
        }
        self.guard.remove(handle);
    }
}

fn needs_bars(text: &str) -> bool {
    text.is_empty()
        || text.chars().any(|c| {
            c.is_whitespace() || matches!(c, '[' | ']' | '{' | '}' | '(' | ')' | '|' | ';' | '\\')
        })
}

#[cfg(test)]
mod tests;
