use std::fmt;

use rustc_hash::FxHashMap;

use super::{fold_name, Handle};

/// Input counts accepted by a procedure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Arity {
    /// Fewest inputs accepted.
    pub min: usize,
    /// Inputs consumed when called without parentheses.
    pub default: usize,
    /// Most inputs accepted. `None` when a rest parameter takes the excess.
    pub max: Option<usize>,
}

impl Arity {
    pub const fn new(min: usize, default: usize, max: Option<usize>) -> Self {
        Arity { min, default, max }
    }

    pub const fn fixed(n: usize) -> Self {
        Arity {
            min: n,
            default: n,
            max: Some(n),
        }
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    /// `(min, default, max)` with `max = -1` for an unbounded rest input.
    pub fn triple(&self) -> (i64, i64, i64) {
        let widen = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        (
            widen(self.min),
            widen(self.default),
            self.max.map_or(-1, widen),
        )
    }
}

/// An optional input and the instruction list computing its default.
#[derive(Clone, Debug)]
pub struct OptionalParam {
    pub name: String,
    pub default: Handle,
}

/// Index into a session's compiled-code table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(pub u32);

/// Where execution of a procedure starts, or restarts after a GOTO.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntryPoint {
    /// Line index into an interpreted body.
    Line(usize),
    /// Native entry in the compiled-code table.
    Native(EntryId),
}

#[derive(Clone, Debug)]
pub enum Body {
    /// Body lines, each an instruction list.
    Interpreted(Vec<Handle>),
    /// Main entry of a natively compiled body.
    Compiled(EntryId),
}

/// A user-defined procedure.
///
/// Procedures are immutable once built. Redefinition installs a new
/// `Procedure` in the registry; handles to the old one keep seeing the old
/// definition.
#[derive(Clone)]
pub struct Procedure {
    /// Case-folded name.
    pub name: String,
    pub required: Vec<String>,
    pub optional: Vec<OptionalParam>,
    pub rest: Option<String>,
    pub arity: Arity,
    /// Case-folded tag name to entry point.
    pub tags: FxHashMap<String, EntryPoint>,
    /// Defined with `.MACRO`: the output is run in the caller's context.
    pub is_macro: bool,
    /// Text as written, including the `TO` line and `END`.
    pub source: String,
    pub body: Body,
}

impl Procedure {
    /// Entry point for a fresh call.
    pub fn entry(&self) -> EntryPoint {
        match &self.body {
            Body::Interpreted(_) => EntryPoint::Line(0),
            Body::Compiled(id) => EntryPoint::Native(*id),
        }
    }

    pub fn tag(&self, tag: &str) -> Option<EntryPoint> {
        self.tags.get(&fold_name(tag)).copied()
    }

    /// Every parameter name in binding order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .map(String::as_str)
            .chain(self.optional.iter().map(|p| p.name.as_str()))
            .chain(self.rest.as_deref())
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("is_macro", &self.is_macro)
            .field("tags", &self.tags.len())
            .finish_non_exhaustive()
    }
}
