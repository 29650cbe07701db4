//! Runtime values for the Logo interpreter.
//!
//! Every value is reached through a [`Handle`], a reference-counted pointer
//! to a [`Datum`]. Cloning a handle retains, dropping releases. Values are
//! allocated only through the factory methods on `Handle` and
//! [`Constants`], so the Nothing sentinel and the empty list stay unique
//! per session.

mod array;
mod ast;
mod atom;
mod list;
mod procedure;


use std::fmt;
use std::rc::Rc;

use crate::control::Control;
use crate::guard::VisitedSet;
use crate::print::{render, PrintFlags, PrintLimits};

pub use array::ArrayValue;
pub use ast::{AstKind, AstNode};
pub use atom::{parse_number, Atom};
pub use list::{ListCursor, ListNode};
pub use procedure::{Arity, Body, EntryId, EntryPoint, OptionalParam, Procedure};

/// The closed set of runtime value shapes.
pub enum Datum {
    /// A word. Numbers and booleans are words with a cached interpretation.
    Atom(Atom),
    /// A cons cell. The tail is another `List` or the `EmptyList`.
    List(ListNode),
    /// The list terminator. One per session, owned by [`Constants`].
    EmptyList,
    Array(ArrayValue),
    Procedure(Procedure),
    /// A parsed instruction, cached on the list it was parsed from.
    Ast(AstNode),
    /// A non-local transfer travelling through ordinary return values.
    Control(Control),
    /// The result of a command. One per session, owned by [`Constants`].
    Nothing,
}

/// Reference-counted pointer to a runtime value.
///
/// Identity (`ptr_eq`, `id`) is physical: two handles are the same value
/// only if they point at the same allocation.
#[derive(Clone)]
pub struct Handle(Rc<Datum>);

// Factory methods

impl Handle {
    #[inline]
    pub(crate) fn new(datum: Datum) -> Self {
        Handle(Rc::new(datum))
    }

    /// Create a word from its text.
    #[inline]
    pub fn word(text: impl Into<Box<str>>) -> Self {
        Handle::new(Datum::Atom(Atom::new(text)))
    }

    /// Create a numeric word. Its text is the canonical rendering of `n`.
    #[inline]
    pub fn number(n: f64) -> Self {
        Handle::new(Datum::Atom(Atom::from_number(n)))
    }

    /// Create the word `true` or `false`.
    #[inline]
    pub fn boolean(b: bool) -> Self {
        Handle::new(Datum::Atom(Atom::from_bool(b)))
    }

    /// Create a single cons cell.
    #[inline]
    pub fn cons(head: Handle, tail: Handle) -> Self {
        Handle::new(Datum::List(ListNode::new(head, tail)))
    }

    /// Create an array with the given origin and contents.
    #[inline]
    pub fn array(origin: i64, items: Vec<Handle>) -> Self {
        Handle::new(Datum::Array(ArrayValue::new(origin, items)))
    }

    #[inline]
    pub fn procedure(procedure: Procedure) -> Self {
        Handle::new(Datum::Procedure(procedure))
    }

    #[inline]
    pub fn ast(node: AstNode) -> Self {
        Handle::new(Datum::Ast(node))
    }

    #[inline]
    pub fn control(control: Control) -> Self {
        Handle::new(Datum::Control(control))
    }
}

// Accessors

impl Handle {
    #[inline]
    pub fn datum(&self) -> &Datum {
        &self.0
    }

    /// Physical identity.
    #[inline]
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address-derived identity key for cycle guards.
    #[inline]
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Current number of live handles to this value.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn is_nothing(&self) -> bool {
        matches!(*self.0, Datum::Nothing)
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(*self.0, Datum::EmptyList)
    }

    /// True for cons cells and the empty list.
    pub fn is_list(&self) -> bool {
        matches!(*self.0, Datum::List(_) | Datum::EmptyList)
    }

    pub fn is_word(&self) -> bool {
        matches!(*self.0, Datum::Atom(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(*self.0, Datum::Array(_))
    }

    pub fn is_control(&self) -> bool {
        matches!(*self.0, Datum::Control(_))
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match &*self.0 {
            Datum::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Text of a word.
    pub fn text(&self) -> Option<&str> {
        self.as_atom().map(Atom::text)
    }

    /// Numeric interpretation of a word, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        self.as_atom().and_then(Atom::number)
    }

    /// Boolean interpretation of a word, if it has one.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_atom().and_then(Atom::boolean)
    }

    pub fn as_list_node(&self) -> Option<&ListNode> {
        match &*self.0 {
            Datum::List(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match &*self.0 {
            Datum::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_procedure(&self) -> Option<&Procedure> {
        match &*self.0 {
            Datum::Procedure(procedure) => Some(procedure),
            _ => None,
        }
    }

    pub fn as_ast(&self) -> Option<&AstNode> {
        match &*self.0 {
            Datum::Ast(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_control(&self) -> Option<&Control> {
        match &*self.0 {
            Datum::Control(control) => Some(control),
            _ => None,
        }
    }

    /// Cursor over the items of a list. Yields nothing for non-lists.
    pub fn cursor(&self) -> ListCursor {
        ListCursor::new(self)
    }

    /// Collect the items of a list, stopping at the first repeated node.
    pub fn to_vec(&self) -> Vec<Handle> {
        let mut seen = VisitedSet::new();
        let mut items = Vec::new();
        let mut current = self.clone();
        while let Some(node) = current.as_list_node() {
            if !seen.insert(&current) {
                break;
            }
            items.push(node.head());
            let next = node.tail();
            current = next;
        }
        items
    }

    /// Render this value as text.
    ///
    /// `visited` lets a caller share one guard across several renderings;
    /// when `None` a fresh guard is used.
    pub fn to_logo_string(
        &self,
        flags: PrintFlags,
        limits: PrintLimits,
        visited: Option<&mut VisitedSet>,
    ) -> String {
        match visited {
            Some(guard) => render(self, flags, limits, guard),
            None => render(self, flags, limits, &mut VisitedSet::new()),
        }
    }

    /// Render the way SHOW does, with no limits.
    pub fn show(&self) -> String {
        self.to_logo_string(PrintFlags::SHOW_BRACKETS, PrintLimits::NONE, None)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_logo_string(PrintFlags::empty(), PrintLimits::NONE, None))
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let limits = PrintLimits::new(Some(8), Some(32));
        f.write_str(&self.to_logo_string(PrintFlags::SHOW_BRACKETS, limits, None))
    }
}

/// Session-owned singletons.
///
/// Exactly one Nothing sentinel and one empty list exist per session; they
/// are never freed while the session holds its `Constants`.
pub struct Constants {
    nothing: Handle,
    empty_list: Handle,
}

impl Constants {
    pub fn new() -> Self {
        Constants {
            nothing: Handle::new(Datum::Nothing),
            empty_list: Handle::new(Datum::EmptyList),
        }
    }

    #[inline]
    pub fn nothing(&self) -> Handle {
        self.nothing.clone()
    }

    #[inline]
    pub fn empty_list(&self) -> Handle {
        self.empty_list.clone()
    }

    /// Build a fresh list from items, terminated by the session's empty list.
    pub fn list<I>(&self, items: I) -> Handle
    where
        I: IntoIterator<Item = Handle>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(self.empty_list(), |tail, head| Handle::cons(head, tail))
    }

    /// Build a list onto an existing tail, sharing it.
    pub fn list_onto<I>(&self, items: I, tail: Handle) -> Handle
    where
        I: IntoIterator<Item = Handle>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(tail, |tail, head| Handle::cons(head, tail))
    }
}

impl Default for Constants {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-fold a procedure, variable or tag name.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
