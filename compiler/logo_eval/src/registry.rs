//! Procedure registry: name to primitive or user procedure.
//!
//! Names are case-folded. A user procedure shadows a primitive of the same
//! name. Defining or erasing a user procedure bumps the registry
//! generation, which invalidates every cached parse (arity may have
//! changed).

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use logo_value::{fold_name, Arity, EvalResult, Handle, Procedure};

use crate::interpreter::Interpreter;

bitflags! {
    /// What a primitive does with its result and the control stack.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Capability: u8 {
        /// Always outputs a value.
        const OUTPUTS = 1 << 0;
        /// Outputs a value only sometimes (RUN, IF, CATCH).
        const MAY_OUTPUT = 1 << 1;
        /// Never outputs.
        const COMMAND = 1 << 2;
        /// Can block the worker waiting on the front end.
        const SUSPENDS = 1 << 3;
        /// Can return a control value (OUTPUT, STOP, THROW, GOTO).
        const CONTROL = 1 << 4;
    }
}

/// Native implementation of a primitive.
pub type PrimitiveFn = fn(&mut Interpreter, &[Handle]) -> EvalResult;

/// A built-in procedure.
#[derive(Copy, Clone)]
pub struct PrimitiveDescriptor {
    /// Canonical (case-folded) name.
    pub name: &'static str,
    pub arity: Arity,
    pub capability: Capability,
    pub func: PrimitiveFn,
}

/// Result of resolving a procedure name.
#[derive(Clone)]
pub enum Resolved {
    Procedure(Handle),
    Primitive(PrimitiveDescriptor),
}

#[derive(Default)]
pub struct ProcedureRegistry {
    primitives: FxHashMap<String, PrimitiveDescriptor>,
    procedures: FxHashMap<String, Handle>,
    buried: FxHashSet<String>,
    generation: u64,
}

impl ProcedureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a primitive under its name and each alias.
    pub fn register_primitive(&mut self, descriptor: PrimitiveDescriptor, aliases: &[&str]) {
        for alias in aliases {
            self.primitives.insert(fold_name(alias), descriptor);
        }
        self.primitives
            .insert(fold_name(descriptor.name), descriptor);
    }

    /// Resolve a name, preferring a user procedure over a primitive.
    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        let key = fold_name(name);
        if let Some(procedure) = self.procedures.get(&key) {
            return Some(Resolved::Procedure(procedure.clone()));
        }
        self.primitives
            .get(&key)
            .map(|descriptor| Resolved::Primitive(*descriptor))
    }

    pub fn arity(&self, name: &str) -> Option<Arity> {
        match self.resolve(name)? {
            Resolved::Procedure(handle) => handle.as_procedure().map(|p| p.arity),
            Resolved::Primitive(descriptor) => Some(descriptor.arity),
        }
    }

    /// Install a user procedure, replacing any previous definition.
    ///
    /// The old `Procedure` is never mutated; handles to it stay valid.
    pub fn define(&mut self, procedure: Procedure) -> Handle {
        let name = procedure.name.clone();
        let handle = Handle::procedure(procedure);
        let replaced = self.procedures.insert(name.clone(), handle.clone());
        self.generation += 1;
        debug!(
            name = %name,
            redefined = replaced.is_some(),
            generation = self.generation,
            "define procedure"
        );
        handle
    }

    /// Remove a user procedure.
    pub fn erase(&mut self, name: &str) -> bool {
        let removed = self.procedures.remove(&fold_name(name)).is_some();
        if removed {
            self.generation += 1;
        }
        removed
    }

    /// Remove every user procedure that is not buried.
    pub fn erase_all(&mut self) {
        let buried = &self.buried;
        self.procedures.retain(|name, _| buried.contains(name));
        self.generation += 1;
    }

    pub fn procedure(&self, name: &str) -> Option<Handle> {
        self.procedures.get(&fold_name(name)).cloned()
    }

    pub fn is_primitive(&self, name: &str) -> bool {
        self.primitives.contains_key(&fold_name(name))
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.procedures.contains_key(&fold_name(name))
    }

    /// Sorted names of user procedures that pass `filter`.
    pub fn procedure_names(&self, filter: impl Fn(&str) -> bool) -> Vec<String> {
        let mut names: Vec<String> = self
            .procedures
            .keys()
            .filter(|name| filter(name))
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Source text of a user procedure.
    pub fn procedure_text(&self, name: &str) -> Option<String> {
        self.procedure(name)
            .and_then(|handle| handle.as_procedure().map(|p| p.source.clone()))
    }

    /// Hide a name from listings, SAVE and ERALL.
    pub fn bury(&mut self, name: &str) {
        self.buried.insert(fold_name(name));
    }

    pub fn unbury(&mut self, name: &str) {
        self.buried.remove(&fold_name(name));
    }

    pub fn is_buried(&self, name: &str) -> bool {
        self.buried.contains(&fold_name(name))
    }

    /// Bumped on every change that can alter a parse.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests;
