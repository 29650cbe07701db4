//! Procedure calls and activations.
//!
//! Every call goes through [`Interpreter::call_procedure`] or
//! [`Interpreter::call_value`]. An activation intercepts the control
//! values addressed to it:
//!
//! - `Return`: the activation's result (STOP returns Nothing).
//! - `Goto`: re-enter the body at the tag's entry point.
//! - `Error`: recovered by ERRACT when one is set, otherwise passed on.
//! - `Continuation`: passed to the caller after the frame is popped; the
//!   caller then invokes the target in place of this activation. The
//!   popped frame's bindings are handed over to the target's frame, so the
//!   target still sees the variables it would have seen as a nested call.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::trace;

use logo_value::{
    didnt_output, doesnt_like, dont_know_how, dont_say_what_to_do, fold_name, macro_returned,
    no_tag, not_enough_inputs, too_much_inside_parens, AstKind, Body, Control, EntryId,
    EntryPoint, ErrorKind, EvalResult, Handle, Procedure, Unwind,
};

use super::{Interpreter, RunMode};
use crate::code::CompiledEntry;
use crate::definition::parse_header;
use crate::parse::parse_cached;
use crate::reader::read_line;
use crate::registry::{PrimitiveDescriptor, Resolved};
use crate::stack::ensure_sufficient_stack;

impl Interpreter {
    /// Call a procedure by name.
    #[tracing::instrument(level = "trace", skip(self, args))]
    pub fn call_procedure(&mut self, name: &str, args: &[Handle]) -> EvalResult {
        ensure_sufficient_stack(|| {
            let result = self.dispatch_name(name, args);
            self.resolve_continuation(result)
        })
    }

    /// Call a procedure value, or a word naming a procedure.
    pub fn call_value(&mut self, target: &Handle, args: &[Handle]) -> EvalResult {
        ensure_sufficient_stack(|| {
            let result = self.dispatch(target, args);
            self.resolve_continuation(result)
        })
    }

    fn dispatch(&mut self, target: &Handle, args: &[Handle]) -> EvalResult {
        if target.as_procedure().is_some() {
            return self.invoke(target, args);
        }
        match target.text() {
            Some(name) => self.dispatch_name(name, args),
            None => Err(doesnt_like("apply", target)),
        }
    }

    fn dispatch_name(&mut self, name: &str, args: &[Handle]) -> EvalResult {
        match self.registry.resolve(name) {
            Some(Resolved::Procedure(procedure)) => self.invoke(&procedure, args),
            Some(Resolved::Primitive(descriptor)) => self.invoke_primitive(&descriptor, args),
            None => Err(dont_know_how(name)),
        }
    }

    fn invoke_primitive(&mut self, descriptor: &PrimitiveDescriptor, args: &[Handle]) -> EvalResult {
        if args.len() < descriptor.arity.min {
            return Err(not_enough_inputs(descriptor.name));
        }
        if !descriptor.arity.accepts(args.len()) {
            return Err(too_much_inside_parens());
        }
        (descriptor.func)(self, args)
    }

    /// Invoke continuations until a call finishes without one.
    fn resolve_continuation(&mut self, mut result: EvalResult) -> EvalResult {
        loop {
            let continuation = match &result {
                Err(unwind) => match unwind.control() {
                    Control::Continuation { target, args } => Some((target.clone(), args.to_vec())),
                    _ => None,
                },
                Ok(_) => None,
            };
            let Some((target, args)) = continuation else {
                return result;
            };
            trace!(target = %target, "continuation");
            result = self.dispatch(&target, &args);
            self.frames.clear_handover();
        }
    }

    /// Run a user procedure on `args`.
    pub fn invoke(&mut self, handle: &Handle, args: &[Handle]) -> EvalResult {
        let Some(procedure) = handle.as_procedure() else {
            return Err(doesnt_like("apply", handle));
        };
        if args.len() < procedure.arity.min {
            return Err(not_enough_inputs(&procedure.name));
        }
        if !procedure.arity.accepts(args.len()) {
            return Err(too_much_inside_parens());
        }
        let arg_list = self.constants.list(args.to_vec());
        let outcome = {
            let mut scope = self.enter_procedure(&procedure.name, arg_list.clone())?;
            let outcome = match scope.bind_inputs(procedure, args) {
                Ok(()) => scope.run_activation(procedure, &arg_list),
                Err(unwind) => Err(scope.with_context(unwind)),
            };
            if is_continuation(&outcome) {
                scope.frames.hand_over();
            }
            outcome
        };
        if !procedure.is_macro {
            return outcome;
        }
        let expansion = self.resolve_continuation(outcome)?;
        if !expansion.is_list() {
            return Err(macro_returned(&expansion));
        }
        self.run_list(&expansion, RunMode::Expression)
    }

    /// Bind inputs in the new frame: required, then optional (evaluating
    /// defaults for the missing ones), then the rest list.
    fn bind_inputs(&mut self, procedure: &Procedure, args: &[Handle]) -> Result<(), Unwind> {
        let mut given = args.iter();
        for name in &procedure.required {
            if let Some(value) = given.next() {
                self.frames.bind_local(name, value.clone());
            }
        }
        for param in &procedure.optional {
            let value = match given.next() {
                Some(value) => value.clone(),
                None => {
                    let value = self.run_list(&param.default, RunMode::Expression)?;
                    if value.is_nothing() {
                        return Err(didnt_output(&param.name, &procedure.name));
                    }
                    value
                }
            };
            self.frames.bind_local(&param.name, value);
        }
        if let Some(rest) = &procedure.rest {
            let remaining: Vec<Handle> = given.cloned().collect();
            let list = self.constants.list(remaining);
            self.frames.bind_local(rest, list);
        }
        Ok(())
    }

    fn run_activation(&mut self, procedure: &Procedure, arg_list: &Handle) -> EvalResult {
        let mut entry = procedure.entry();
        loop {
            let outcome = match entry {
                EntryPoint::Line(start) => self.run_lines(procedure, start),
                EntryPoint::Native(id) => self.run_native(procedure, id, arg_list),
            };
            let unwind = match outcome {
                Ok(value) => return Ok(value),
                Err(unwind) => unwind,
            };
            match unwind.control() {
                Control::Return(value) => return Ok(value.clone()),
                Control::Goto(tag) => {
                    trace!(tag = %tag, procedure = %procedure.name, "goto");
                    entry = match procedure.tag(tag) {
                        Some(entry) => entry,
                        None => return Err(self.with_context(no_tag(tag))),
                    };
                }
                Control::Error(_) => return self.recover(unwind),
                Control::Continuation { .. } => return Err(unwind),
            }
        }
    }

    fn run_lines(&mut self, procedure: &Procedure, start: usize) -> EvalResult {
        let Body::Interpreted(lines) = &procedure.body else {
            return Ok(self.nothing());
        };
        for line in lines.iter().skip(start) {
            self.frames.set_line(line.clone());
            let parsed = parse_cached(&self.registry, line).map_err(|u| self.with_context(u))?;
            self.run_body_line(&parsed)
                .map_err(|u| self.with_context(u))?;
        }
        Ok(self.nothing())
    }

    fn run_body_line(&mut self, parsed: &Handle) -> Result<(), Unwind> {
        let Some(sequence) = parsed.as_ast() else {
            return Ok(());
        };
        for statement in &sequence.children {
            self.check_signal()?;
            if let Some(tail) = self.tail_call(statement)? {
                return Err(tail);
            }
            let value = self.eval(statement)?;
            if !value.is_nothing() {
                return Err(dont_say_what_to_do(&value));
            }
        }
        Ok(())
    }

    /// `OUTPUT proc inputs...` in a body becomes a continuation, so the
    /// callee runs in place of this activation instead of on top of it.
    fn tail_call(&mut self, statement: &Handle) -> Result<Option<Unwind>, Unwind> {
        let Some(node) = statement.as_ast() else {
            return Ok(None);
        };
        let AstKind::Call(name) = &node.kind else {
            return Ok(None);
        };
        if !matches!(name.as_str(), "output" | "op") || node.children.len() != 1 {
            return Ok(None);
        }
        if !matches!(self.registry.resolve(name), Some(Resolved::Primitive(_))) {
            return Ok(None);
        }
        let Some(inner) = node.children[0].as_ast() else {
            return Ok(None);
        };
        let AstKind::Call(callee) = &inner.kind else {
            return Ok(None);
        };
        let Some(Resolved::Procedure(target)) = self.registry.resolve(callee) else {
            return Ok(None);
        };
        if target.as_procedure().map_or(true, |p| p.is_macro) {
            return Ok(None);
        }
        let args = self.eval_inputs(&inner.children, callee)?;
        Ok(Some(Unwind::continuation(target, self.constants.list(args))))
    }

    fn run_native(&mut self, procedure: &Procedure, id: EntryId, arg_list: &Handle) -> EvalResult {
        let Some(entry) = self.code.get(id) else {
            return Err(dont_know_how(&procedure.name));
        };
        let result = entry.invoke(self, arg_list);
        match Unwind::from_handle(result.clone()) {
            Some(unwind) => Err(self.with_context(unwind)),
            None => Ok(result),
        }
    }

    /// Fill in the running procedure and line of an error that has none.
    pub(crate) fn with_context(&self, unwind: Unwind) -> Unwind {
        match unwind.as_error() {
            Some(payload) if !payload.has_context() && self.frames.in_procedure() => {
                Unwind::error(payload.clone().with_context(
                    self.frames.current_procedure(),
                    self.frames.current_line(),
                ))
            }
            _ => unwind,
        }
    }

    /// Run ERRACT for an error, if one is set and may run. Its result
    /// replaces the result of the activation that failed.
    pub(crate) fn recover(&mut self, unwind: Unwind) -> EvalResult {
        let Some(payload) = unwind.as_error().cloned() else {
            return Err(unwind);
        };
        if self.erract_active
            || payload.is_system()
            || matches!(payload.kind, ErrorKind::Throw { .. })
        {
            return Err(unwind);
        }
        let action = match self.frames.lookup("erract") {
            Some(action) if action.as_list_node().is_some() => action,
            _ => return Err(unwind),
        };
        tracing::debug!(code = payload.code(), "running erract");
        self.catches.set_last_error(Some(payload));
        self.erract_active = true;
        let result = self.run_list(&action, RunMode::Expression);
        // A failing ERRACT stays marked until the error is handled, so the
        // same failure is not recovered again further out.
        if result.is_ok() {
            self.erract_active = false;
        }
        result
    }

    /// Install a user procedure.
    pub fn define(&mut self, procedure: Procedure) -> Handle {
        self.registry.define(procedure)
    }

    /// Install a natively compiled procedure.
    ///
    /// The first line of `source` is the `TO` header. `tags` gives a
    /// separate entry for each GOTO target.
    pub fn define_compiled(
        &mut self,
        source: &str,
        main: Rc<dyn CompiledEntry>,
        tags: Vec<(&str, Rc<dyn CompiledEntry>)>,
    ) -> Result<Handle, Unwind> {
        let header_text = source.lines().next().unwrap_or_default();
        let header = parse_header(&self.constants, &read_line(&self.constants, header_text)?)?;
        let main = self.code.insert(main);
        let mut table = FxHashMap::default();
        for (tag, entry) in tags {
            table.insert(fold_name(tag), EntryPoint::Native(self.code.insert(entry)));
        }
        let procedure = header.into_procedure(Body::Compiled(main), table, source.to_string());
        Ok(self.registry.define(procedure))
    }
}

fn is_continuation(outcome: &EvalResult) -> bool {
    matches!(outcome, Err(unwind) if matches!(unwind.control(), Control::Continuation { .. }))
}
