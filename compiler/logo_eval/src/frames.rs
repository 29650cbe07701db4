//! Call-frame stack for dynamically scoped variables.
//!
//! Frame 0 is the global frame. It is created with the stack and never
//! popped. Each procedure activation pushes one frame holding its inputs
//! and locals; lookups scan from the innermost frame outward, so a callee
//! sees its callers' locals.
//!
//! A tail call replaces its caller's frame instead of stacking on it. The
//! caller's bindings are handed over to the replacement frame as inherited
//! bindings: visible to lookups and assignments like the caller's own, but
//! shadowed by anything the callee binds or declares.
//!
//! All names are case-folded on every operation.

use rustc_hash::{FxHashMap, FxHashSet};

use logo_value::{fold_name, stack_overflow, Handle, Unwind};

/// One activation's variables and bookkeeping.
#[derive(Default)]
pub struct Frame {
    bindings: FxHashMap<String, Handle>,
    /// Bindings of the activations this one replaced by tail calls.
    inherited: FxHashMap<String, Handle>,
    /// Result of the most recent TEST in this frame, if any.
    test: Option<bool>,
    /// The inputs the activation was called with, as a list.
    arguments: Option<Handle>,
    procedure: Option<String>,
    line: Option<Handle>,
}

impl Frame {
    fn for_procedure(procedure: &str, arguments: Handle) -> Self {
        Frame {
            procedure: Some(procedure.to_string()),
            arguments: Some(arguments),
            ..Frame::default()
        }
    }

    fn get(&self, key: &str) -> Option<&Handle> {
        self.bindings.get(key).or_else(|| self.inherited.get(key))
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Handle> {
        match self.bindings.get_mut(key) {
            Some(slot) => Some(slot),
            None => self.inherited.get_mut(key),
        }
    }
}

/// What a frame leaves to the activation that replaces it.
struct Handover {
    bindings: FxHashMap<String, Handle>,
    test: Option<bool>,
}

/// Stack of frames, innermost last.
pub struct FrameStack {
    frames: Vec<Frame>,
    limit: usize,
    /// Taken by the next push.
    handover: Option<Handover>,
}

impl FrameStack {
    /// Create a stack holding only the global frame.
    ///
    /// `limit` bounds the number of procedure frames above it.
    pub fn new(limit: usize) -> Self {
        FrameStack {
            frames: vec![Frame::default()],
            limit,
            handover: None,
        }
    }

    /// Number of frames, counting the global frame.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// True while some procedure is active.
    pub fn in_procedure(&self) -> bool {
        self.frames.len() > 1
    }

    /// Push a frame for a procedure activation.
    pub fn push(&mut self, procedure: &str, arguments: Handle) -> Result<(), Unwind> {
        if self.frames.len() > self.limit {
            return Err(stack_overflow());
        }
        let mut frame = Frame::for_procedure(procedure, arguments);
        if let Some(handover) = self.handover.take() {
            frame.inherited = handover.bindings;
            frame.test = handover.test;
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Mark the innermost frame's bindings to be inherited by the next
    /// pushed frame. Used when the innermost activation ends in a tail call.
    pub fn hand_over(&mut self) {
        if !self.in_procedure() {
            return;
        }
        let frame = self.innermost();
        let mut bindings = std::mem::take(&mut frame.inherited);
        bindings.extend(frame.bindings.drain());
        let test = frame.test;
        self.handover = Some(Handover { bindings, test });
    }

    /// Drop a handover no frame took.
    pub fn clear_handover(&mut self) {
        self.handover = None;
    }

    /// Pop the innermost frame. The global frame is never removed.
    pub fn pop(&mut self) -> bool {
        if self.frames.len() > 1 {
            self.frames.pop();
            true
        } else {
            false
        }
    }

    /// Drop every procedure frame, keeping the global frame.
    pub fn unwind_to_global(&mut self) {
        self.frames.truncate(1);
        self.handover = None;
    }

    fn innermost(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn global(&mut self) -> &mut Frame {
        &mut self.frames[0]
    }

    /// First binding of `name`, innermost first.
    ///
    /// `Some(Nothing)` means the name is declared but has no value.
    pub fn lookup(&self, name: &str) -> Option<Handle> {
        let key = fold_name(name);
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&key))
            .cloned()
    }

    /// Update the nearest frame declaring `name`, or create a global.
    pub fn assign(&mut self, name: &str, value: Handle) {
        let key = fold_name(name);
        let slot = self
            .frames
            .iter_mut()
            .rev()
            .find_map(|frame| frame.get_mut(&key));
        match slot {
            Some(slot) => *slot = value,
            None => {
                self.global().bindings.insert(key, value);
            }
        }
    }

    /// Declare `name` in the innermost frame unless already declared there.
    pub fn declare_local(&mut self, name: &str, nothing: &Handle) {
        self.innermost()
            .bindings
            .entry(fold_name(name))
            .or_insert_with(|| nothing.clone());
    }

    /// Declare `name` in the global frame unless already declared there.
    pub fn declare_global(&mut self, name: &str, nothing: &Handle) {
        self.global()
            .bindings
            .entry(fold_name(name))
            .or_insert_with(|| nothing.clone());
    }

    /// Bind `name` in the innermost frame, replacing any binding there.
    pub fn bind_local(&mut self, name: &str, value: Handle) {
        self.innermost().bindings.insert(fold_name(name), value);
    }

    /// Remove the innermost binding of `name`.
    pub fn erase(&mut self, name: &str) -> bool {
        let key = fold_name(name);
        self.frames
            .iter_mut()
            .rev()
            .any(|frame| {
                frame.bindings.remove(&key).is_some() || frame.inherited.remove(&key).is_some()
            })
    }

    /// Record a TEST result in the innermost frame.
    pub fn set_test(&mut self, result: bool) {
        self.innermost().test = Some(result);
    }

    /// Most recent TEST result visible from the innermost frame.
    pub fn test_result(&self) -> Option<bool> {
        self.frames.iter().rev().find_map(|frame| frame.test)
    }

    /// Remove every binding that is not buried.
    pub fn erase_all(&mut self, is_buried: impl Fn(&str) -> bool) {
        for frame in &mut self.frames {
            frame.bindings.retain(|name, _| is_buried(name));
            frame.inherited.retain(|name, _| is_buried(name));
        }
    }

    /// Names across all frames that pass `filter`, innermost occurrence
    /// first, without duplicates.
    pub fn collect_names(&self, filter: impl Fn(&str) -> bool) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut names = Vec::new();
        for frame in self.frames.iter().rev() {
            let mut local: Vec<&String> =
                frame.bindings.keys().chain(frame.inherited.keys()).collect();
            local.sort();
            for name in local {
                if filter(name) && seen.insert(name.as_str()) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    /// Name of the innermost active procedure.
    pub fn current_procedure(&self) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.procedure.as_deref())
    }

    /// Line the innermost active procedure is executing.
    pub fn current_line(&self) -> Option<&Handle> {
        self.frames.last().and_then(|frame| frame.line.as_ref())
    }

    pub fn set_line(&mut self, line: Handle) {
        self.innermost().line = Some(line);
    }

    /// The argument list of the innermost activation.
    pub fn arguments(&self) -> Option<&Handle> {
        self.frames.last().and_then(|frame| frame.arguments.as_ref())
    }
}
