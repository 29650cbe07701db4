//! RAII guard for procedure frames.
//!
//! [`ProcedureScope`] pushes a frame when created and pops it when
//! dropped, so the frame stack stays balanced on every exit path out of
//! an activation, panics included.
//!
//! ```text
//! let mut scope = interp.enter_procedure("square", args)?;
//! scope.frames.bind_local("size", value);
//! scope.run_list(&body, RunMode::Command)?;
//! // frame popped here
//! ```

use std::ops::{Deref, DerefMut};

use logo_value::{Handle, Unwind};

use super::Interpreter;

/// A live procedure frame. Derefs to the interpreter.
pub struct ProcedureScope<'a> {
    interpreter: &'a mut Interpreter,
}

impl Drop for ProcedureScope<'_> {
    fn drop(&mut self) {
        self.interpreter.frames.pop();
    }
}

impl Deref for ProcedureScope<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ProcedureScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a frame for `procedure`, popped when the guard drops.
    ///
    /// Fails with a stack overflow error past the recursion limit.
    pub fn enter_procedure(
        &mut self,
        procedure: &str,
        arguments: Handle,
    ) -> Result<ProcedureScope<'_>, Unwind> {
        self.frames.push(procedure, arguments)?;
        Ok(ProcedureScope { interpreter: self })
    }
}
