//! The abstract interpreter: a binding environment plus the mutually
//! recursive expression and statement evaluators.
//!
//! Every evaluation is a pure function of an AST subtree and a context;
//! nothing here errors or panics. Anything the interpreter cannot resolve
//! with certainty comes back as `None`.

mod builtins_rt;
mod expr;
mod stmt;

pub(crate) use stmt::{run_for, run_foreach, run_while, walk_body};

use rustc_hash::FxHashMap;

use crate::ast::ClassBody;
use crate::label::Label;
use crate::value::Value;

/// Control flow out of statement bodies.
pub(crate) enum Signal {
    Break,
    Continue,
}

/// Shared loop-safety bound: loop drivers stop after this many iterations
/// and `range` produces at most this many entries. Guarantees termination
/// on unbounded or unresolvable loop conditions; silent truncation, never
/// an error.
pub const LOOP_LIMIT: usize = 1000;

/// The accumulating label list and positional counter a body walk threads
/// through nested statements.
#[derive(Debug, Default)]
pub(crate) struct LabelSink {
    pub labels: Vec<Label>,
    next_index: u64,
}

impl LabelSink {
    pub fn new() -> Self {
        LabelSink::default()
    }

    pub fn push_named(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Push the next positional label and advance the counter. Keyed labels
    /// never advance it.
    pub fn push_positional(&mut self) {
        self.labels.push(Label::Indexed(self.next_index));
        self.next_index += 1;
    }
}

/// Binding environment for one evaluation pass: variable bindings plus the
/// enclosing class body (for `self::CONST` lookups).
pub struct Context<'a> {
    bindings: FxHashMap<String, Value>,
    class: Option<&'a ClassBody>,
}

impl<'a> Context<'a> {
    pub fn new(class: Option<&'a ClassBody>) -> Self {
        Context { bindings: FxHashMap::default(), class }
    }

    /// Child context with its own copy of the bindings. Loops fork once and
    /// reuse the child across iterations, so the body sees its own
    /// iteration's bindings while the parent stays untouched.
    pub fn fork(&self) -> Context<'a> {
        Context { bindings: self.bindings.clone(), class: self.class }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub(crate) fn class(&self) -> Option<&'a ClassBody> {
        self.class
    }
}
