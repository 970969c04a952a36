//! Diagnostic sinks for condition transitions.
//!
//! The engine hands every transition to a [`DiagnosticSink`]. Sinks have no
//! way to report failure back, so nothing a sink does can change engine state.

use super::kind::ConditionTransition;

/// Receives a notification for each condition transition.
pub trait DiagnosticSink {
    fn emit(&mut self, character: &str, transition: &ConditionTransition);
}

/// Logs transitions through `tracing` at `INFO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, character: &str, transition: &ConditionTransition) {
        tracing::info!(
            character,
            from = %transition.from,
            to = %transition.to,
            "{}",
            transition.describe(character)
        );
    }
}

/// Discards every transition.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _character: &str, _transition: &ConditionTransition) {}
}

/// Keeps every diagnostic line in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySink {
    messages: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Drain the collected lines.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&mut self, character: &str, transition: &ConditionTransition) {
        self.messages.push(transition.describe(character));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, character: &str, transition: &ConditionTransition) {
        (**self).emit(character, transition);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn emit(&mut self, character: &str, transition: &ConditionTransition) {
        (**self).emit(character, transition);
    }
}
