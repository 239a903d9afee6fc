//! Diagnostic context for boundary failures

use std::fmt;

/// Three-level location of a gateway failure
///
/// Identifies which public entry point was executing, which gateway stage
/// it had reached, and which sub-operation inside that stage failed. Every
/// failure log line carries one of these so a `NULL`/`0` sentinel observed
/// by the caller can be traced after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Public entry point name, e.g. `handler_bin2json`
    pub entry: &'static str,
    /// Gateway stage, e.g. `resolve`, `invoke`, `copy_out`
    pub stage: &'static str,
    /// Sub-operation within the stage; empty when the stage is enough
    pub op: &'static str,
}

impl CallContext {
    pub fn new(entry: &'static str, stage: &'static str) -> Self {
        Self {
            entry,
            stage,
            op: "",
        }
    }

    pub fn with_op(mut self, op: &'static str) -> Self {
        self.op = op;
        self
    }
}

impl fmt::Display for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.op.is_empty() {
            write!(f, "{} -> {}", self.entry, self.stage)
        } else {
            write!(f, "{} -> {} -> {}", self.entry, self.stage, self.op)
        }
    }
}
