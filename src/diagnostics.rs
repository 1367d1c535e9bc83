//! Sinks for non-fatal rendering warnings.
//!
//! Failed merge, style and border calls never abort a render; they are reported
//! here and the render moves on to the next cell or range.

use std::cell::RefCell;

pub trait Diagnostics {
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Prints warnings to standard error, prefixed with `warning:`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }
}

/// Keeps every warning in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: RefCell<Vec<String>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
