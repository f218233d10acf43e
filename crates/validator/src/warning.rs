//! Developer-facing diagnostics
//!
//! The structural audit and the consistency checker report what they find
//! through a [`WarningSink`]. Warnings are advisory: they never fail
//! registration and never show up in a [`FormResult`](crate::FormResult).

use std::cell::RefCell;
use std::fmt;

use crate::surface::ElementId;

/// A single diagnostic message, optionally tied to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Human-readable description of the problem.
    pub message: String,
    /// The element the problem was found on.
    pub element: Option<ElementId>,
}

impl Warning {
    /// Creates a warning that is not tied to an element.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            element: None,
        }
    }

    /// Creates a warning about `element`.
    pub fn at(message: impl Into<String>, element: ElementId) -> Self {
        Self {
            message: message.into(),
            element: Some(element),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.element {
            Some(element) => write!(f, "[FormGuard] {} ({element})", self.message),
            None => write!(f, "[FormGuard] {}", self.message),
        }
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// Receives warnings. Implementations must not panic.
pub trait WarningSink {
    /// Handles one warning.
    fn warn(&self, warning: Warning);
}

/// Adapts a closure into a [`WarningSink`].
#[derive(Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F> WarningSink for FnSink<F>
where
    F: Fn(Warning),
{
    fn warn(&self, warning: Warning) {
        (self.0)(warning);
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnSink").field(&"<function>").finish()
    }
}

/// Default sink: logs every warning through `tracing` and carries on.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, warning: Warning) {
        tracing::warn!(
            target: "formguard",
            element = warning.element.map(ElementId::index),
            "{}",
            warning.message
        );
    }
}

/// Discards every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl WarningSink for NoopSink {
    fn warn(&self, _warning: Warning) {}
}

/// Keeps every warning in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: RefCell<Vec<Warning>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the collected warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }

    /// Returns just the collected messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.warnings
            .borrow()
            .iter()
            .map(|w| w.message.clone())
            .collect()
    }

    /// Number of collected warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    /// Returns true when nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }

    /// Drains the collected warnings.
    pub fn take(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, warning: Warning) {
        self.warnings.borrow_mut().push(warning);
    }
}

impl<S: WarningSink + ?Sized> WarningSink for &S {
    fn warn(&self, warning: Warning) {
        (**self).warn(warning);
    }
}

impl<S: WarningSink + ?Sized> WarningSink for Box<S> {
    fn warn(&self, warning: Warning) {
        (**self).warn(warning);
    }
}
