//! The sink that the [`NavRegistry`](crate::NavRegistry) reports failures to.

use std::fmt::Debug;

/// How serious a reported problem is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational message
    Info,
    /// Something unexpected that was recovered from
    Warning,
    /// An operation failed
    Error,
}

impl From<Severity> for log::Level {
    fn from(severity: Severity) -> log::Level {
        match severity {
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

/// Receives failure reports from the [`NavRegistry`](crate::NavRegistry).
///
/// `context` names the place the report originates from (module and operation), `message` is a
/// human readable description that includes the affected Navigation File.
///
/// ## Examples
/// Collecting reports, e.g. to show them in an editor:
/// ```
/// use std::cell::RefCell;
/// use waypoint_nav::{Diagnostics, Severity};
///
/// #[derive(Debug, Default)]
/// struct Collect(RefCell<Vec<String>>);
///
/// impl Diagnostics for Collect {
///     fn report(&self, _: Severity, _: &str, message: &str) {
///         self.0.borrow_mut().push(message.to_owned());
///     }
/// }
///
/// let sink = Collect::default();
/// sink.report(Severity::Error, "demo", "something broke");
/// assert_eq!(sink.0.borrow().len(), 1);
/// ```
pub trait Diagnostics: Debug {
    /// Report a single problem.
    fn report(&self, severity: Severity, context: &str, message: &str);
}

/// The default [`Diagnostics`] sink: forwards every report to the [`log`] facade.
///
/// The `context` is used as the log target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, severity: Severity, context: &str, message: &str) {
        log::log!(target: context, severity.into(), "{}", message);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn report(&self, severity: Severity, context: &str, message: &str) {
        (**self).report(severity, context, message)
    }
}
