//! Outcome reporting
//!
//! The validator never logs. Callers that want rejections and notices
//! surfaced pass the [`Outcome`] to [`report`] with a [`Reporter`] of their
//! choice.

use core::fmt;

use crate::outcome::{Advisory, Outcome, Rejection};

/// Sink for validation results
pub trait Reporter {
    /// A pin claim was refused
    fn rejected(&mut self, rejection: &Rejection);

    /// A pin claim was accepted with a notice
    fn advisory(&mut self, advisory: &Advisory);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn rejected(&mut self, rejection: &Rejection) {
        (**self).rejected(rejection)
    }

    fn advisory(&mut self, advisory: &Advisory) {
        (**self).advisory(advisory)
    }
}

/// Feed an outcome to a reporter
///
/// Accepted pins without notices produce no calls.
pub fn report<R: Reporter + ?Sized>(outcome: &Outcome, reporter: &mut R) {
    match outcome {
        Outcome::Rejected(rejection) => reporter.rejected(rejection),
        Outcome::Ok(advisories) => {
            for advisory in advisories {
                reporter.advisory(advisory);
            }
        }
    }
}

/// Reporter that writes one line per event to a [`fmt::Write`]
///
/// Rejections are prefixed with `E`, notices with `W`. Write errors are
/// counted, not propagated.
#[derive(Debug)]
pub struct WriteReporter<W> {
    out: W,
    errors: usize,
}

impl<W: fmt::Write> WriteReporter<W> {
    /// Create a reporter writing to `out`
    pub fn new(out: W) -> Self {
        Self { out, errors: 0 }
    }

    /// Number of lines that failed to write
    pub fn write_errors(&self) -> usize {
        self.errors
    }

    /// Consume the reporter and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, level: char, body: &dyn fmt::Display) {
        if writeln!(self.out, "{} {}", level, body).is_err() {
            self.errors += 1;
        }
    }
}

impl<W: fmt::Write> Reporter for WriteReporter<W> {
    fn rejected(&mut self, rejection: &Rejection) {
        self.line('E', rejection);
    }

    fn advisory(&mut self, advisory: &Advisory) {
        self.line('W', advisory);
    }
}

/// Reporter that logs through defmt
///
/// Rejections go out at error level, notices at warn level.
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtReporter;

#[cfg(feature = "defmt")]
impl Reporter for DefmtReporter {
    fn rejected(&mut self, rejection: &Rejection) {
        defmt::error!(
            "GPIO {} rejected on {}: {}",
            rejection.pin.number(),
            rejection.family,
            rejection.reason
        );
    }

    fn advisory(&mut self, advisory: &Advisory) {
        defmt::warn!(
            "GPIO {} on {}: {}",
            advisory.pin.number(),
            advisory.family,
            advisory.kind
        );
    }
}
