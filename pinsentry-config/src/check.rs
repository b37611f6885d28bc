//! Whole-plan checking
//!
//! Runs every assignment of a [`PinPlan`] through the validator and keeps
//! the outcomes in plan order.

use heapless::{String as HString, Vec as HVec};

use pinsentry_core::{
    report, ChipFamily, Mode, Outcome, PinId, PinValidator, Rejection, Reporter, StatusCode,
};

use crate::plan::{PinPlan, MAX_ASSIGNMENTS, MAX_NAME_LEN};

/// Validation result for one assignment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlanEntry {
    pub name: HString<MAX_NAME_LEN>,
    pub pin: PinId,
    pub mode: Mode,
    pub outcome: Outcome,
}

/// Validation results for a whole plan
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlanReport {
    family: ChipFamily,
    entries: HVec<PlanEntry, MAX_ASSIGNMENTS>,
}

impl PinPlan {
    /// Validate every assignment independently
    pub fn check(&self, validator: &PinValidator) -> PlanReport {
        let entries = self
            .assignments()
            .iter()
            .map(|a| PlanEntry {
                name: a.name.clone(),
                pin: a.pin,
                mode: a.mode,
                outcome: validator.validate(a.pin, a.mode),
            })
            .collect();

        let report = PlanReport {
            family: validator.family(),
            entries,
        };
        log_report_summary(&report);
        report
    }
}

impl PlanReport {
    /// Family the plan was checked against
    pub fn family(&self) -> ChipFamily {
        self.family
    }

    /// Per-assignment results in plan order
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Find the result for a named assignment
    pub fn entry(&self, name: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.name.as_str() == name)
    }

    /// Check if no assignment was rejected
    pub fn is_acceptable(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_ok())
    }

    /// Rejected assignments
    pub fn rejections(&self) -> impl Iterator<Item = (&PlanEntry, &Rejection)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.rejection().map(|r| (e, r)))
    }

    /// Total notices across accepted assignments
    pub fn advisory_count(&self) -> usize {
        self.entries.iter().map(|e| e.outcome.advisories().len()).sum()
    }

    /// Status for the plan as a whole: invalid if any claim is rejected
    pub fn status(&self) -> StatusCode {
        if self.is_acceptable() {
            StatusCode::Ok
        } else {
            StatusCode::InvalidArg
        }
    }

    /// Feed every outcome to a reporter, in plan order
    pub fn report_to<R: Reporter + ?Sized>(&self, reporter: &mut R) {
        for entry in &self.entries {
            report(&entry.outcome, reporter);
        }
    }
}

/// Log a summary of a checked plan
fn log_report_summary(_report: &PlanReport) {
    #[cfg(feature = "defmt")]
    {
        let rejected = _report.rejections().count();
        if rejected == 0 {
            defmt::info!(
                "Pin plan OK on {}: {} pins, {} notices",
                _report.family,
                _report.entries.len(),
                _report.advisory_count()
            );
        } else {
            defmt::error!(
                "Pin plan rejected on {}: {} of {} pins refused",
                _report.family,
                rejected,
                _report.entries.len()
            );
        }
    }
}
