//! Board-agnostic GPIO safety validation
//!
//! Decides whether a GPIO may be claimed for input or output on an
//! ESP32-family chip, before any driver touches it:
//!
//! - Pin numbering and direction types
//! - Chip family dispatch and per-family constant tables
//! - The validator itself (pure, allocation-free)
//! - Structured outcomes and their status-code mapping
//! - A reporting seam for turning outcomes into log lines
//!
//! # Example
//!
//! ```
//! use pinsentry_core::{Mode, PinValidator, RejectReason};
//! use pinsentry_hal::{ChipModel, FixedChip};
//!
//! let validator = PinValidator::from_provider(&FixedChip::new(ChipModel::Esp32));
//!
//! let outcome = validator.validate(6, Mode::Output);
//! assert_eq!(outcome.reason(), Some(RejectReason::ReservedForBus(pinsentry_core::BusKind::SpiFlashPsram)));
//!
//! let outcome = validator.validate(4, Mode::Input);
//! assert!(outcome.is_ok());
//! assert!(outcome.advisories().is_empty());
//! ```

#![no_std]
#![deny(unsafe_code)]

// proptest's assertion macros expand to `format!`
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod family;
pub mod outcome;
pub mod pin;
pub mod report;
pub mod tables;
pub mod validator;

pub use family::{ChipFamily, PinRole};
pub use outcome::{
    Advisories, Advisory, AdvisoryKind, BusKind, Outcome, RejectReason, Rejection, StatusCode,
};
pub use pin::{Mode, PinId};
pub use report::{report, Reporter, WriteReporter};
pub use tables::{CautionFunction, FamilyTables, PinRange};
pub use validator::{validate, PinValidator};

#[cfg(feature = "defmt")]
pub use report::DefmtReporter;
