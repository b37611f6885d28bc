//! Pin plans for pinsentry
//!
//! Parses a board's TOML pin plan and checks every claim in it against the
//! GPIO validator for the running (or declared) chip.
//!
//! ```
//! use pinsentry_config::PinPlan;
//! use pinsentry_hal::{ChipModel, FixedChip};
//!
//! let plan = PinPlan::from_toml(r#"
//! [[pin]]
//! name = "status_led"
//! gpio = 48
//! mode = "output"
//! "#).unwrap();
//!
//! let validator = plan.validator(&FixedChip::new(ChipModel::Esp32S3));
//! assert!(plan.check(&validator).is_acceptable());
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod check;
pub mod plan;

pub use check::{PlanEntry, PlanReport};
pub use plan::{ConfigError, PinAssignment, PinPlan, MAX_ASSIGNMENTS, MAX_NAME_LEN};
