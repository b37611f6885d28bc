//! Pinsentry Hardware Abstraction Layer
//!
//! This crate defines the platform capabilities the pin validator depends on
//! but does not implement itself: asking the running chip who it is, and
//! knowing which GPIO numbers are physically wired on its package.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware / board bring-up code         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinsentry-core (PinValidator)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinsentry-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ ESP-IDF chip  │       │  FixedChip    │
//! │ info query    │       │ (host, tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Items
//!
//! - [`chip::ChipInfoProvider`] - Chip identity query
//! - [`chip::ChipModel`] - Known chip model identifiers
//! - [`gpio::GpioLayout`] - Which pins exist and which can drive output

#![no_std]
#![deny(unsafe_code)]

// proptest's assertion macros expand to `format!`
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod chip;
pub mod gpio;

// Re-export key items at crate root for convenience
pub use chip::{ChipInfo, ChipInfoProvider, ChipModel, FixedChip};
pub use gpio::GpioLayout;
