//! Pin plan parsing
//!
//! A pin plan names every GPIO a board intends to claim:
//!
//! ```toml
//! chip = "esp32s3"   # optional, overrides the detected chip
//!
//! [[pin]]
//! name = "status_led"
//! gpio = 48
//! mode = "output"
//! ```
//!
//! Names must be unique. Two names claiming the same GPIO are accepted
//! here; each claim is validated on its own.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use heapless::{String as HString, Vec as HVec};
use serde::Deserialize;

use pinsentry_core::{ChipFamily, Mode, PinId, PinValidator};
use pinsentry_hal::ChipInfoProvider;

/// Maximum assignments per plan
pub const MAX_ASSIGNMENTS: usize = 48;

/// Maximum assignment name length
pub const MAX_NAME_LEN: usize = 32;

/// Pin plan errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML syntax or schema error
    TomlParse,
    /// `chip` names a family without tables
    UnknownChip,
    /// Plan has no `[[pin]]` entries
    EmptyPlan,
    /// Two assignments share a name
    DuplicateName,
    /// Assignment name longer than `MAX_NAME_LEN`
    NameTooLong,
    /// More than `MAX_ASSIGNMENTS` assignments
    TooManyItems,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfigError::TomlParse => "invalid pin plan TOML",
            ConfigError::UnknownChip => "unknown chip (expected esp32, esp32s3 or esp32c3)",
            ConfigError::EmptyPlan => "pin plan has no [[pin]] entries",
            ConfigError::DuplicateName => "duplicate pin name",
            ConfigError::NameTooLong => "pin name too long",
            ConfigError::TooManyItems => "too many pin assignments",
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlan {
    #[serde(default)]
    chip: Option<String>,
    #[serde(default, rename = "pin")]
    pins: Vec<RawAssignment>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAssignment {
    name: String,
    gpio: i32,
    mode: Mode,
}

/// One named pin claim
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// Assignment name (e.g. "status_led")
    pub name: HString<MAX_NAME_LEN>,
    /// Claimed GPIO
    pub pin: PinId,
    /// Intended direction
    pub mode: Mode,
}

/// Set of named pin claims for one board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinPlan {
    chip: Option<ChipFamily>,
    assignments: HVec<PinAssignment, MAX_ASSIGNMENTS>,
}

impl PinPlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a plan from TOML text
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let raw: RawPlan = toml::from_str(input).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Pin plan parse error: {}", defmt::Display2Format(&_e));
            ConfigError::TomlParse
        })?;

        let mut plan = Self::new();
        if let Some(chip) = raw.chip {
            plan.chip = Some(ChipFamily::parse(&chip).ok_or(ConfigError::UnknownChip)?);
        }

        if raw.pins.is_empty() {
            return Err(ConfigError::EmptyPlan);
        }
        for pin in raw.pins {
            plan.push(&pin.name, pin.gpio, pin.mode)?;
        }

        log_plan_summary(&plan);
        Ok(plan)
    }

    /// Pin the plan to a chip family instead of the detected one
    pub fn with_chip(mut self, family: ChipFamily) -> Self {
        self.chip = Some(family);
        self
    }

    /// Add a named claim
    pub fn push(&mut self, name: &str, pin: impl Into<PinId>, mode: Mode) -> Result<(), ConfigError> {
        if self.find(name).is_some() {
            return Err(ConfigError::DuplicateName);
        }
        let name = HString::try_from(name).map_err(|_| ConfigError::NameTooLong)?;
        self.assignments
            .push(PinAssignment {
                name,
                pin: pin.into(),
                mode,
            })
            .map_err(|_| ConfigError::TooManyItems)
    }

    /// Chip family override, if any
    pub fn chip(&self) -> Option<ChipFamily> {
        self.chip
    }

    /// All claims in file order
    pub fn assignments(&self) -> &[PinAssignment] {
        &self.assignments
    }

    /// Find a claim by name
    pub fn find(&self, name: &str) -> Option<&PinAssignment> {
        self.assignments.iter().find(|a| a.name.as_str() == name)
    }

    /// Build the validator this plan should be checked with
    ///
    /// Uses the plan's `chip` override when present, otherwise queries
    /// `provider`.
    pub fn validator<P: ChipInfoProvider + ?Sized>(&self, provider: &P) -> PinValidator {
        match self.chip {
            Some(family) => {
                let _detected = ChipFamily::from_model(provider.chip_info().model);
                #[cfg(feature = "defmt")]
                {
                    if _detected != family {
                        defmt::warn!("Pin plan targets {} but running on {}", family, _detected);
                    }
                }
                PinValidator::for_family(family)
            }
            None => PinValidator::from_provider(provider),
        }
    }
}

/// Log a summary of a parsed plan
fn log_plan_summary(_plan: &PinPlan) {
    #[cfg(feature = "defmt")]
    {
        defmt::info!("Pin plan loaded");
        defmt::debug!("  {} assignments", _plan.assignments.len());
        if let Some(chip) = _plan.chip {
            defmt::debug!("  chip override: {}", chip);
        }
    }
}
