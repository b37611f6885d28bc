//! Chip family dispatch
//!
//! The validator branches on a closed set of families. Each named family
//! owns a constant [`FamilyTables`]; anything else lands in
//! [`ChipFamily::Unrecognized`] and only gets the layout-based checks.

use core::fmt;

use pinsentry_hal::{ChipModel, GpioLayout};

use crate::outcome::BusKind;
use crate::pin::PinId;
use crate::tables::{self, FamilyTables};

/// Supported chip families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipFamily {
    /// ESP32
    Esp32,
    /// ESP32-S3
    Esp32S3,
    /// ESP32-C3
    Esp32C3,
    /// Any other model; tables are skipped
    Unrecognized(ChipModel),
}

impl ChipFamily {
    /// Map a chip model to its family
    pub const fn from_model(model: ChipModel) -> Self {
        match model.normalized() {
            ChipModel::Esp32 => ChipFamily::Esp32,
            ChipModel::Esp32S3 => ChipFamily::Esp32S3,
            ChipModel::Esp32C3 => ChipFamily::Esp32C3,
            other => ChipFamily::Unrecognized(other),
        }
    }

    /// Parse a family name such as "esp32s3" or "ESP32-C3"
    ///
    /// Only the named families parse; there is no spelling for
    /// `Unrecognized`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let same = |want: &str| {
            let mut chars = name.chars().filter(|c| *c != '-' && *c != '_');
            let mut want = want.chars();
            loop {
                match (chars.next(), want.next()) {
                    (None, None) => return true,
                    (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => {}
                    _ => return false,
                }
            }
        };
        if same("esp32") {
            Some(ChipFamily::Esp32)
        } else if same("esp32s3") {
            Some(ChipFamily::Esp32S3)
        } else if same("esp32c3") {
            Some(ChipFamily::Esp32C3)
        } else {
            None
        }
    }

    /// The chip model this family was derived from
    pub const fn model(&self) -> ChipModel {
        match self {
            ChipFamily::Esp32 => ChipModel::Esp32,
            ChipFamily::Esp32S3 => ChipModel::Esp32S3,
            ChipFamily::Esp32C3 => ChipModel::Esp32C3,
            ChipFamily::Unrecognized(model) => *model,
        }
    }

    /// Constant tables for this family
    pub fn tables(&self) -> Option<&'static FamilyTables> {
        match self {
            ChipFamily::Esp32 => Some(&tables::ESP32),
            ChipFamily::Esp32S3 => Some(&tables::ESP32S3),
            ChipFamily::Esp32C3 => Some(&tables::ESP32C3),
            ChipFamily::Unrecognized(_) => None,
        }
    }

    /// Built-in GPIO layout for this family, if one is known
    pub const fn builtin_layout(&self) -> Option<GpioLayout> {
        GpioLayout::for_model(self.model())
    }

    /// Check if this is a named family
    pub fn is_recognized(&self) -> bool {
        !matches!(self, ChipFamily::Unrecognized(_))
    }

    /// Classify a pin on this family
    ///
    /// Returns the dominant role: a reserved pin that is also listed as a
    /// caution pin reports `ReservedBus`, an input-only pin reports
    /// `OutputIncapable`.
    pub fn role_of(&self, pin: PinId, layout: &GpioLayout) -> PinRole {
        let n = pin.number();
        if !layout.is_valid(n) {
            return PinRole::InvalidNumber;
        }
        let Some(tables) = self.tables() else {
            return if layout.is_valid_output(n) {
                PinRole::Unreserved
            } else {
                PinRole::OutputIncapable
            };
        };
        if let Some(reserved) = tables.reserved_range(n) {
            PinRole::ReservedBus(reserved.bus)
        } else if tables.is_input_only(n) || !layout.is_valid_output(n) {
            PinRole::OutputIncapable
        } else if tables.cautions_for(n).next().is_some() {
            PinRole::CautionFunction
        } else {
            PinRole::Unreserved
        }
    }
}

impl From<ChipModel> for ChipFamily {
    fn from(model: ChipModel) -> Self {
        Self::from_model(model)
    }
}

impl fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipFamily::Unrecognized(model) => {
                write!(f, "unrecognized chip (model {})", model.as_raw())
            }
            family => f.write_str(family.model().name()),
        }
    }
}

/// Role a pin plays on a given family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// Free for general use
    Unreserved,
    /// Wired to a memory bus, never usable
    ReservedBus(BusKind),
    /// Can only be an input
    OutputIncapable,
    /// Usable, but shared with a debug, console or boot function
    CautionFunction,
    /// Not a GPIO on this chip
    InvalidNumber,
}
