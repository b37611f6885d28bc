//! Pin numbering and direction

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GPIO number as handed in by a caller
///
/// Signed so that negative values coming from C-style configuration can be
/// represented and rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct PinId(i32);

impl PinId {
    /// Create a pin id
    pub const fn new(number: i32) -> Self {
        Self(number)
    }

    /// Raw GPIO number
    pub const fn number(self) -> i32 {
        self.0
    }
}

impl From<i32> for PinId {
    fn from(number: i32) -> Self {
        Self(number)
    }
}

impl From<u8> for PinId {
    fn from(number: u8) -> Self {
        Self(number as i32)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO {}", self.0)
    }
}

/// Intended electrical direction of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Pin will be sensed
    Input,
    /// Pin will be driven
    Output,
}

impl Mode {
    /// Lowercase name of the mode
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Input => "input",
            Mode::Output => "output",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
