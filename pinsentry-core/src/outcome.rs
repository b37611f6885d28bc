//! Validation outcomes
//!
//! Every call to the validator ends in an [`Outcome`]: either the pin is
//! usable, possibly with [`Advisory`] notices attached, or it is rejected
//! with exactly one [`RejectReason`]. Both sides carry the pin and chip
//! family they were computed for, so a log line can be produced from the
//! value alone.

use core::fmt;
use core::ops::Deref;

use heapless::Vec;

use crate::family::ChipFamily;
use crate::pin::PinId;
use crate::tables::CautionFunction;

/// Maximum notices a single outcome can carry
///
/// The worst case in the built-in tables is two (a JTAG pin that is also a
/// strapping pin).
pub const MAX_ADVISORIES: usize = 4;

/// Memory bus a reserved pin belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusKind {
    /// Quad SPI flash shared with PSRAM
    SpiFlashPsram,
    /// Quad SPI flash
    SpiFlash,
    /// Octal flash/PSRAM data lines
    OctalFlash,
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BusKind::SpiFlashPsram => "SPI flash/PSRAM",
            BusKind::SpiFlash => "SPI flash",
            BusKind::OctalFlash => "octal flash",
        })
    }
}

/// Why a pin was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// Negative, or beyond the chip's GPIO count
    OutOfRange,
    /// Inside the GPIO count but not bonded out on this package
    NotAPhysicalPin,
    /// Wired to the flash/PSRAM bus
    ReservedForBus(BusKind),
    /// Requested as output on an input-only pin
    IncompatibleMode,
}

/// A refused pin claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rejection {
    pub pin: PinId,
    pub family: ChipFamily,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::OutOfRange => write!(f, "{} is out of range on {}", self.pin, self.family),
            RejectReason::NotAPhysicalPin => {
                write!(f, "{} is not a valid GPIO on {}", self.pin, self.family)
            }
            RejectReason::ReservedForBus(bus) => write!(
                f,
                "{} is reserved for {} on {}, prohibited",
                self.pin, bus, self.family
            ),
            RejectReason::IncompatibleMode => {
                write!(f, "{} cannot drive an output on {}", self.pin, self.family)
            }
        }
    }
}

/// Kind of caveat attached to an accepted pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdvisoryKind {
    /// Pin doubles as a debug, console or boot function
    Caution(CautionFunction),
    /// Input-only pin without internal pull-up/pull-down
    NoPullResistors,
    /// Chip family has no tables; only range and mode were checked
    BasicValidationOnly,
}

/// Non-fatal notice about an accepted pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Advisory {
    pub pin: PinId,
    pub family: ChipFamily,
    pub kind: AdvisoryKind,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AdvisoryKind::Caution(CautionFunction::Strapping) => {
                write!(f, "{} is a strapping pin and may affect boot mode", self.pin)
            }
            AdvisoryKind::Caution(CautionFunction::Uart0) => {
                write!(f, "{} is used for UART0 (TX/RX), use with caution", self.pin)
            }
            AdvisoryKind::Caution(function) => {
                write!(f, "{} is used for {}, use with caution", self.pin, function)
            }
            AdvisoryKind::NoPullResistors => {
                write!(f, "{} has no internal pull-up/pull-down", self.pin)
            }
            AdvisoryKind::BasicValidationOnly => write!(
                f,
                "{} is not explicitly handled, only basic checks applied to {}",
                self.family, self.pin
            ),
        }
    }
}

/// Notices attached to an accepted pin, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Advisories(Vec<Advisory, MAX_ADVISORIES>);

impl Advisories {
    /// Create an empty set of notices
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a notice
    ///
    /// Capacity covers the largest overlap in the tables, so a full buffer
    /// means a table was extended without raising `MAX_ADVISORIES`.
    pub(crate) fn push(&mut self, advisory: Advisory) {
        let pushed = self.0.push(advisory);
        debug_assert!(pushed.is_ok(), "raise MAX_ADVISORIES");
    }

    /// Check if a notice of `kind` is present
    pub fn contains(&self, kind: AdvisoryKind) -> bool {
        self.0.iter().any(|a| a.kind == kind)
    }
}

impl Deref for Advisories {
    type Target = [Advisory];

    fn deref(&self) -> &[Advisory] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Advisories {
    type Item = &'a Advisory;
    type IntoIter = core::slice::Iter<'a, Advisory>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Platform status code an outcome maps to
///
/// Values match ESP-IDF's `esp_err_t` so the result can be handed straight
/// back to C callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum StatusCode {
    /// `ESP_OK`
    Ok = 0,
    /// `ESP_ERR_INVALID_ARG`
    InvalidArg = 0x102,
}

impl StatusCode {
    /// Get the raw status value
    pub const fn as_raw(self) -> i32 {
        self as i32
    }
}

/// Result of validating one pin claim
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Pin may be used, with zero or more notices
    Ok(Advisories),
    /// Pin must not be used
    Rejected(Rejection),
}

impl Outcome {
    /// Check if the pin may be used
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// Notices on an accepted pin (empty when rejected)
    pub fn advisories(&self) -> &[Advisory] {
        match self {
            Outcome::Ok(advisories) => advisories.0.as_slice(),
            Outcome::Rejected(_) => &[],
        }
    }

    /// Check if an accepted pin carries a notice of `kind`
    pub fn has_advisory(&self, kind: AdvisoryKind) -> bool {
        self.advisories().iter().any(|a| a.kind == kind)
    }

    /// The rejection, if any
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Rejected(rejection) => Some(rejection),
        }
    }

    /// The rejection reason, if any
    pub fn reason(&self) -> Option<RejectReason> {
        self.rejection().map(|r| r.reason)
    }

    /// Map to a platform status code
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Ok(_) => StatusCode::Ok,
            Outcome::Rejected(_) => StatusCode::InvalidArg,
        }
    }

    /// Convert into a `Result` for use with `?`
    pub fn into_result(self) -> Result<Advisories, Rejection> {
        match self {
            Outcome::Ok(advisories) => Ok(advisories),
            Outcome::Rejected(rejection) => Err(rejection),
        }
    }
}

impl From<Outcome> for Result<Advisories, Rejection> {
    fn from(outcome: Outcome) -> Self {
        outcome.into_result()
    }
}
