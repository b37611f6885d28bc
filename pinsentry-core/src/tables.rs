//! Per-family constant pin tables
//!
//! Each supported chip family owns one [`FamilyTables`] describing:
//!
//! - Pins wired to the internal flash/PSRAM bus (never usable)
//! - Pins shared with a debug, console or boot function (usable, flagged)
//! - Pins that can only be inputs
//!
//! Ranges are inclusive on both ends.

use core::fmt;

use crate::outcome::BusKind;

/// Inclusive range of GPIO numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinRange {
    /// First pin in the range
    pub first: u8,
    /// Last pin in the range
    pub last: u8,
}

impl PinRange {
    /// Create a range `first..=last`
    pub const fn new(first: u8, last: u8) -> Self {
        Self { first, last }
    }

    /// Create a range holding a single pin
    pub const fn single(pin: u8) -> Self {
        Self::new(pin, pin)
    }

    /// Check if `pin` falls in the range
    pub const fn contains(&self, pin: i32) -> bool {
        pin >= self.first as i32 && pin <= self.last as i32
    }

    /// Iterate over the pins in the range
    pub fn pins(&self) -> impl Iterator<Item = u8> {
        self.first..=self.last
    }
}

/// Secondary function that makes a pin risky but not forbidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CautionFunction {
    /// Console UART TX/RX
    Uart0,
    /// Classic four-wire JTAG
    Jtag,
    /// Built-in USB Serial/JTAG controller D-/D+
    UsbJtag,
    /// Sampled at reset to select the boot mode
    Strapping,
}

impl CautionFunction {
    /// Short tag for the function
    pub const fn tag(self) -> &'static str {
        match self {
            CautionFunction::Uart0 => "UART0",
            CautionFunction::Jtag => "JTAG",
            CautionFunction::UsbJtag => "USB-JTAG",
            CautionFunction::Strapping => "strapping pin",
        }
    }
}

impl fmt::Display for CautionFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Pins reserved for a memory bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReservedRange {
    pub pins: PinRange,
    pub bus: BusKind,
}

/// Pins sharing a caution function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CautionEntry {
    pub function: CautionFunction,
    pub pins: &'static [PinRange],
}

impl CautionEntry {
    /// Check if `pin` carries this entry's function
    pub fn covers(&self, pin: i32) -> bool {
        self.pins.iter().any(|r| r.contains(pin))
    }
}

/// Constant tables for one chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyTables {
    /// Memory-bus pins, checked in order
    pub reserved: &'static [ReservedRange],
    /// Caution functions, every match is reported
    pub cautions: &'static [CautionEntry],
    /// Input-only pins without pull resistors
    pub input_only: Option<PinRange>,
}

impl FamilyTables {
    /// Find the reserved range containing `pin`
    pub fn reserved_range(&self, pin: i32) -> Option<&'static ReservedRange> {
        self.reserved.iter().find(|r| r.pins.contains(pin))
    }

    /// Check if `pin` is input-only on this family
    pub fn is_input_only(&self, pin: i32) -> bool {
        self.input_only.is_some_and(|r| r.contains(pin))
    }

    /// Iterate over caution functions that apply to `pin`
    pub fn cautions_for(&self, pin: i32) -> impl Iterator<Item = CautionFunction> + 'static {
        let cautions: &'static [CautionEntry] = self.cautions;
        cautions
            .iter()
            .filter(move |entry| entry.covers(pin))
            .map(|entry| entry.function)
    }
}

/// ESP32: quad SPI flash/PSRAM on 6-11, 16, 17
pub static ESP32: FamilyTables = FamilyTables {
    reserved: &[
        ReservedRange {
            pins: PinRange::new(6, 11),
            bus: BusKind::SpiFlashPsram,
        },
        ReservedRange {
            pins: PinRange::new(16, 17),
            bus: BusKind::SpiFlashPsram,
        },
    ],
    cautions: &[
        CautionEntry {
            function: CautionFunction::Uart0,
            pins: &[PinRange::single(1), PinRange::single(3)],
        },
        CautionEntry {
            function: CautionFunction::Jtag,
            pins: &[PinRange::new(12, 15)],
        },
        CautionEntry {
            function: CautionFunction::Strapping,
            pins: &[
                PinRange::single(0),
                PinRange::single(2),
                PinRange::single(5),
                PinRange::single(12),
                PinRange::single(15),
            ],
        },
    ],
    input_only: Some(PinRange::new(34, 39)),
};

/// ESP32-S3: SPI flash on 26-32, octal flash/PSRAM on 33-37
pub static ESP32S3: FamilyTables = FamilyTables {
    reserved: &[
        ReservedRange {
            pins: PinRange::new(26, 32),
            bus: BusKind::SpiFlash,
        },
        ReservedRange {
            pins: PinRange::new(33, 37),
            bus: BusKind::OctalFlash,
        },
    ],
    cautions: &[
        CautionEntry {
            function: CautionFunction::UsbJtag,
            pins: &[PinRange::new(19, 20)],
        },
        CautionEntry {
            function: CautionFunction::Uart0,
            pins: &[PinRange::new(43, 44)],
        },
        CautionEntry {
            function: CautionFunction::Strapping,
            pins: &[
                PinRange::single(0),
                PinRange::single(3),
                PinRange::new(45, 46),
            ],
        },
    ],
    input_only: None,
};

/// ESP32-C3: SPI flash on 12-17
pub static ESP32C3: FamilyTables = FamilyTables {
    reserved: &[ReservedRange {
        pins: PinRange::new(12, 17),
        bus: BusKind::SpiFlash,
    }],
    cautions: &[
        CautionEntry {
            function: CautionFunction::UsbJtag,
            pins: &[PinRange::new(18, 19)],
        },
        CautionEntry {
            function: CautionFunction::Strapping,
            pins: &[
                PinRange::single(2),
                PinRange::new(8, 9),
            ],
        },
    ],
    input_only: None,
};
