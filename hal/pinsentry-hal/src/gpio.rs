//! GPIO layout tables
//!
//! Describes which GPIO numbers a chip package actually wires out and which
//! of those can drive an output. Chip HALs hand one of these to the
//! validator; the built-in tables mirror the SoC capability masks of the
//! supported parts.

use crate::chip::ChipModel;

/// Build a mask with bits `0..count` set
const fn low_bits(count: u8) -> u64 {
    if count >= 64 {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}

/// Build a mask with bits `first..=last` set
const fn bit_range(first: u8, last: u8) -> u64 {
    low_bits(last + 1) & !low_bits(first)
}

/// Physical GPIO table of a chip package
///
/// Bit `n` of `valid_mask` is set when GPIO `n` is bonded out; bit `n` of
/// `output_mask` is set when it can also be driven. `output_mask` is always
/// a subset of `valid_mask`, and neither has bits at or above `pin_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioLayout {
    /// Number of GPIO slots (highest usable number is `pin_count - 1`)
    pin_count: u8,
    /// Pins that physically exist
    valid_mask: u64,
    /// Pins that can be configured as outputs
    output_mask: u64,
}

impl GpioLayout {
    /// ESP32: GPIO 0-39, except 24 and 28-31; 34-39 are input-only
    pub const ESP32: Self = Self::new(
        40,
        low_bits(40) & !(1 << 24) & !bit_range(28, 31),
        low_bits(40) & !(1 << 24) & !bit_range(28, 31) & !bit_range(34, 39),
    );

    /// ESP32-S3: GPIO 0-48, except 22-25
    pub const ESP32S3: Self = Self::all_outputs(49, low_bits(49) & !bit_range(22, 25));

    /// ESP32-C3: GPIO 0-21
    pub const ESP32C3: Self = Self::all_outputs(22, low_bits(22));

    /// A layout with no usable pins
    pub const EMPTY: Self = Self::new(0, 0, 0);

    /// Create a layout from raw masks
    ///
    /// Bits outside `pin_count` are dropped, and the output mask is
    /// clipped to the valid mask.
    pub const fn new(pin_count: u8, valid_mask: u64, output_mask: u64) -> Self {
        let pin_count = if pin_count > 64 { 64 } else { pin_count };
        let valid_mask = valid_mask & low_bits(pin_count);
        Self {
            pin_count,
            valid_mask,
            output_mask: output_mask & valid_mask,
        }
    }

    /// Create a layout where every valid pin can also drive output
    pub const fn all_outputs(pin_count: u8, valid_mask: u64) -> Self {
        Self::new(pin_count, valid_mask, valid_mask)
    }

    /// Built-in layout for a chip model, if this crate knows it
    pub const fn for_model(model: ChipModel) -> Option<Self> {
        match model.normalized() {
            ChipModel::Esp32 => Some(Self::ESP32),
            ChipModel::Esp32S3 => Some(Self::ESP32S3),
            ChipModel::Esp32C3 => Some(Self::ESP32C3),
            _ => None,
        }
    }

    /// Number of GPIO slots
    pub const fn pin_count(&self) -> u8 {
        self.pin_count
    }

    /// Check if `pin` is inside `0..pin_count`
    pub const fn in_range(&self, pin: i32) -> bool {
        pin >= 0 && pin < self.pin_count as i32
    }

    /// Check if `pin` is a wired GPIO on this package
    pub const fn is_valid(&self, pin: i32) -> bool {
        self.in_range(pin) && self.valid_mask & (1u64 << pin) != 0
    }

    /// Check if `pin` is a wired GPIO that can drive an output
    pub const fn is_valid_output(&self, pin: i32) -> bool {
        self.in_range(pin) && self.output_mask & (1u64 << pin) != 0
    }

    /// Iterate over every wired GPIO number
    pub fn valid_pins(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.pin_count).filter(move |&p| self.valid_mask & (1u64 << p) != 0)
    }
}
