//! Chip identity
//!
//! The running chip's model is a process-wide platform fact. It is exposed
//! through [`ChipInfoProvider`] so that code consuming it can be driven by a
//! fixed value on the host.

use crate::gpio::GpioLayout;

/// Chip model identifiers
///
/// Discriminants match the values reported by the ESP-IDF chip info query.
/// Models this crate has no name for are carried as [`ChipModel::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipModel {
    /// ESP32 (dual-core Xtensa)
    Esp32,
    /// ESP32-S2
    Esp32S2,
    /// ESP32-C3
    Esp32C3,
    /// ESP32-S3
    Esp32S3,
    /// ESP32-C2
    Esp32C2,
    /// ESP32-C6
    Esp32C6,
    /// ESP32-H2
    Esp32H2,
    /// ESP32-P4
    Esp32P4,
    /// Any other raw model id
    Other(u32),
}

impl ChipModel {
    /// Get the raw model id
    pub const fn as_raw(self) -> u32 {
        match self {
            ChipModel::Esp32 => 1,
            ChipModel::Esp32S2 => 2,
            ChipModel::Esp32C3 => 5,
            ChipModel::Esp32S3 => 9,
            ChipModel::Esp32C2 => 12,
            ChipModel::Esp32C6 => 13,
            ChipModel::Esp32H2 => 16,
            ChipModel::Esp32P4 => 18,
            ChipModel::Other(raw) => raw,
        }
    }

    /// Create a model from a raw id
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => ChipModel::Esp32,
            2 => ChipModel::Esp32S2,
            5 => ChipModel::Esp32C3,
            9 => ChipModel::Esp32S3,
            12 => ChipModel::Esp32C2,
            13 => ChipModel::Esp32C6,
            16 => ChipModel::Esp32H2,
            18 => ChipModel::Esp32P4,
            other => ChipModel::Other(other),
        }
    }

    /// Map `Other(raw)` carrying a known id to its named variant
    pub const fn normalized(self) -> Self {
        Self::from_raw(self.as_raw())
    }

    /// Human-readable part name
    pub const fn name(self) -> &'static str {
        match self {
            ChipModel::Esp32 => "ESP32",
            ChipModel::Esp32S2 => "ESP32-S2",
            ChipModel::Esp32C3 => "ESP32-C3",
            ChipModel::Esp32S3 => "ESP32-S3",
            ChipModel::Esp32C2 => "ESP32-C2",
            ChipModel::Esp32C6 => "ESP32-C6",
            ChipModel::Esp32H2 => "ESP32-H2",
            ChipModel::Esp32P4 => "ESP32-P4",
            ChipModel::Other(_) => "unknown",
        }
    }
}

/// Snapshot of the chip info query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipInfo {
    /// Chip model
    pub model: ChipModel,
}

impl ChipInfo {
    /// Create chip info for a model
    pub const fn new(model: ChipModel) -> Self {
        Self { model }
    }
}

/// Platform chip identity query
///
/// Implementations wrap whatever the platform offers for identifying the
/// chip it runs on, together with the GPIO table of the package.
pub trait ChipInfoProvider {
    /// Query the running chip
    fn chip_info(&self) -> ChipInfo;

    /// GPIO table for the running chip
    fn gpio_layout(&self) -> GpioLayout;
}

impl<T: ChipInfoProvider + ?Sized> ChipInfoProvider for &T {
    fn chip_info(&self) -> ChipInfo {
        (**self).chip_info()
    }

    fn gpio_layout(&self) -> GpioLayout {
        (**self).gpio_layout()
    }
}

/// Provider that always reports the same chip
///
/// Used on the host and in tests, or on targets where the model is known at
/// build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedChip {
    info: ChipInfo,
    layout: GpioLayout,
}

impl FixedChip {
    /// Create a provider for a model, using its built-in GPIO table
    ///
    /// Models without a built-in table get [`GpioLayout::EMPTY`]; use
    /// [`FixedChip::with_layout`] to supply one.
    pub const fn new(model: ChipModel) -> Self {
        let layout = match GpioLayout::for_model(model) {
            Some(layout) => layout,
            None => GpioLayout::EMPTY,
        };
        Self {
            info: ChipInfo::new(model),
            layout,
        }
    }

    /// Create a provider with an explicit GPIO table
    pub const fn with_layout(info: ChipInfo, layout: GpioLayout) -> Self {
        Self { info, layout }
    }
}

impl ChipInfoProvider for FixedChip {
    fn chip_info(&self) -> ChipInfo {
        self.info
    }

    fn gpio_layout(&self) -> GpioLayout {
        self.layout
    }
}
