//! Pin claim validator
//!
//! Checks run in a fixed order and the first rejection wins:
//!
//! 1. Range - pin inside `0..pin_count`
//! 2. Existence - pin bonded out on this package
//! 3. Mode - output requested on an output-capable pin
//! 4. Bus reservation - not wired to flash/PSRAM (either mode)
//! 5. Input-only pins requested as input return here with a
//!    no-pull-resistor notice
//! 6. Caution functions - every match adds a notice
//!
//! Unrecognized families stop after step 3.

use pinsentry_hal::{ChipInfoProvider, GpioLayout};

use crate::family::{ChipFamily, PinRole};
use crate::outcome::{Advisories, Advisory, AdvisoryKind, Outcome, RejectReason, Rejection};
use crate::pin::{Mode, PinId};

/// Validate a pin claim
///
/// Pure function of its arguments: the same inputs always produce the same
/// outcome.
pub fn validate(pin: PinId, mode: Mode, family: ChipFamily, layout: &GpioLayout) -> Outcome {
    let n = pin.number();
    let reject = |reason| Outcome::Rejected(Rejection { pin, family, reason });
    let notice = |kind| Advisory { pin, family, kind };

    if !layout.in_range(n) {
        return reject(RejectReason::OutOfRange);
    }
    if !layout.is_valid(n) {
        return reject(RejectReason::NotAPhysicalPin);
    }

    let mut advisories = Advisories::new();

    let Some(tables) = family.tables() else {
        if mode == Mode::Output && !layout.is_valid_output(n) {
            return reject(RejectReason::IncompatibleMode);
        }
        advisories.push(notice(AdvisoryKind::BasicValidationOnly));
        return Outcome::Ok(advisories);
    };

    if mode == Mode::Output && (!layout.is_valid_output(n) || tables.is_input_only(n)) {
        return reject(RejectReason::IncompatibleMode);
    }

    if let Some(reserved) = tables.reserved_range(n) {
        return reject(RejectReason::ReservedForBus(reserved.bus));
    }

    // Input-only pins return before the caution scan
    if mode == Mode::Input && tables.is_input_only(n) {
        advisories.push(notice(AdvisoryKind::NoPullResistors));
        return Outcome::Ok(advisories);
    }

    for function in tables.cautions_for(n) {
        advisories.push(notice(AdvisoryKind::Caution(function)));
    }

    Outcome::Ok(advisories)
}

/// Validator bound to one chip
///
/// Built once from the platform's chip query; every later call is a pure
/// table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinValidator {
    family: ChipFamily,
    layout: GpioLayout,
}

impl PinValidator {
    /// Create a validator for an explicit family and layout
    pub const fn new(family: ChipFamily, layout: GpioLayout) -> Self {
        Self { family, layout }
    }

    /// Create a validator for a family using its built-in layout
    ///
    /// Families without a built-in layout get an empty one, so every pin
    /// is out of range. Use [`PinValidator::new`] to supply the package
    /// table for such chips.
    pub const fn for_family(family: ChipFamily) -> Self {
        let layout = match family.builtin_layout() {
            Some(layout) => layout,
            None => GpioLayout::EMPTY,
        };
        Self::new(family, layout)
    }

    /// Query the platform once and build a validator for the running chip
    pub fn from_provider<P: ChipInfoProvider + ?Sized>(provider: &P) -> Self {
        let family = ChipFamily::from_model(provider.chip_info().model);
        Self::new(family, provider.gpio_layout())
    }

    /// Chip family this validator checks against
    pub fn family(&self) -> ChipFamily {
        self.family
    }

    /// GPIO layout this validator checks against
    pub fn layout(&self) -> &GpioLayout {
        &self.layout
    }

    /// Validate a pin claim
    pub fn validate(&self, pin: impl Into<PinId>, mode: Mode) -> Outcome {
        validate(pin.into(), mode, self.family, &self.layout)
    }

    /// Classify a pin without a mode
    pub fn role_of(&self, pin: impl Into<PinId>) -> PinRole {
        self.family.role_of(pin.into(), &self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::BusKind;
    use crate::tables::CautionFunction;
    use pinsentry_hal::{ChipInfo, ChipModel, FixedChip};
    use proptest::prelude::*;

    const UART0: AdvisoryKind = AdvisoryKind::Caution(CautionFunction::Uart0);
    const JTAG: AdvisoryKind = AdvisoryKind::Caution(CautionFunction::Jtag);
    const USB_JTAG: AdvisoryKind = AdvisoryKind::Caution(CautionFunction::UsbJtag);
    const STRAPPING: AdvisoryKind = AdvisoryKind::Caution(CautionFunction::Strapping);

    fn esp32() -> PinValidator {
        PinValidator::from_provider(&FixedChip::new(ChipModel::Esp32))
    }

    fn esp32s3() -> PinValidator {
        PinValidator::from_provider(&FixedChip::new(ChipModel::Esp32S3))
    }

    fn esp32c3() -> PinValidator {
        PinValidator::from_provider(&FixedChip::new(ChipModel::Esp32C3))
    }

    /// Chip the validator has no tables for, with a 30-pin package
    /// where 26-29 are input-only
    fn unknown_chip() -> PinValidator {
        let info = ChipInfo::new(ChipModel::Other(0x42));
        let layout = GpioLayout::new(30, (1 << 30) - 1, (1 << 26) - 1);
        PinValidator::from_provider(&FixedChip::with_layout(info, layout))
    }

    fn kinds(outcome: &Outcome) -> heapless::Vec<AdvisoryKind, 4> {
        outcome.advisories().iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_esp32_scenarios() {
        let v = esp32();

        assert_eq!(
            v.validate(6, Mode::Output).reason(),
            Some(RejectReason::ReservedForBus(BusKind::SpiFlashPsram))
        );

        let outcome = v.validate(1, Mode::Output);
        assert!(outcome.is_ok());
        assert_eq!(kinds(&outcome).as_slice(), &[UART0]);

        assert_eq!(
            v.validate(34, Mode::Output).reason(),
            Some(RejectReason::IncompatibleMode)
        );

        let outcome = v.validate(34, Mode::Input);
        assert!(outcome.is_ok());
        assert_eq!(kinds(&outcome).as_slice(), &[AdvisoryKind::NoPullResistors]);

        let outcome = v.validate(4, Mode::Input);
        assert_eq!(outcome, Outcome::Ok(Advisories::new()));

        assert_eq!(
            v.validate(200, Mode::Output).reason(),
            Some(RejectReason::OutOfRange)
        );
    }

    #[test]
    fn test_esp32_missing_pins() {
        let v = esp32();
        assert_eq!(v.validate(24, Mode::Input).reason(), Some(RejectReason::NotAPhysicalPin));
        assert_eq!(v.validate(30, Mode::Output).reason(), Some(RejectReason::NotAPhysicalPin));
        assert_eq!(v.validate(-1, Mode::Output).reason(), Some(RejectReason::OutOfRange));
        assert_eq!(v.validate(40, Mode::Input).reason(), Some(RejectReason::OutOfRange));
    }

    #[test]
    fn test_esp32_jtag_strapping_overlap() {
        let v = esp32();
        for pin in [12, 15] {
            let outcome = v.validate(pin, Mode::Output);
            assert_eq!(kinds(&outcome).as_slice(), &[JTAG, STRAPPING]);
        }
        assert_eq!(kinds(&v.validate(13, Mode::Input)).as_slice(), &[JTAG]);
        assert_eq!(kinds(&v.validate(5, Mode::Input)).as_slice(), &[STRAPPING]);
    }

    #[test]
    fn test_esp32s3_reports_bus() {
        let v = esp32s3();
        assert_eq!(
            v.validate(26, Mode::Input).reason(),
            Some(RejectReason::ReservedForBus(BusKind::SpiFlash))
        );
        assert_eq!(
            v.validate(37, Mode::Output).reason(),
            Some(RejectReason::ReservedForBus(BusKind::OctalFlash))
        );
        assert!(v.validate(38, Mode::Output).is_ok());
    }

    #[test]
    fn test_esp32s3_cautions() {
        let v = esp32s3();
        assert_eq!(kinds(&v.validate(19, Mode::Output)).as_slice(), &[USB_JTAG]);
        assert_eq!(kinds(&v.validate(20, Mode::Input)).as_slice(), &[USB_JTAG]);
        assert_eq!(kinds(&v.validate(43, Mode::Output)).as_slice(), &[UART0]);
        assert_eq!(kinds(&v.validate(46, Mode::Output)).as_slice(), &[STRAPPING]);
        assert_eq!(kinds(&v.validate(3, Mode::Input)).as_slice(), &[STRAPPING]);
        assert!(v.validate(48, Mode::Output).advisories().is_empty());
        assert_eq!(v.validate(49, Mode::Output).reason(), Some(RejectReason::OutOfRange));
        assert_eq!(v.validate(23, Mode::Input).reason(), Some(RejectReason::NotAPhysicalPin));
    }

    #[test]
    fn test_esp32c3() {
        let v = esp32c3();
        for pin in 12..=17 {
            assert_eq!(
                v.validate(pin, Mode::Input).reason(),
                Some(RejectReason::ReservedForBus(BusKind::SpiFlash))
            );
        }
        assert_eq!(kinds(&v.validate(18, Mode::Output)).as_slice(), &[USB_JTAG]);
        assert_eq!(kinds(&v.validate(9, Mode::Output)).as_slice(), &[STRAPPING]);
        assert!(v.validate(21, Mode::Output).advisories().is_empty());
        assert_eq!(v.validate(22, Mode::Output).reason(), Some(RejectReason::OutOfRange));
    }

    #[test]
    fn test_unrecognized_chip_basic_checks_only() {
        let v = unknown_chip();
        assert_eq!(v.family(), ChipFamily::Unrecognized(ChipModel::Other(0x42)));

        // Would be reserved on an ESP32, but no tables apply here
        let outcome = v.validate(6, Mode::Output);
        assert!(outcome.is_ok());
        assert_eq!(kinds(&outcome).as_slice(), &[AdvisoryKind::BasicValidationOnly]);

        assert_eq!(v.validate(27, Mode::Output).reason(), Some(RejectReason::IncompatibleMode));
        assert!(v.validate(27, Mode::Input).is_ok());
        assert_eq!(v.validate(30, Mode::Input).reason(), Some(RejectReason::OutOfRange));
    }

    #[test]
    fn test_for_family_uses_builtin_layout() {
        assert_eq!(PinValidator::for_family(ChipFamily::Esp32), esp32());
        let v = PinValidator::for_family(ChipFamily::Unrecognized(ChipModel::Esp32C6));
        assert_eq!(v.validate(0, Mode::Input).reason(), Some(RejectReason::OutOfRange));
    }

    #[test]
    fn test_explicit_family_overrides_query() {
        // Tables follow the family even if the layout came from elsewhere
        let v = PinValidator::new(ChipFamily::Esp32, GpioLayout::all_outputs(40, (1 << 40) - 1));
        assert_eq!(v.validate(36, Mode::Output).reason(), Some(RejectReason::IncompatibleMode));
    }

    /// Expected pin map for one family, written out pin by pin
    struct PinMap {
        reserved: &'static [(i32, BusKind)],
        cautions: &'static [(i32, &'static [AdvisoryKind])],
        input_only: &'static [i32],
    }

    /// Walk every GPIO slot in both modes and compare against `map`
    fn check_every_pin(v: &PinValidator, map: &PinMap) {
        for pin in 0..v.layout().pin_count() as i32 {
            let reserved = map.reserved.iter().find(|(p, _)| *p == pin).map(|(_, bus)| *bus);
            let input_only = map.input_only.contains(&pin);
            let cautions: &[AdvisoryKind] = map
                .cautions
                .iter()
                .find(|(p, _)| *p == pin)
                .map(|(_, tags)| *tags)
                .unwrap_or(&[]);

            for mode in [Mode::Input, Mode::Output] {
                let outcome = v.validate(pin, mode);
                if !v.layout().is_valid(pin) {
                    assert_eq!(outcome.reason(), Some(RejectReason::NotAPhysicalPin), "pin {}", pin);
                } else if input_only && mode == Mode::Output {
                    assert_eq!(outcome.reason(), Some(RejectReason::IncompatibleMode), "pin {}", pin);
                } else if let Some(bus) = reserved {
                    assert_eq!(outcome.reason(), Some(RejectReason::ReservedForBus(bus)), "pin {}", pin);
                } else if input_only {
                    assert_eq!(kinds(&outcome).as_slice(), &[AdvisoryKind::NoPullResistors], "pin {}", pin);
                } else {
                    assert!(outcome.is_ok(), "pin {} {}", pin, mode);
                    assert_eq!(kinds(&outcome).as_slice(), cautions, "pin {} {}", pin, mode);
                }
            }
        }
    }

    #[test]
    fn test_esp32_every_pin() {
        const FLASH: BusKind = BusKind::SpiFlashPsram;
        check_every_pin(
            &esp32(),
            &PinMap {
                reserved: &[
                    (6, FLASH),
                    (7, FLASH),
                    (8, FLASH),
                    (9, FLASH),
                    (10, FLASH),
                    (11, FLASH),
                    (16, FLASH),
                    (17, FLASH),
                ],
                cautions: &[
                    (0, &[STRAPPING]),
                    (1, &[UART0]),
                    (2, &[STRAPPING]),
                    (3, &[UART0]),
                    (5, &[STRAPPING]),
                    (12, &[JTAG, STRAPPING]),
                    (13, &[JTAG]),
                    (14, &[JTAG]),
                    (15, &[JTAG, STRAPPING]),
                ],
                input_only: &[34, 35, 36, 37, 38, 39],
            },
        );
    }

    #[test]
    fn test_esp32s3_every_pin() {
        const SPI: BusKind = BusKind::SpiFlash;
        const OCTAL: BusKind = BusKind::OctalFlash;
        check_every_pin(
            &esp32s3(),
            &PinMap {
                reserved: &[
                    (26, SPI),
                    (27, SPI),
                    (28, SPI),
                    (29, SPI),
                    (30, SPI),
                    (31, SPI),
                    (32, SPI),
                    (33, OCTAL),
                    (34, OCTAL),
                    (35, OCTAL),
                    (36, OCTAL),
                    (37, OCTAL),
                ],
                cautions: &[
                    (0, &[STRAPPING]),
                    (3, &[STRAPPING]),
                    (19, &[USB_JTAG]),
                    (20, &[USB_JTAG]),
                    (43, &[UART0]),
                    (44, &[UART0]),
                    (45, &[STRAPPING]),
                    (46, &[STRAPPING]),
                ],
                input_only: &[],
            },
        );
    }

    #[test]
    fn test_esp32c3_every_pin() {
        const SPI: BusKind = BusKind::SpiFlash;
        check_every_pin(
            &esp32c3(),
            &PinMap {
                reserved: &[(12, SPI), (13, SPI), (14, SPI), (15, SPI), (16, SPI), (17, SPI)],
                cautions: &[
                    (2, &[STRAPPING]),
                    (8, &[STRAPPING]),
                    (9, &[STRAPPING]),
                    (18, &[USB_JTAG]),
                    (19, &[USB_JTAG]),
                ],
                input_only: &[],
            },
        );
    }

    #[test]
    fn test_raw_model_id_from_provider() {
        // A platform reporting the raw id still gets the ESP32 tables
        let chip = FixedChip::with_layout(ChipInfo::new(ChipModel::Other(1)), GpioLayout::ESP32);
        let v = PinValidator::from_provider(&chip);
        assert_eq!(v.family(), ChipFamily::Esp32);
        assert_eq!(
            v.validate(6, Mode::Input).reason(),
            Some(RejectReason::ReservedForBus(BusKind::SpiFlashPsram))
        );
        assert_eq!(
            PinValidator::for_family(ChipFamily::from_model(ChipModel::Other(9))),
            esp32s3()
        );
    }

    fn any_family() -> impl Strategy<Value = PinValidator> {
        prop_oneof![
            Just(esp32()),
            Just(esp32s3()),
            Just(esp32c3()),
            Just(unknown_chip()),
        ]
    }

    fn any_mode() -> impl Strategy<Value = Mode> {
        prop_oneof![Just(Mode::Input), Just(Mode::Output)]
    }

    proptest! {
        #[test]
        fn validation_is_deterministic(v in any_family(), pin in -16i32..80, mode in any_mode()) {
            prop_assert_eq!(v.validate(pin, mode), v.validate(pin, mode));
        }

        #[test]
        fn out_of_range_pins_rejected(v in any_family(), offset in 0i32..1000, mode in any_mode()) {
            let count = v.layout().pin_count() as i32;
            prop_assert_eq!(v.validate(count + offset, mode).reason(), Some(RejectReason::OutOfRange));
            prop_assert_eq!(v.validate(-1 - offset, mode).reason(), Some(RejectReason::OutOfRange));
        }

        #[test]
        fn reserved_pins_rejected_in_both_modes(v in any_family(), pin in 0i32..64) {
            if let PinRole::ReservedBus(bus) = v.role_of(pin) {
                let expected = Some(RejectReason::ReservedForBus(bus));
                prop_assert_eq!(v.validate(pin, Mode::Input).reason(), expected);
                prop_assert_eq!(v.validate(pin, Mode::Output).reason(), expected);
            }
        }

        #[test]
        fn caution_pins_accepted_for_output(v in any_family(), pin in 0i32..64) {
            if v.role_of(pin) == PinRole::CautionFunction {
                let outcome = v.validate(pin, Mode::Output);
                prop_assert!(outcome.is_ok());
                let tables = v.family().tables().unwrap();
                for function in tables.cautions_for(pin) {
                    prop_assert!(outcome.has_advisory(AdvisoryKind::Caution(function)));
                }
            }
        }

        #[test]
        fn esp32_input_only_gating(pin in 34i32..=39) {
            let v = esp32();
            prop_assert_eq!(v.validate(pin, Mode::Output).reason(), Some(RejectReason::IncompatibleMode));
            let found = kinds(&v.validate(pin, Mode::Input));
            prop_assert_eq!(found.as_slice(), &[AdvisoryKind::NoPullResistors]);
        }

        #[test]
        fn unrecognized_family_is_permissive(pin in 0i32..30, mode in any_mode()) {
            let v = unknown_chip();
            let capable = mode == Mode::Input || v.layout().is_valid_output(pin);
            prop_assert_eq!(v.validate(pin, mode).is_ok(), capable);
        }

        #[test]
        fn status_matches_outcome(v in any_family(), pin in -4i32..64, mode in any_mode()) {
            let outcome = v.validate(pin, mode);
            let expected = if outcome.is_ok() { 0 } else { 0x102 };
            prop_assert_eq!(outcome.status().as_raw(), expected);
        }
    }
}
