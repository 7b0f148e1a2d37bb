//! Battery sampling pipeline — raw counts to calibrated voltage to gauge
//! percentage.
//!
//! A [`BatterySampler`] that fails configuration is marked unusable and
//! degrades every later read to the sentinel instead of retrying; see
//! [`BatterySampler::sample_voltage`] for the sentinel contract.

use thiserror_no_std::Error;

use crate::adc::{AdcAttenuation, AdcBitWidth, BatteryAdc};

/// Battery channel and chemistry configuration, fixed at construction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    /// ADC channel wired to the divided battery rail.
    pub channel: u8,
    /// Input attenuation for the divided rail.
    pub attenuation: AdcAttenuation,
    /// Conversion width.
    pub bitwidth: AdcBitWidth,
    /// Multiplier compensating the voltage divider between battery and pin.
    pub divider_ratio: f32,
    /// Voltage regarded as empty, in millivolts (LiPo cutoff).
    pub empty_mv: u16,
    /// Voltage regarded as full, in millivolts (LiPo full charge).
    pub full_mv: u16,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        BatteryConfig {
            channel: 2,
            attenuation: AdcAttenuation::Db11,
            bitwidth: AdcBitWidth::Default,
            divider_ratio: 2.0,
            empty_mv: 3300,
            full_mv: 4200,
        }
    }
}

/// One battery measurement. Produced fresh per call, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryReading {
    /// Raw sample counts from the peripheral.
    pub raw: u16,
    /// Calibrated pin voltage in millivolts.
    pub calibrated_mv: u16,
    /// Divider-compensated battery voltage in volts.
    pub actual_voltage: f32,
    /// Gauge percentage, clamped to `0..=100`.
    pub percentage: u8,
}

/// Channel or calibration configuration was rejected by the peripheral.
///
/// Fatal to the sampler instance: all subsequent reads return the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("battery ADC configuration rejected")]
pub struct HardwareInitError;

/// Periodic battery monitor over a [`BatteryAdc`].
pub struct BatterySampler<A: BatteryAdc> {
    adc: A,
    config: BatteryConfig,
    ready: bool,
}

impl<A: BatteryAdc> BatterySampler<A> {
    /// Wrap `adc` with the given configuration. Call [`Self::init`] before
    /// sampling.
    pub fn new(adc: A, config: BatteryConfig) -> Self {
        BatterySampler {
            adc,
            config,
            ready: false,
        }
    }

    /// Configure the channel and calibration scheme.
    ///
    /// On rejection the sampler stays unusable and every later read
    /// degrades to the sentinel; there is no retry path.
    pub fn init(&mut self) -> Result<(), HardwareInitError> {
        match self.adc.configure(
            self.config.channel,
            self.config.attenuation,
            self.config.bitwidth,
        ) {
            Ok(()) => {
                self.ready = true;
                Ok(())
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("battery ADC init rejected; sampler degraded to sentinel reads");
                self.ready = false;
                Err(HardwareInitError)
            }
        }
    }

    /// Whether [`Self::init`] succeeded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Take one measurement. `None` on any read or calibration failure.
    pub fn sample(&mut self) -> Option<BatteryReading> {
        if !self.ready {
            return None;
        }
        let raw = match self.adc.read_raw(self.config.channel) {
            Ok(raw) => raw,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("battery ADC read failed");
                return None;
            }
        };
        let calibrated_mv = match self.adc.raw_to_millivolts(raw) {
            Ok(mv) => mv,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("battery ADC calibration failed for raw={=u16}", raw);
                return None;
            }
        };
        let actual_voltage = (f32::from(calibrated_mv) / 1000.0) * self.config.divider_ratio;
        Some(BatteryReading {
            raw,
            calibrated_mv,
            actual_voltage,
            percentage: percentage_for_voltage(&self.config, actual_voltage),
        })
    }

    /// Divider-compensated battery voltage in volts.
    ///
    /// Returns `0.0` on any failure. The sentinel is deliberately
    /// indistinguishable from a genuinely near-dead battery; callers must
    /// not read `0.0` as proof of hardware failure. Use [`Self::is_ready`]
    /// to tell an init-degraded instance apart.
    pub fn sample_voltage(&mut self) -> f32 {
        self.sample().map_or(0.0, |r| r.actual_voltage)
    }

    /// Gauge percentage for a fresh measurement, clamped to `0..=100`.
    pub fn percentage(&mut self) -> u8 {
        self.sample().map_or(0, |r| r.percentage)
    }
}

/// Linear voltage-to-percentage map, clamped to `0..=100` and truncated
/// toward zero after clamping.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100 before the cast
pub fn percentage_for_voltage(config: &BatteryConfig, voltage: f32) -> u8 {
    let empty = f32::from(config.empty_mv) / 1000.0;
    let full = f32::from(config.full_mv) / 1000.0;
    if full <= empty {
        return 0;
    }
    let percentage = (voltage - empty) / (full - empty) * 100.0;
    percentage.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::{percentage_for_voltage, BatteryConfig, BatterySampler, HardwareInitError};
    use crate::adc::{AdcAttenuation, AdcBitWidth, BatteryAdc};

    #[derive(Default)]
    struct MockAdc {
        raw: u16,
        millivolts: u16,
        reject_configure: bool,
        fail_read: bool,
        fail_calibration: bool,
        configured: std::vec::Vec<(u8, AdcAttenuation, AdcBitWidth)>,
        reads: usize,
    }

    impl BatteryAdc for MockAdc {
        type Error = &'static str;

        fn configure(
            &mut self,
            channel: u8,
            attenuation: AdcAttenuation,
            bitwidth: AdcBitWidth,
        ) -> Result<(), Self::Error> {
            if self.reject_configure {
                return Err("configure rejected");
            }
            self.configured.push((channel, attenuation, bitwidth));
            Ok(())
        }

        fn read_raw(&mut self, _channel: u8) -> Result<u16, Self::Error> {
            self.reads += 1;
            if self.fail_read {
                return Err("read failed");
            }
            Ok(self.raw)
        }

        fn raw_to_millivolts(&mut self, _raw: u16) -> Result<u16, Self::Error> {
            if self.fail_calibration {
                return Err("calibration failed");
            }
            Ok(self.millivolts)
        }
    }

    fn sampler_with(millivolts: u16) -> BatterySampler<MockAdc> {
        let mut sampler = BatterySampler::new(
            MockAdc {
                raw: 1234,
                millivolts,
                ..MockAdc::default()
            },
            BatteryConfig::default(),
        );
        sampler.init().unwrap();
        sampler
    }

    #[test]
    fn test_init_configures_channel_from_config() {
        let mut sampler = BatterySampler::new(MockAdc::default(), BatteryConfig::default());
        sampler.init().unwrap();
        assert!(sampler.is_ready());
        assert_eq!(
            sampler.adc.configured,
            vec![(2, AdcAttenuation::Db11, AdcBitWidth::Default)]
        );
    }

    #[test]
    fn test_init_rejection_degrades_sampler() {
        let mut sampler = BatterySampler::new(
            MockAdc {
                reject_configure: true,
                ..MockAdc::default()
            },
            BatteryConfig::default(),
        );
        assert_eq!(sampler.init(), Err(HardwareInitError));
        assert!(!sampler.is_ready());
        // Degraded instance: sentinel reads, no hardware round-trip.
        assert_eq!(sampler.sample_voltage(), 0.0);
        assert_eq!(sampler.percentage(), 0);
        assert_eq!(sampler.adc.reads, 0);
    }

    #[test]
    fn test_divider_compensation_1650mv_is_3v3() {
        // Divider ratio 2.0 and 1650 mV at the pin: an empty battery.
        let mut sampler = sampler_with(1650);
        let v = sampler.sample_voltage();
        assert!((v - 3.3).abs() < 1e-6, "expected 3.3, got {v}");
        assert_eq!(sampler.percentage(), 0);
    }

    #[test]
    fn test_divider_compensation_2100mv_is_4v2() {
        // Divider ratio 2.0 and 2100 mV at the pin: a full battery.
        let mut sampler = sampler_with(2100);
        let v = sampler.sample_voltage();
        assert!((v - 4.2).abs() < 1e-6, "expected 4.2, got {v}");
        assert_eq!(sampler.percentage(), 100);
    }

    #[test]
    fn test_midpoint_percentage() {
        // 1875 mV × 2.0 = 3.75 V, halfway between 3.3 and 4.2.
        let mut sampler = sampler_with(1875);
        assert_eq!(sampler.percentage(), 50);
    }

    #[test]
    fn test_read_failure_returns_sentinel() {
        let mut sampler = BatterySampler::new(
            MockAdc {
                fail_read: true,
                ..MockAdc::default()
            },
            BatteryConfig::default(),
        );
        sampler.init().unwrap();
        assert_eq!(sampler.sample_voltage(), 0.0);
        assert_eq!(sampler.percentage(), 0);
    }

    #[test]
    fn test_calibration_failure_returns_sentinel() {
        let mut sampler = BatterySampler::new(
            MockAdc {
                fail_calibration: true,
                ..MockAdc::default()
            },
            BatteryConfig::default(),
        );
        sampler.init().unwrap();
        assert_eq!(sampler.sample_voltage(), 0.0);
    }

    #[test]
    fn test_reading_carries_raw_and_calibrated_values() {
        let mut sampler = sampler_with(2100);
        let reading = sampler.sample().unwrap();
        assert_eq!(reading.raw, 1234);
        assert_eq!(reading.calibrated_mv, 2100);
        assert_eq!(reading.percentage, 100);
    }

    #[test]
    fn test_percentage_clamped_below_empty() {
        let config = BatteryConfig::default();
        assert_eq!(percentage_for_voltage(&config, 3.0), 0);
        assert_eq!(percentage_for_voltage(&config, 0.0), 0);
        assert_eq!(percentage_for_voltage(&config, -1.0), 0);
    }

    #[test]
    fn test_percentage_clamped_above_full() {
        let config = BatteryConfig::default();
        assert_eq!(percentage_for_voltage(&config, 4.3), 100);
        assert_eq!(percentage_for_voltage(&config, 9.9), 100);
    }

    #[test]
    fn test_degenerate_config_reads_zero() {
        let config = BatteryConfig {
            empty_mv: 4200,
            full_mv: 3300,
            ..BatteryConfig::default()
        };
        assert_eq!(percentage_for_voltage(&config, 3.75), 0);
    }
}
