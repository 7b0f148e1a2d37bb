//! Battery ADC collaborator boundary.
//!
//! The controller consumes exactly three operations from the sampling
//! peripheral: channel configuration, a raw oneshot read, and the
//! driver-owned calibration curve from raw counts to millivolts. Register
//! level setup stays inside the implementing driver.

/// Input attenuation applied ahead of the sampling stage.
///
/// `Db11` extends the measurable range far enough for a divided LiPo rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcAttenuation {
    /// No attenuation (~0–950 mV input range).
    Db0,
    /// 2.5 dB attenuation.
    Db2_5,
    /// 6 dB attenuation.
    Db6,
    /// 11 dB attenuation (~0–2500 mV input range).
    Db11,
}

/// Conversion bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcBitWidth {
    /// Driver default for the target (12 bits on the supported parts).
    #[default]
    Default,
    /// 9-bit conversions.
    Bits9,
    /// 10-bit conversions.
    Bits10,
    /// 11-bit conversions.
    Bits11,
    /// 12-bit conversions.
    Bits12,
}

/// Oneshot battery ADC with a calibration curve.
///
/// Implementations wrap the vendor peripheral driver; failures carry the
/// driver's own error type and are mapped to a degraded sampler by the
/// caller. The raw read is a blocking round-trip bounded by the driver's
/// internal timeout.
pub trait BatteryAdc {
    /// Driver error type.
    type Error: core::fmt::Debug;

    /// Configure the channel and calibration scheme.
    fn configure(
        &mut self,
        channel: u8,
        attenuation: AdcAttenuation,
        bitwidth: AdcBitWidth,
    ) -> Result<(), Self::Error>;

    /// Read one raw sample from `channel`.
    fn read_raw(&mut self, channel: u8) -> Result<u16, Self::Error>;

    /// Convert a raw sample to millivolts via the calibration curve.
    fn raw_to_millivolts(&mut self, raw: u16) -> Result<u16, Self::Error>;
}
