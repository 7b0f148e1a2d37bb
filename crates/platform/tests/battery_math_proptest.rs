//! Property-based tests for battery gauge math.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.

use platform::{percentage_for_voltage, BatteryConfig};

proptest::proptest! {
    /// percentage_for_voltage never panics and never leaves 0..=100 for any
    /// finite voltage, including absurd ones.
    #[test]
    fn percentage_always_in_range(millivolts in -20_000i32..=20_000i32) {
        let config = BatteryConfig::default();
        #[allow(clippy::cast_precision_loss)]
        let voltage = millivolts as f32 / 1000.0;
        let pct = percentage_for_voltage(&config, voltage);
        assert!(pct <= 100);
    }

    /// At or below the empty threshold the gauge reads exactly 0.
    #[test]
    fn percentage_zero_at_or_below_empty(millivolts in 0u32..=3300u32) {
        let config = BatteryConfig::default();
        #[allow(clippy::cast_precision_loss)]
        let voltage = millivolts as f32 / 1000.0;
        assert_eq!(percentage_for_voltage(&config, voltage), 0,
            "{voltage} V should read empty");
    }

    /// At or above the full threshold the gauge reads exactly 100.
    #[test]
    fn percentage_full_at_or_above_full(millivolts in 4200u32..=9000u32) {
        let config = BatteryConfig::default();
        #[allow(clippy::cast_precision_loss)]
        let voltage = millivolts as f32 / 1000.0;
        assert_eq!(percentage_for_voltage(&config, voltage), 100,
            "{voltage} V should read full");
    }

    /// The gauge is monotone non-decreasing in voltage.
    #[test]
    fn percentage_is_monotone_in_voltage(a in 0u32..=9000u32, b in 0u32..=9000u32) {
        let config = BatteryConfig::default();
        #[allow(clippy::cast_precision_loss)]
        let (va, vb) = (a as f32 / 1000.0, b as f32 / 1000.0);
        let (pa, pb) = (
            percentage_for_voltage(&config, va),
            percentage_for_voltage(&config, vb),
        );
        if a <= b {
            assert!(pa <= pb,
                "{va} V → {pa} % should be <= {vb} V → {pb} %");
        } else {
            assert!(pa >= pb,
                "{va} V → {pa} % should be >= {vb} V → {pb} %");
        }
    }
}
