//! Effective EIRP toward a protection point
//!
//! The declared max EIRP already contains the nominal CBSD antenna gain.
//! That gain is swapped for the actual gain along the path and the power
//! density (per MHz) is scaled to the reference bandwidth.

use crate::constants::{IAPBW_HZ, MHZ};
use crate::linear_to_db;

/// Effective EIRP in dBm over `reference_bandwidth_hz`.
///
/// * `max_eirp` - EIRP allocated to the grant (dBm/MHz)
/// * `cbsd_max_ant_gain` - nominal CBSD antenna gain (dBi)
/// * `effective_ant_gain` - total antenna gain at the CBSD and the incumbent
///   along the path (dBi)
pub fn get_effective_system_eirp(
    max_eirp: f64,
    cbsd_max_ant_gain: f64,
    effective_ant_gain: f64,
    reference_bandwidth_hz: f64,
) -> f64 {
    (max_eirp - cbsd_max_ant_gain) + effective_ant_gain + linear_to_db(reference_bandwidth_hz / MHZ)
}

/// Effective EIRP over the 5 MHz IAP bandwidth.
pub fn get_effective_system_eirp_iap(
    max_eirp: f64,
    cbsd_max_ant_gain: f64,
    effective_ant_gain: f64,
) -> f64 {
    get_effective_system_eirp(max_eirp, cbsd_max_ant_gain, effective_ant_gain, IAPBW_HZ)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_mhz_reference_is_identity() {
        let eirp = get_effective_system_eirp(20.0, 10.0, 10.0, 1e6);
        assert!((eirp - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_iap_bandwidth_default() {
        let eirp = get_effective_system_eirp_iap(20.0, 10.0, 4.0);
        let expected = 20.0 - 10.0 + 4.0 + 10.0 * 5f64.log10();
        assert!((eirp - expected).abs() < 1e-12);
    }

    #[test]
    fn test_doubling_bandwidth_adds_3db() {
        let single = get_effective_system_eirp(25.0, 12.0, 7.5, 10e6);
        let double = get_effective_system_eirp(25.0, 12.0, 7.5, 20e6);
        assert!((double - single - 10.0 * 2f64.log10()).abs() < 1e-12);
        assert!((double - single - 3.0103).abs() < 1e-4);
    }
}
